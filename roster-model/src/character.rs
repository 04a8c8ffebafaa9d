use crate::numbers::parse_measure;
use crate::sort::NumericField;

/// One character entity as returned by the `people` collection.
///
/// Measures are kept as the raw strings the API sends; use
/// [`Character::measure`] for the numeric reading. Reference lists that are
/// missing from a payload decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Character {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    pub films: Vec<String>,
    pub species: Vec<String>,
    pub vehicles: Vec<String>,
    pub starships: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

/// A labelled list of related-resource links shown under a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkGroup<'a> {
    pub label: &'static str,
    pub links: &'a [String],
}

impl Character {
    /// Numeric reading of `field`, `0.0` when the raw value is not a number.
    pub fn measure(&self, field: NumericField) -> f64 {
        parse_measure(self.raw_measure(field))
    }

    pub fn raw_measure(&self, field: NumericField) -> &str {
        match field {
            NumericField::Mass => &self.mass,
            NumericField::Height => &self.height,
        }
    }

    /// Reference groups that carry at least one link, in display order.
    pub fn link_groups(&self) -> impl Iterator<Item = LinkGroup<'_>> {
        [
            ("Films", self.films.as_slice()),
            ("Species", self.species.as_slice()),
            ("Vehicles", self.vehicles.as_slice()),
            ("Starships", self.starships.as_slice()),
        ]
        .into_iter()
        .filter(|(_, links)| !links.is_empty())
        .map(|(label, links)| LinkGroup { label, links })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_reads_selected_field() {
        let c = Character {
            mass: "77".into(),
            height: "172".into(),
            ..Default::default()
        };
        assert_eq!(c.measure(NumericField::Mass), 77.0);
        assert_eq!(c.measure(NumericField::Height), 172.0);
    }

    #[test]
    fn link_groups_skip_empty_lists() {
        let c = Character {
            films: vec!["https://swapi.dev/api/films/1/".into()],
            starships: vec![
                "https://swapi.dev/api/starships/12/".into(),
                "https://swapi.dev/api/starships/22/".into(),
            ],
            ..Default::default()
        };
        let labels: Vec<_> = c.link_groups().map(|g| g.label).collect();
        assert_eq!(labels, vec!["Films", "Starships"]);
        assert_eq!(c.link_groups().last().map(|g| g.links.len()), Some(2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_reference_lists_decode_as_empty() {
        let json = r#"{"name":"Yoda","mass":"17","height":"66"}"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(c.name, "Yoda");
        assert!(c.films.is_empty());
        assert!(c.vehicles.is_empty());
        assert_eq!(c.link_groups().count(), 0);
    }
}
