//! Plain-text layout of a character card, shared by `list` and the browser.

use roster_model::Character;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardLine {
    /// `Label: value`
    Field { label: &'static str, value: String },
    /// Heading for a group of links.
    Group { label: &'static str },
    Link(String),
}

pub fn card_lines(character: &Character) -> Vec<CardLine> {
    let fields: [(&'static str, &str); 7] = [
        ("Height", &character.height),
        ("Mass", &character.mass),
        ("Hair Color", &character.hair_color),
        ("Skin Color", &character.skin_color),
        ("Eye Color", &character.eye_color),
        ("Birth Year", &character.birth_year),
        ("Gender", &character.gender),
    ];

    let mut lines: Vec<CardLine> = fields
        .into_iter()
        .map(|(label, value)| CardLine::Field {
            label,
            value: value.to_string(),
        })
        .collect();

    for group in character.link_groups() {
        lines.push(CardLine::Group { label: group.label });
        lines.extend(group.links.iter().cloned().map(CardLine::Link));
    }

    lines
}

/// Text form used by `rosterctl list`.
pub fn card_text(character: &Character) -> String {
    let mut out = String::new();
    out.push_str(&character.name);
    out.push('\n');
    for line in card_lines(character) {
        match line {
            CardLine::Field { label, value } => {
                out.push_str(&format!("  {label}: {value}\n"));
            }
            CardLine::Group { label } => out.push_str(&format!("  {label}:\n")),
            CardLine::Link(link) => out.push_str(&format!("    {link}\n")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luke() -> Character {
        Character {
            name: "Luke Skywalker".into(),
            height: "172".into(),
            mass: "77".into(),
            hair_color: "blond".into(),
            skin_color: "fair".into(),
            eye_color: "blue".into(),
            birth_year: "19BBY".into(),
            gender: "male".into(),
            films: vec!["https://swapi.dev/api/films/1/".into()],
            ..Default::default()
        }
    }

    #[test]
    fn empty_link_groups_are_omitted() {
        let lines = card_lines(&luke());
        assert!(lines.contains(&CardLine::Group { label: "Films" }));
        assert!(!lines.contains(&CardLine::Group { label: "Species" }));
        assert!(!lines.contains(&CardLine::Group { label: "Starships" }));
    }

    #[test]
    fn text_card_lists_fields_in_order() {
        let text = card_text(&luke());
        let height = text.find("Height: 172").unwrap();
        let gender = text.find("Gender: male").unwrap();
        assert!(text.starts_with("Luke Skywalker\n"));
        assert!(height < gender);
        assert!(text.contains("  Films:\n    https://swapi.dev/api/films/1/\n"));
    }
}
