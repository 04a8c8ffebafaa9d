use crate::character::Character;

/// Body of `GET <base>/people/?page=<n>`.
///
/// Only `results` drives browsing state. `next`, `previous` and `count` are
/// kept for diagnostics; exhaustion is detected from an empty `results`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PeoplePage {
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Character>,
}

impl PeoplePage {
    pub fn new(results: Vec<Character>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn decodes_swapi_envelope() {
        let json = r#"{
            "count": 82,
            "next": "https://swapi.dev/api/people/?page=2",
            "previous": null,
            "results": [
                {"name": "Luke Skywalker", "mass": "77", "films": ["https://swapi.dev/api/films/1/"]},
                {"name": "C-3PO", "mass": "75"}
            ]
        }"#;
        let page: PeoplePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, Some(82));
        assert!(page.previous.is_none());
        assert_eq!(page.len(), 2);
        assert_eq!(page.results[0].films.len(), 1);
    }

    #[test]
    fn empty_results_is_empty_page() {
        let page: PeoplePage =
            serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(page.is_empty());
    }
}
