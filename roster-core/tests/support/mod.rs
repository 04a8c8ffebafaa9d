#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use roster_core::model::{Character, PeoplePage};
use roster_core::{FetchError, PageSource};

pub fn character(name: &str, mass: &str) -> Character {
    Character {
        name: name.to_string(),
        mass: mass.to_string(),
        height: "100".to_string(),
        ..Default::default()
    }
}

pub fn numbered_page(count: usize, offset: usize) -> PeoplePage {
    PeoplePage::new(
        (0..count)
            .map(|i| character(&format!("character-{}", offset + i), &format!("{}", offset + i)))
            .collect(),
    )
}

/// In-memory page source. Pages without an entry answer 404, like the real
/// API past the end of the collection.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Mutex<HashMap<u32, PeoplePage>>,
    failures: Mutex<HashMap<u32, usize>>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: u32, body: PeoplePage) -> Self {
        self.pages.lock().unwrap().insert(page, body);
        self
    }

    /// Fail the next `times` requests for `page` before serving it.
    pub fn failing(self, page: u32, times: usize) -> Self {
        self.failures.lock().unwrap().insert(page, times);
        self
    }

    pub fn set_page(&self, page: u32, body: PeoplePage) {
        self.pages.lock().unwrap().insert(page, body);
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_people(&self, page: u32) -> Result<PeoplePage, FetchError> {
        self.calls.lock().unwrap().push(page);

        let url = format!("scripted://people/?page={page}");
        {
            let mut failures = self.failures.lock().unwrap();
            if let Some(remaining) = failures.get_mut(&page)
                && *remaining > 0
            {
                *remaining -= 1;
                return Err(FetchError::Status {
                    url,
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    body: "try later".into(),
                });
            }
        }

        self.pages
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .ok_or(FetchError::Status {
                url,
                status: StatusCode::NOT_FOUND,
                body: r#"{"detail":"Not found"}"#.into(),
            })
    }
}
