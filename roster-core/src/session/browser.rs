use tracing::debug;

use super::state::{FetchOutcome, Session};
use crate::api::PageSource;

/// Drives a [`Session`] against a [`PageSource`], one request at a time.
///
/// Every cursor change is followed by [`Browser::sync`], which keeps
/// requesting remote pages until the next window is available, the
/// collection is exhausted, or a request fails.
#[derive(Debug)]
pub struct Browser<S> {
    source: S,
    session: Session,
}

impl<S: PageSource> Browser<S> {
    pub fn new(source: S, session: Session) -> Self {
        Self { source, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Fetch until the current window and the one after it are covered.
    /// Returns the outcome of each request made.
    pub async fn sync(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Some(page) = self.session.begin_fetch() {
            let result = self.source.fetch_people(page).await;
            let outcome = self.session.complete_fetch(page, result);
            outcomes.push(outcome);
            if !outcome.appended() {
                break;
            }
        }
        outcomes
    }

    pub async fn next(&mut self) -> bool {
        if !self.session.advance() {
            return false;
        }
        self.sync().await;
        true
    }

    pub async fn previous(&mut self) -> bool {
        if !self.session.retreat() {
            return false;
        }
        self.sync().await;
        true
    }

    pub fn toggle_sort(&mut self) {
        self.session.toggle_sort();
    }

    /// Walk forward until window `target` is visible or no further window is
    /// available. Returns the window index reached.
    pub async fn seek(&mut self, target: usize) -> usize {
        self.sync().await;
        while self.session.cursor().get() < target {
            if !self.next().await {
                debug!(
                    target,
                    reached = self.session.cursor().get(),
                    "[Browser] seek stopped early"
                );
                break;
            }
        }
        self.session.cursor().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPageSource;
    use crate::error::FetchError;
    use crate::session::SessionOptions;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use reqwest::StatusCode;
    use roster_model::{Character, PeoplePage};
    use std::num::NonZeroUsize;

    fn page_of(names: &[&str]) -> PeoplePage {
        PeoplePage::new(
            names
                .iter()
                .map(|n| Character {
                    name: (*n).to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn sync_requests_each_page_once_until_covered() {
        let mut source = MockPageSource::new();
        let mut seq = Sequence::new();
        source
            .expect_fetch_people()
            .with(eq(1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page_of(&["a", "b", "c"])));
        source
            .expect_fetch_people()
            .with(eq(2))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page_of(&["d", "e", "f"])));

        let mut browser = Browser::new(source, Session::default());
        let outcomes = browser.sync().await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(browser.session().records().len(), 6);
        assert!(browser.session().can_advance());
        // Already covered: no further requests.
        assert!(browser.sync().await.is_empty());
    }

    #[tokio::test]
    async fn sync_stops_after_failure() {
        let mut source = MockPageSource::new();
        source
            .expect_fetch_people()
            .with(eq(1))
            .times(1)
            .returning(|_| {
                Err(FetchError::Status {
                    url: "http://test/people/?page=1".into(),
                    status: StatusCode::BAD_GATEWAY,
                    body: String::new(),
                })
            });

        let mut browser = Browser::new(source, Session::default());
        let outcomes = browser.sync().await;

        assert_eq!(outcomes, vec![FetchOutcome::Failed { page: 1 }]);
        assert!(browser.session().records().is_empty());
        assert!(!browser.session().is_loading());
    }

    #[tokio::test]
    async fn seek_stops_at_last_available_window() {
        let mut source = MockPageSource::new();
        source
            .expect_fetch_people()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(page_of(&["a", "b", "c", "d", "e"])));
        source
            .expect_fetch_people()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(PeoplePage::default()));

        let options = SessionOptions {
            window_size: NonZeroUsize::new(2).unwrap(),
            ..Default::default()
        };
        let mut browser = Browser::new(source, Session::new(options));
        let reached = browser.seek(10).await;

        assert_eq!(reached, 3);
        assert!(browser.session().is_exhausted());
        assert_eq!(browser.session().window().len(), 1);
    }
}
