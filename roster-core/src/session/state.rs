use std::num::NonZeroUsize;

use roster_model::{Character, NumericField, PeoplePage, SortDirection};
use tracing::{debug, error, info};

use super::remote::{RemotePageState, RemotePages};
use crate::error::FetchError;
use crate::pagination::{self, PageCursor};
use crate::sorting;

/// Default number of records in one visible window.
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub window_size: NonZeroUsize,
    pub sort_field: NumericField,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            sort_field: NumericField::default(),
        }
    }
}

/// What applying a fetch result did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Appended { page: u32, records: usize },
    Exhausted { page: u32 },
    Failed { page: u32 },
}

impl FetchOutcome {
    pub fn page(self) -> u32 {
        match self {
            FetchOutcome::Appended { page, .. }
            | FetchOutcome::Exhausted { page }
            | FetchOutcome::Failed { page } => page,
        }
    }

    pub fn appended(self) -> bool {
        matches!(self, FetchOutcome::Appended { .. })
    }
}

/// Browsing state for one UI session.
///
/// Owns the accumulated record list, the window cursor, the exhaustion flag,
/// the loading indicator, the sort direction and the per-page fetch table.
/// Only [`Session::complete_fetch`] grows the record list.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<Character>,
    cursor: PageCursor,
    window_size: NonZeroUsize,
    sort_field: NumericField,
    direction: SortDirection,
    exhausted: bool,
    loading: bool,
    remote: RemotePages,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            records: Vec::new(),
            cursor: PageCursor::FIRST,
            window_size: options.window_size,
            sort_field: options.sort_field,
            direction: SortDirection::default(),
            exhausted: false,
            loading: false,
            remote: RemotePages::default(),
        }
    }

    pub fn records(&self) -> &[Character] {
        &self.records
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn window_size(&self) -> NonZeroUsize {
        self.window_size
    }

    pub fn sort_field(&self) -> NumericField {
        self.sort_field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn remote_page_state(&self, page: u32) -> RemotePageState {
        self.remote.state(page)
    }

    pub fn loaded_remote_pages(&self) -> usize {
        self.remote.loaded_count()
    }

    /// Unsorted slice of the accumulated list under the cursor.
    pub fn window(&self) -> &[Character] {
        pagination::window(&self.records, self.cursor, self.window_size)
    }

    /// The window as it should be rendered.
    pub fn sorted_window(&self) -> Vec<&Character> {
        sorting::sort_window(self.window(), self.sort_field, self.direction)
    }

    pub fn can_advance(&self) -> bool {
        pagination::has_next_window(self.records.len(), self.cursor, self.window_size)
    }

    pub fn can_retreat(&self) -> bool {
        !self.cursor.is_first()
    }

    /// Move to the next window if it already holds records.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.cursor = self.cursor.next();
        debug!(cursor = %self.cursor, "[Session] advanced");
        true
    }

    /// Move to the previous window. Clears exhaustion so the tail of the
    /// collection can be requested again.
    pub fn retreat(&mut self) -> bool {
        let Some(prev) = self.cursor.prev() else {
            return false;
        };
        self.cursor = prev;
        self.exhausted = false;
        self.remote.reopen_exhausted();
        debug!(cursor = %self.cursor, "[Session] retreated");
        true
    }

    pub fn toggle_sort(&mut self) -> SortDirection {
        self.direction = self.direction.toggled();
        debug!(direction = %self.direction, "[Session] sort toggled");
        self.direction
    }

    /// Records required before Next can be enabled from the current window.
    pub fn required_records(&self) -> usize {
        pagination::window_bounds(self.cursor, self.window_size).end + 1
    }

    pub fn is_covered(&self) -> bool {
        self.records.len() >= self.required_records()
    }

    /// Pick the next remote page to request and mark it loading.
    ///
    /// Returns `None` while a request is in flight, when the records already
    /// cover the next window, or when the next page is known to be empty.
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if let Some(page) = self.remote.in_flight() {
            debug!(page, "[Session] fetch already in flight");
            return None;
        }
        if self.is_covered() {
            return None;
        }

        let page = self.remote.first_unloaded();
        if matches!(self.remote.state(page), RemotePageState::Exhausted) {
            return None;
        }

        self.remote.set(page, RemotePageState::Loading);
        self.loading = true;
        debug!(page, cursor = %self.cursor, "[Session] fetch started");
        Some(page)
    }

    /// Apply the result of fetching remote `page`.
    ///
    /// Failures are logged and leave records, cursor and exhaustion as they
    /// were; the page returns to idle.
    pub fn complete_fetch(
        &mut self,
        page: u32,
        result: Result<PeoplePage, FetchError>,
    ) -> FetchOutcome {
        self.loading = false;

        match result {
            Ok(body) if body.is_empty() => {
                self.exhausted = true;
                self.remote.set(page, RemotePageState::Exhausted);
                info!(page, "[Session] remote collection exhausted");
                FetchOutcome::Exhausted { page }
            }
            Ok(body) => {
                let records = body.len();
                self.records.extend(body.results);
                self.remote.set(page, RemotePageState::Loaded { records });
                debug!(
                    page,
                    records,
                    total = self.records.len(),
                    "[Session] page appended"
                );
                FetchOutcome::Appended { page, records }
            }
            Err(err) => {
                self.remote.set(page, RemotePageState::Idle);
                error!(page, error = %err, detail = ?err, "Error fetching data");
                FetchOutcome::Failed { page }
            }
        }
    }
}
