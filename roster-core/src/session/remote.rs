use std::collections::BTreeMap;

/// Lifecycle of one remote page.
///
/// `Idle -> Loading` when requested, then `Loaded` (records appended),
/// `Exhausted` (empty results), or back to `Idle` on failure so a later
/// request can try again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemotePageState {
    #[default]
    Idle,
    Loading,
    Loaded { records: usize },
    Exhausted,
}

/// Per-page state keyed by 1-based remote page number.
#[derive(Debug, Default, Clone)]
pub(crate) struct RemotePages {
    pages: BTreeMap<u32, RemotePageState>,
}

impl RemotePages {
    pub(crate) fn state(&self, page: u32) -> RemotePageState {
        self.pages.get(&page).copied().unwrap_or_default()
    }

    pub(crate) fn set(&mut self, page: u32, state: RemotePageState) {
        self.pages.insert(page, state);
    }

    /// Lowest page number that has not been loaded.
    pub(crate) fn first_unloaded(&self) -> u32 {
        let mut page = 1;
        while matches!(self.state(page), RemotePageState::Loaded { .. }) {
            page += 1;
        }
        page
    }

    pub(crate) fn in_flight(&self) -> Option<u32> {
        self.pages
            .iter()
            .find(|(_, state)| matches!(state, RemotePageState::Loading))
            .map(|(page, _)| *page)
    }

    /// Make every exhausted page requestable again.
    pub(crate) fn reopen_exhausted(&mut self) {
        for state in self.pages.values_mut() {
            if matches!(state, RemotePageState::Exhausted) {
                *state = RemotePageState::Idle;
            }
        }
    }

    pub(crate) fn loaded_count(&self) -> usize {
        self.pages
            .values()
            .filter(|s| matches!(s, RemotePageState::Loaded { .. }))
            .count()
    }
}
