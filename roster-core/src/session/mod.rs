//! Browsing session: accumulated records, window cursor and fetch state.

mod browser;
mod remote;
mod state;

pub use browser::Browser;
pub use remote::RemotePageState;
pub use state::{DEFAULT_WINDOW_SIZE, FetchOutcome, Session, SessionOptions};
