//! Core library for the roster browser.
//!
//! The crate is split along the three pieces of browsing state:
//!
//! - [`api`] fetches remote pages of the `people` collection.
//! - [`pagination`] derives the fixed-size visible window from the
//!   accumulated records.
//! - [`sorting`] reorders a window by a numeric attribute.
//!
//! [`session::Session`] owns the state those pieces read and write, and
//! [`session::Browser`] drives it against a [`api::PageSource`].

pub mod api;
pub mod error;
pub mod pagination;
pub mod session;
pub mod sorting;

pub use api::{ApiClient, PageSource};
pub use error::FetchError;
pub use pagination::PageCursor;
pub use session::{Browser, FetchOutcome, RemotePageState, Session, SessionOptions};
pub use sorting::{MeasureKey, sort_window};

pub use roster_model as model;
