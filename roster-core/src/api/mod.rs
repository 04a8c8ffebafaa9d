//! Remote collection access.

pub mod client;
pub mod routes;
pub mod source;

pub use client::ApiClient;
#[cfg(test)]
pub use source::MockPageSource;
pub use source::PageSource;
