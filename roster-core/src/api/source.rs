use async_trait::async_trait;
use roster_model::PeoplePage;

use crate::error::FetchError;

/// Anything that can hand out remote pages of the `people` collection.
///
/// Pages are 1-based. An empty `results` list is a successful response that
/// marks the end of the collection; it is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_people(&self, page: u32) -> Result<PeoplePage, FetchError>;
}

#[async_trait]
impl<T> PageSource for std::sync::Arc<T>
where
    T: PageSource + ?Sized,
{
    async fn fetch_people(&self, page: u32) -> Result<PeoplePage, FetchError> {
        (**self).fetch_people(page).await
    }
}
