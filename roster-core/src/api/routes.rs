/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// Collection path, relative to the base URL. The trailing slash matters:
/// the API redirects `people?page=n` to `people/?page=n`.
pub const PEOPLE: &str = "people/";

pub const PAGE_QUERY: &str = "page";
