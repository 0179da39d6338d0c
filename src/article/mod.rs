//! Article retrieval from Wikipedia.

mod extract;
mod fetch;
mod link;

pub use extract::{parse_extract, split_paragraphs};
pub use fetch::{DEFAULT_USER_AGENT, WikipediaClient};
pub use link::{language_from_url, url_to_title};
