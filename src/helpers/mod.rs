pub mod url;

pub use url::{is_recordable_url, normalize_url};
