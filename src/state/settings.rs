//! Application settings with persistence.

use serde::{Deserialize, Serialize};

/// Start page used when nothing is configured.
pub const DEFAULT_START_PAGE: &str = "https://www.google.com";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Page opened by new windows and the Home action.
    #[serde(default = "default_start_page")]
    pub start_page: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { start_page: default_start_page() }
    }
}

fn default_start_page() -> String {
    DEFAULT_START_PAGE.to_string()
}
