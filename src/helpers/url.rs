//! URL helpers shared by the address bar, settings, and history recording.

/// Normalize user-entered address input into a fetchable URL.
///
/// Input that already carries an `http://` or `https://` scheme (any case) is
/// returned as typed; anything else is treated as a host or path and gets an
/// `https://` prefix.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if has_web_scheme(trimmed) { trimmed.to_string() } else { format!("https://{trimmed}") }
}

/// Whether a navigation should be recorded to history.
///
/// Blank urls and internal `about:` pages are never recorded.
pub fn is_recordable_url(url: &str) -> bool {
    !url.is_empty() && !url.starts_with("about:")
}

fn has_web_scheme(input: &str) -> bool {
    let has_prefix = |prefix: &str| {
        input.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    has_prefix("http://") || has_prefix("https://")
}
