//! Page identity helpers

/// Identifier of a page derived from its URL path: the last `-` separated
/// segment, which for Notion is the page's hex id
#[must_use]
pub fn derive_page_id(path: &str) -> String {
    path.rsplit('-').next().unwrap_or_default().to_string()
}

/// Whether a URL points at a Notion workspace or a published Notion site
#[must_use]
pub fn is_notion_page(url: &str) -> bool {
    url.contains("notion.so") || url.contains("notion.site")
}
