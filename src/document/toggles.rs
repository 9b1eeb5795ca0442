//! Collapsed toggle detection

use std::collections::HashSet;

use regex::Regex;

use super::ContentNode;

const TOGGLE_CLASS: &str = "notion-toggle-block";

/// Ids of toggle blocks whose chevron is rotated closed
///
/// A toggle counts only if it has a `div[role="button"]` to click. It is
/// collapsed when the first `svg` inside it has an inline transform
/// mentioning `-90`. Each id is reported once.
#[must_use]
pub fn collapsed_toggles(root: &ContentNode) -> Vec<&str> {
    let mut seen = HashSet::new();
    std::iter::once(root)
        .chain(root.descendants())
        .filter(|node| node.has_class(TOGGLE_CLASS))
        .filter(|toggle| has_button(toggle) && is_collapsed(toggle))
        .filter_map(ContentNode::block_id)
        .filter(|&id| seen.insert(id))
        .collect()
}

fn has_button(toggle: &ContentNode) -> bool {
    toggle
        .descendants()
        .any(|node| node.tag() == Some("div") && node.attribute("role") == Some("button"))
}

fn is_collapsed(toggle: &ContentNode) -> bool {
    toggle
        .descendants()
        .find(|node| node.tag() == Some("svg"))
        .and_then(|svg| svg.attribute("style"))
        .and_then(inline_transform)
        .is_some_and(|transform| transform.contains("-90"))
}

/// Value of the `transform` declaration in an inline style
fn inline_transform(style: &str) -> Option<&str> {
    let re = Regex::new(r"(?:^|;)\s*transform\s*:\s*([^;]+)").ok()?;
    re.captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}
