//! Emptiness classification for blocks

use super::ContentNode;

const MEDIA_TAGS: [&str; 4] = ["img", "video", "audio", "iframe"];
const VOID_ATTRIBUTE: &str = "data-content-editable-void";
const INTERACTIVE_CLASSES: [&str; 2] = ["notion-to_do-block", "notion-toggle-block"];

/// A block is empty when it has no non-whitespace text of its own and
/// contains neither media nor a checkbox/toggle.
///
/// Text inside nested blocks belongs to those blocks and is not counted.
/// Media and interactive elements are searched among all descendants.
#[must_use]
pub fn is_block_empty(block: &ContentNode) -> bool {
    !has_own_text(block) && !has_media(block) && !has_interactive(block)
}

fn has_own_text(block: &ContentNode) -> bool {
    let mut stack: Vec<&ContentNode> = block.children().iter().collect();
    while let Some(node) = stack.pop() {
        match node {
            ContentNode::Text { text } => {
                if !text.trim_matches(is_blank).is_empty() {
                    return true;
                }
            }
            ContentNode::Element { children, .. } => {
                if node.block_id().is_none() {
                    stack.extend(children);
                }
            }
        }
    }
    false
}

/// Whitespace, plus the byte order mark editors leave behind
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn has_media(block: &ContentNode) -> bool {
    block.descendants().any(|node| {
        node.tag()
            .is_some_and(|tag| MEDIA_TAGS.iter().any(|media| tag.eq_ignore_ascii_case(media)))
            || node.has_attribute(VOID_ATTRIBUTE)
    })
}

fn has_interactive(block: &ContentNode) -> bool {
    block
        .descendants()
        .any(|node| INTERACTIVE_CLASSES.iter().any(|class| node.has_class(class)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BLOCK_ID_ATTRIBUTE;

    fn block(id: &str) -> ContentNode {
        ContentNode::element("div").with_attribute(BLOCK_ID_ATTRIBUTE, id)
    }

    #[test]
    fn block_with_text_is_not_empty() {
        let node = block("a").with_child(
            ContentNode::element("div")
                .with_child(ContentNode::element("span").with_child(ContentNode::text("Hello"))),
        );
        assert!(!is_block_empty(&node));
    }

    #[test]
    fn whitespace_only_is_empty() {
        let node = block("a")
            .with_child(ContentNode::text("  \n\t"))
            .with_child(ContentNode::text("\u{a0}"));
        assert!(is_block_empty(&node));
    }

    #[test]
    fn byte_order_mark_is_empty() {
        let node = block("a").with_child(ContentNode::text("\u{feff}"));
        assert!(is_block_empty(&node));

        let node = block("a").with_child(ContentNode::text("\u{feff}x"));
        assert!(!is_block_empty(&node));
    }

    #[test]
    fn no_children_is_empty() {
        assert!(is_block_empty(&block("a")));
    }

    #[test]
    fn nested_block_text_does_not_count() {
        let node = block("outer").with_child(block("inner").with_child(ContentNode::text("child")));
        assert!(is_block_empty(&node));
    }

    #[test]
    fn image_makes_block_non_empty() {
        let node = block("a").with_child(ContentNode::element("IMG"));
        assert!(!is_block_empty(&node));
    }

    #[test]
    fn void_content_makes_block_non_empty() {
        let node = block("a").with_child(
            ContentNode::element("div").with_attribute(VOID_ATTRIBUTE, "true"),
        );
        assert!(!is_block_empty(&node));
    }

    #[test]
    fn nested_todo_makes_block_non_empty() {
        let node = block("a").with_child(block("b").with_class("notion-to_do-block"));
        assert!(!is_block_empty(&node));
    }

    #[test]
    fn own_toggle_class_is_not_interactive_content() {
        let node = block("a").with_class("notion-toggle-block");
        assert!(is_block_empty(&node));
    }
}
