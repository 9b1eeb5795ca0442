//! Block enumeration

use std::collections::HashSet;

use super::{CONTENT_REGION_CLASS, ContentNode, emptiness::is_block_empty};

/// A content block, identified by its `data-block-id` and its position
/// among the page's unique blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: String,
    pub index: usize,
}

/// Where the state machine gets its blocks from
pub trait BlockSource {
    /// Unique blocks in document order, or `None` when the page has no
    /// content region
    fn list_blocks(&self) -> Option<Vec<Block>>;

    /// Whether the block carries no visible content of its own
    fn is_empty(&self, block: &Block) -> bool;
}

/// Find the page's content region
#[must_use]
pub fn content_region(root: &ContentNode) -> Option<&ContentNode> {
    std::iter::once(root)
        .chain(root.descendants())
        .find(|node| node.has_class(CONTENT_REGION_CLASS))
}

/// Block elements below `region`, deduplicated by id (first occurrence wins)
#[must_use]
pub fn block_elements(region: &ContentNode) -> Vec<&ContentNode> {
    let mut seen = HashSet::new();
    region
        .descendants()
        .filter(|&node| node.block_id().is_some_and(|id| seen.insert(id)))
        .collect()
}

/// [`BlockSource`] over a content tree snapshot
pub struct ContentTree<'a> {
    blocks: Option<Vec<&'a ContentNode>>,
}

impl<'a> ContentTree<'a> {
    #[must_use]
    pub fn new(root: &'a ContentNode) -> Self {
        Self {
            blocks: content_region(root).map(block_elements),
        }
    }

    /// The element behind a block
    #[must_use]
    pub fn block_node(&self, block: &Block) -> Option<&'a ContentNode> {
        self.blocks.as_ref()?.get(block.index).copied()
    }
}

impl BlockSource for ContentTree<'_> {
    fn list_blocks(&self) -> Option<Vec<Block>> {
        let nodes = self.blocks.as_ref()?;
        Some(
            nodes
                .iter()
                .enumerate()
                .filter_map(|(index, node)| {
                    node.block_id().map(|id| Block {
                        id: id.to_string(),
                        index,
                    })
                })
                .collect(),
        )
    }

    fn is_empty(&self, block: &Block) -> bool {
        self.block_node(block).is_none_or(is_block_empty)
    }
}

/// Blocks of a page together with their emptiness, captured once per
/// command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockList {
    blocks: Vec<Block>,
    empty: Vec<bool>,
}

impl BlockList {
    /// Snapshot a source. `None` when it has no content region.
    pub fn collect<S: BlockSource + ?Sized>(source: &S) -> Option<Self> {
        let blocks = source.list_blocks()?;
        let empty = blocks.iter().map(|block| source.is_empty(block)).collect();
        Some(Self { blocks, empty })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Emptiness flag per block, in order
    #[must_use]
    pub fn empty_flags(&self) -> &[bool] {
        &self.empty
    }

    /// Whether the block at `index` is empty. Out of range counts as empty.
    #[must_use]
    pub fn is_empty_at(&self, index: usize) -> bool {
        self.empty.get(index).copied().unwrap_or(true)
    }
}
