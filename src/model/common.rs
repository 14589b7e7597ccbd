use super::Block;
use crate::types::BlockId;

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCommon {
    pub id: BlockId,
    pub children: Vec<Block>,
    /// What the API reported; `children` stays empty until the subtree is fetched.
    pub has_children: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            children: Vec::new(),
            has_children: false,
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }
}
