//! Composition of blocks into a single HCL document.

use std::fmt;

use crate::structure::Block;

/// Anything that contributes zero or more top-level blocks.
///
/// `Option<Block>` lets callers pass `None` for a block they decided not to
/// build; it is dropped silently.
pub trait IntoBlocks {
    fn into_blocks(self) -> Vec<Block>;
}

impl IntoBlocks for Block {
    fn into_blocks(self) -> Vec<Block> {
        vec![self]
    }
}

impl IntoBlocks for Option<Block> {
    fn into_blocks(self) -> Vec<Block> {
        self.into_iter().collect()
    }
}

impl IntoBlocks for Vec<Block> {
    fn into_blocks(self) -> Vec<Block> {
        self
    }
}

/// Concatenate block groups in order, dropping absent ones.
pub fn combine<I, B>(parts: I) -> Vec<Block>
where
    I: IntoIterator<Item = B>,
    B: IntoBlocks,
{
    parts.into_iter().flat_map(IntoBlocks::into_blocks).collect()
}

/// Render blocks separated by one blank line.
pub fn render(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// An ordered list of top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append blocks, skipping `None`.
    pub fn add(mut self, blocks: impl IntoBlocks) -> Self {
        self.push(blocks);
        self
    }

    pub fn push(&mut self, blocks: impl IntoBlocks) {
        self.blocks.extend(blocks.into_blocks());
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn render(&self) -> String {
        render(&self.blocks)
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Provider;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_combine_drops_none() {
        let google = Provider::new("google").to_block().unwrap();
        let blocks = combine(vec![Some(google.clone()), None, Some(google)]);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_render_separates_with_blank_line() {
        let document = Document::new()
            .add(Provider::new("google").to_block().unwrap())
            .add(None::<Block>)
            .add(vec![Provider::new("lacework").to_block().unwrap()]);

        assert_eq!(document.render(), "provider \"google\" {}\n\nprovider \"lacework\" {}\n");
        assert_eq!(document.render(), document.to_string());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Document::new().render(), "");
    }
}
