//! Structured control-flow regions
//!
//! The upstream structurer turns a method's control-flow graph into a tree of
//! regions: leaf blocks of stack expressions, acyclic sequences, and natural
//! loops. The tree is stored as an arena; regions refer to each other through
//! `RegionId` handles, so parents can be walked without ownership cycles.
//!
//! `RegionId`s are minted only by `RegionTree`, which keeps handle-based
//! indexing safe as long as handles are not mixed between trees.

use super::instruction::InstructionId;
use super::stack::StackExpression;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Handle to a region within its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegionId(usize);

/// The closed set of region variants.
#[derive(Debug, Clone, Serialize)]
pub enum RegionKind {
    /// Straight-line block of stack expressions with an optional explicit
    /// fall-through successor
    Block {
        body: Vec<StackExpression>,
        fall_through: Option<RegionId>,
    },
    /// Acyclic group of child regions executed in order
    Sequence { children: Vec<RegionId> },
    /// Single-entry single-exit natural loop; the body, once attached, is a
    /// Sequence
    Loop { body: Option<RegionId> },
}

#[derive(Debug, Clone, Serialize)]
struct Region {
    label: String,
    parent: Option<RegionId>,
    kind: RegionKind,
}

/// Arena-backed region tree for one method.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionTree {
    regions: Vec<Region>,
    root: Option<RegionId>,
    /// Maps each instruction to the block whose expressions contain it, for
    /// branch-target resolution
    block_index: HashMap<InstructionId, RegionId>,
}

impl RegionTree {
    pub fn new() -> Self {
        RegionTree::default()
    }

    fn push(&mut self, label: impl Into<String>, parent: Option<RegionId>, kind: RegionKind) -> RegionId {
        let id = RegionId(self.regions.len());
        self.regions.push(Region {
            label: label.into(),
            parent,
            kind,
        });
        if parent.is_none() && self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    fn attach(&mut self, parent: Option<RegionId>, child: RegionId) -> Result<()> {
        let Some(parent) = parent else {
            return Ok(());
        };
        let label = self.regions[parent.0].label.clone();
        match &mut self.regions[parent.0].kind {
            RegionKind::Sequence { children } => {
                children.push(child);
                Ok(())
            }
            RegionKind::Loop { body } => {
                if body.is_some() {
                    return Err(Error::structuring(format!(
                        "loop '{}' already has a body",
                        label
                    )));
                }
                *body = Some(child);
                Ok(())
            }
            RegionKind::Block { .. } => Err(Error::structuring(format!(
                "block '{}' cannot contain nested regions",
                label
            ))),
        }
    }

    /// Add a Sequence region under `parent` (or as the root).
    pub fn add_sequence(
        &mut self,
        parent: Option<RegionId>,
        label: impl Into<String>,
    ) -> Result<RegionId> {
        let id = self.push(label, parent, RegionKind::Sequence { children: Vec::new() });
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Add a Loop region under `parent` (or as the root). Its body Sequence
    /// is attached by a subsequent `add_sequence` with this loop as parent.
    pub fn add_loop(
        &mut self,
        parent: Option<RegionId>,
        label: impl Into<String>,
    ) -> Result<RegionId> {
        let id = self.push(label, parent, RegionKind::Loop { body: None });
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Add a leaf Block region holding `body` expressions, indexing every
    /// instruction the expressions contain for branch-target lookups.
    pub fn add_block(
        &mut self,
        parent: Option<RegionId>,
        label: impl Into<String>,
        body: Vec<StackExpression>,
    ) -> Result<RegionId> {
        let id = self.push(
            label,
            parent,
            RegionKind::Block {
                body: Vec::new(),
                fall_through: None,
            },
        );
        self.attach(parent, id)?;
        for expr in &body {
            for nested in expr.iter() {
                self.block_index.insert(nested.instruction, id);
            }
        }
        if let RegionKind::Block { body: slot, .. } = &mut self.regions[id.0].kind {
            *slot = body;
        }
        Ok(id)
    }

    /// Record a block's explicit fall-through successor.
    pub fn set_fall_through(&mut self, block: RegionId, target: RegionId) -> Result<()> {
        let label = self.regions[block.0].label.clone();
        match &mut self.regions[block.0].kind {
            RegionKind::Block { fall_through, .. } => {
                *fall_through = Some(target);
                Ok(())
            }
            _ => Err(Error::structuring(format!(
                "region '{}' is not a block and has no fall-through edge",
                label
            ))),
        }
    }

    /// Root region, if any region has been added.
    pub fn root(&self) -> Option<RegionId> {
        self.root
    }

    pub fn label(&self, id: RegionId) -> &str {
        &self.regions[id.0].label
    }

    pub fn kind(&self, id: RegionId) -> &RegionKind {
        &self.regions[id.0].kind
    }

    pub fn parent(&self, id: RegionId) -> Option<RegionId> {
        self.regions[id.0].parent
    }

    pub fn is_loop(&self, id: RegionId) -> bool {
        matches!(self.regions[id.0].kind, RegionKind::Loop { .. })
    }

    /// First child in execution order: a Sequence's first child, a Loop's
    /// body, nothing for a Block.
    pub fn head_child(&self, id: RegionId) -> Option<RegionId> {
        match &self.regions[id.0].kind {
            RegionKind::Sequence { children } => children.first().copied(),
            RegionKind::Loop { body } => *body,
            RegionKind::Block { .. } => None,
        }
    }

    /// The region textually following `id` at the same nesting level, if any.
    pub fn next_sibling(&self, id: RegionId) -> Option<RegionId> {
        let parent = self.regions[id.0].parent?;
        match &self.regions[parent.0].kind {
            RegionKind::Sequence { children } => {
                let pos = children.iter().position(|&c| c == id)?;
                children.get(pos + 1).copied()
            }
            _ => None,
        }
    }

    /// The Block whose expressions contain `instruction`, if any.
    pub fn block_containing(&self, instruction: InstructionId) -> Option<RegionId> {
        self.block_index.get(&instruction).copied()
    }

    /// Diagnostic one-line summary of a region, for region-boundary comments.
    pub fn describe(&self, id: RegionId) -> String {
        let region = &self.regions[id.0];
        match &region.kind {
            RegionKind::Block { body, .. } => {
                format!("Block {} ({} expressions)", region.label, body.len())
            }
            RegionKind::Sequence { children } => {
                format!("Sequence {} ({} children)", region.label, children.len())
            }
            RegionKind::Loop { .. } => format!("Loop {}", region.label),
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cil::StackExpression;

    #[test]
    fn sequence_children_keep_textual_order() {
        let mut tree = RegionTree::new();
        let root = tree.add_sequence(None, "Body").unwrap();
        let a = tree.add_block(Some(root), "A", vec![]).unwrap();
        let b = tree.add_block(Some(root), "B", vec![]).unwrap();
        let c = tree.add_block(Some(root), "C", vec![]).unwrap();

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.head_child(root), Some(a));
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.next_sibling(b), Some(c));
        assert_eq!(tree.next_sibling(c), None);
        assert_eq!(tree.parent(b), Some(root));
    }

    #[test]
    fn loop_body_is_its_head_child() {
        let mut tree = RegionTree::new();
        let root = tree.add_sequence(None, "Body").unwrap();
        let lp = tree.add_loop(Some(root), "Loop_1").unwrap();
        let body = tree.add_sequence(Some(lp), "Loop_1_Body").unwrap();

        assert_eq!(tree.head_child(lp), Some(body));
        assert!(tree.is_loop(lp));
        assert_eq!(tree.next_sibling(body), None);
    }

    #[test]
    fn attaching_a_second_loop_body_fails() {
        let mut tree = RegionTree::new();
        let lp = tree.add_loop(None, "Loop_1").unwrap();
        tree.add_sequence(Some(lp), "Body_A").unwrap();
        assert!(tree.add_sequence(Some(lp), "Body_B").is_err());
    }

    #[test]
    fn block_index_covers_nested_expressions() {
        use crate::cil::InstructionId;
        let mut tree = RegionTree::new();
        let nested = StackExpression::leaf(InstructionId(0), 0, 1);
        let root_expr = StackExpression::with_args(InstructionId(1), vec![nested], 0, 1);
        let block = tree.add_block(None, "A", vec![root_expr]).unwrap();

        assert_eq!(tree.block_containing(InstructionId(0)), Some(block));
        assert_eq!(tree.block_containing(InstructionId(1)), Some(block));
        assert_eq!(tree.block_containing(InstructionId(9)), None);
    }
}
