//! Branch resolution
//!
//! Classifies a control transfer between two regions as `continue`, `break`
//! or an unconditional jump. The structured forms are a readability
//! optimization; the label jump is the always-correct fallback.

use crate::ast::statements::Statement;
use crate::cil::{RegionId, RegionKind, RegionTree};

/// The structured form chosen for one control transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchKind {
    Continue,
    Break,
    Goto(String),
}

impl BranchKind {
    pub fn into_statement(self) -> Statement {
        match self {
            BranchKind::Continue => Statement::Continue,
            BranchKind::Break => Statement::Break,
            BranchKind::Goto(label) => Statement::Goto(label),
        }
    }
}

/// Hoist a branch target to the outermost ancestor it is the entry point of.
///
/// A transfer to the start of a region is equivalent to a transfer to the
/// start of its first child, so a jump to the top of a loop is recognized no
/// matter how deeply nested the loop's first statement is. Hoisting stops at
/// the first loop reached: climbing further would lose the landmark that
/// makes the transfer a `continue`.
fn normalize_target(tree: &RegionTree, mut target: RegionId) -> RegionId {
    while let Some(parent) = tree.parent(target) {
        if tree.is_loop(target) {
            break;
        }
        if tree.head_child(parent) == Some(target) {
            target = parent;
        } else {
            break;
        }
    }
    target
}

/// The loop a region is a direct body member of, if any.
///
/// A loop's body is a Sequence, so "directly inside the loop" means "direct
/// child of the loop's body Sequence".
fn enclosing_loop(tree: &RegionTree, source: RegionId) -> Option<RegionId> {
    let parent = tree.parent(source)?;
    match tree.kind(parent) {
        RegionKind::Loop { .. } => Some(parent),
        RegionKind::Sequence { .. } => {
            let grandparent = tree.parent(parent)?;
            match tree.kind(grandparent) {
                RegionKind::Loop { body } if *body == Some(parent) => Some(grandparent),
                _ => None,
            }
        }
        RegionKind::Block { .. } => None,
    }
}

/// Resolve the transfer from `source` to `target` into exactly one of
/// continue, break, or a labeled jump.
pub fn resolve_branch(tree: &RegionTree, source: RegionId, target: RegionId) -> BranchKind {
    let target = normalize_target(tree, target);

    if let Some(lp) = enclosing_loop(tree, source) {
        // Transfer to the start of the enclosing loop
        if target == lp {
            return BranchKind::Continue;
        }
        // Transfer to the region immediately following the enclosing loop
        if tree.next_sibling(lp) == Some(target) {
            return BranchKind::Break;
        }
    }
    BranchKind::Goto(tree.label(target).to_string())
}
