//! Stack expressions
//!
//! The upstream stack analyzer groups producer and consumer instructions into
//! expression trees and eliminates duplicate stack traffic before this back
//! end runs. What arrives here is a `StackExpression` per surviving consumer:
//! the instruction itself, the nested expressions that feed its stack
//! arguments directly, and the identities of values it pops from the logical
//! stack that were materialized earlier as named temporaries.

use super::instruction::InstructionId;
use serde::Serialize;

/// A logical stack cell at one point in the instruction stream, tagged with
/// the instruction that populated it. Used only to resolve which instruction
/// produced a consumed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackSlot {
    /// Instruction that pushed this value
    pub allocated_by: InstructionId,
}

/// A materialization-ready expression tree over the stack machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackExpression {
    /// The consuming instruction at the root of this expression
    pub instruction: InstructionId,
    /// Producers of the values this expression pops from the logical stack.
    /// Each was materialized upstream as a named temporary; the materializer
    /// refers to them by name and must not duplicate their side effects.
    pub stack_inputs: Vec<StackSlot>,
    /// Nested expressions feeding the remaining stack arguments, in
    /// evaluation order
    pub args: Vec<StackExpression>,
    /// Number of stack values the rooted instruction consumes
    pub pop_count: u8,
    /// Number of stack values the rooted instruction produces
    pub push_count: u8,
    /// Whether this expression must be parenthesized when inlined into a
    /// parent, to preserve operator precedence in the surface syntax
    pub parenthesized: bool,
}

impl StackExpression {
    /// A plain expression with no stack inputs and no nested arguments.
    pub fn leaf(instruction: InstructionId, pop_count: u8, push_count: u8) -> Self {
        StackExpression {
            instruction,
            stack_inputs: Vec::new(),
            args: Vec::new(),
            pop_count,
            push_count,
            parenthesized: false,
        }
    }

    /// An expression whose stack arguments are supplied by nested expressions.
    pub fn with_args(
        instruction: InstructionId,
        args: Vec<StackExpression>,
        pop_count: u8,
        push_count: u8,
    ) -> Self {
        StackExpression {
            instruction,
            stack_inputs: Vec::new(),
            args,
            pop_count,
            push_count,
            parenthesized: false,
        }
    }

    /// Mark this expression as requiring parentheses when inlined.
    pub fn parenthesized(mut self) -> Self {
        self.parenthesized = true;
        self
    }

    /// Iterate over this expression and all nested argument expressions.
    pub fn iter(&self) -> impl Iterator<Item = &StackExpression> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let expr = stack.pop()?;
            stack.extend(expr.args.iter());
            Some(expr)
        })
    }
}
