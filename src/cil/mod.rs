//! CIL data model
//!
//! The typed shapes this back end consumes from its upstream collaborators:
//! decoded instructions, stack expressions, the structured region tree, and
//! per-method signature metadata. Nothing in here decodes bytes or builds
//! graphs; that happens before this crate runs.

pub mod instruction;
pub mod method;
pub mod opcodes;
pub mod regions;
pub mod stack;

pub use instruction::{Instruction, InstructionId, MethodRef, Operand};
pub use method::{LocalVar, MethodBody, MethodSignature, TypeName};
pub use opcodes::OpCode;
pub use regions::{RegionId, RegionKind, RegionTree};
pub use stack::{StackExpression, StackSlot};
