//! Abstract Syntax Tree (AST) module
//!
//! Statement and expression primitives for the target surface language plus
//! the machinery that produces them. The module is organized into sub-modules
//! by functionality:
//!
//! - `statements`: the closed target statement/expression trees
//! - `control_flow`: branch resolution (continue/break/goto classification)
//! - `instructions`: stack-expression materialization and opcode semantics
//! - `region_converter`: the depth-first region tree walk
//! - `variables`: per-method local variable tracking

pub mod control_flow;
pub mod instructions;
pub mod region_converter;
pub mod statements;
pub mod variables;

// Re-export the main types for public API
pub use control_flow::{resolve_branch, BranchKind};
pub use instructions::{InstructionToStatementConverter, Lowered, StatementConversionError};
pub use region_converter::RegionToStatementConverter;
pub use statements::{BinaryOp, Expression, Literal, Statement, UnaryOp};
pub use variables::LocalVariableTable;
