//! cil-dec-rs: Rust-based method-body decompiler back end for CIL bytecode
//!
//! This library is the final stage of a CIL decompiler pipeline: it turns a
//! structured region tree and its stack-expression graph for one method into
//! a readable target-language statement tree. Decoding, stack analysis and
//! control-flow structuring happen upstream; rendering happens downstream.

pub mod ast;
pub mod cil;
pub mod decompiler;
pub mod error;

pub use decompiler::{DecompileOptions, Decompiler};
pub use error::{Error as DecompilerError, Result as DecompilerResult};

// Re-export commonly used types
pub use ast::{BranchKind, Expression, Statement};
pub use cil::{Instruction, MethodBody, MethodSignature, OpCode, RegionTree, StackExpression};
