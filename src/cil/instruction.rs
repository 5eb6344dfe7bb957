//! Decoded CIL instructions and their operands
//!
//! Instructions arrive from the upstream decoder already typed; this module
//! is the shape of that contract. Control-transfer operands refer to their
//! target instruction by stream index rather than by pointer, so the whole
//! stream stays a flat arena with no ownership cycles.

use super::method::TypeName;
use serde::Serialize;
use std::fmt;

/// Index of an instruction within its method's instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InstructionId(pub usize);

/// Reference to a callee method, as carried by `call` operands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodRef {
    /// Fully qualified declaring type
    pub declaring_type: TypeName,
    /// Method name
    pub name: String,
    /// Whether the callee consumes a receiver as its first stack argument
    pub has_this: bool,
}

/// Operand of a decoded instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operand {
    /// No operand
    None,
    /// Integer constant (`ldc.i4`, `ldc.i8`)
    Int(i64),
    /// Floating-point constant (`ldc.r4`, `ldc.r8`)
    Float(f64),
    /// String constant (`ldstr`)
    Str(String),
    /// Type reference (`newarr`, `castclass`, ...)
    Type(TypeName),
    /// Reference to a local variable by declared name
    Local(String),
    /// Reference to a parameter by declared name
    Param(String),
    /// Reference to a callee method
    Method(MethodRef),
    /// Back-reference to the target instruction of a control transfer
    Target(InstructionId),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Int(v) => write!(f, "{}", v),
            Operand::Float(v) => write!(f, "{}", v),
            Operand::Str(s) => write!(f, "{:?}", s),
            Operand::Type(t) => write!(f, "{}", t),
            Operand::Local(name) | Operand::Param(name) => f.write_str(name),
            Operand::Method(m) => write!(f, "{}::{}", m.declaring_type, m.name),
            Operand::Target(id) => write!(f, "-> #{}", id.0),
        }
    }
}

/// One decoded CIL operation.
///
/// Immutable once decoded. The source offset doubles as the instruction's
/// stable identity and as the basis for synthesized temporary names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    /// Operation code
    pub opcode: super::OpCode,
    /// Operand, if any
    pub operand: Operand,
    /// Byte offset of this instruction in the original method body
    pub offset: u32,
    /// Number of stack values this instruction consumes
    pub pop_count: u8,
    /// Number of stack values this instruction produces
    pub push_count: u8,
}

impl Instruction {
    /// Human-readable description, used for degraded placeholder comments
    /// and diagnostics: `IL_000A: ldind.i4`.
    pub fn description(&self) -> String {
        if matches!(self.operand, Operand::None) {
            format!("IL_{:04X}: {}", self.offset, self.opcode)
        } else {
            format!("IL_{:04X}: {} {}", self.offset, self.opcode, self.operand)
        }
    }
}
