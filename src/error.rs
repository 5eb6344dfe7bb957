use miette::Diagnostic;
use thiserror::Error;

/// Result type for decompiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal error types for the CIL method-body decompiler.
///
/// Every variant here indicates a contract violation by an upstream
/// collaborator (a malformed region tree, a dangling instruction reference)
/// and aborts processing of the current method. Per-expression degradation
/// for unsupported instructions is handled inside the materializer and never
/// surfaces as one of these.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("Control flow structuring failed: {message}")]
    #[diagnostic(code(cil_dec::structuring_error))]
    Structuring { message: String },

    #[error("AST generation failed: {message}")]
    #[diagnostic(code(cil_dec::ast_error))]
    Ast { message: String },

    #[error("Instruction reference {index} is outside the method's instruction stream")]
    #[diagnostic(code(cil_dec::invalid_instruction_ref))]
    InvalidInstructionRef { index: usize },

    #[error("Internal error: {message}")]
    #[diagnostic(code(cil_dec::internal_error))]
    Internal { message: String },
}

impl Error {
    /// Create a structuring error
    pub fn structuring(message: impl Into<String>) -> Self {
        Error::Structuring {
            message: message.into(),
        }
    }

    /// Create an AST generation error
    pub fn ast(message: impl Into<String>) -> Self {
        Error::Ast {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}
