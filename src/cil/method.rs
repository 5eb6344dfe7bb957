//! Method-level metadata and the bundled per-method input

use super::instruction::Instruction;
use super::regions::RegionTree;
use serde::Serialize;
use std::fmt;

/// A type reference by its fully qualified name.
///
/// No type model beyond the name is kept at this layer; type inference is an
/// explicit non-goal of the back end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeName(pub String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        TypeName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared local variable: name plus declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalVar {
    pub name: String,
    pub ty: TypeName,
}

/// Signature-level metadata for one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSignature {
    /// Method name, used only in diagnostics
    pub name: String,
    /// Ordered parameter names
    pub params: Vec<String>,
    /// Declared local variables
    pub locals: Vec<LocalVar>,
    /// Declared return type; `None` means the method returns no value
    pub return_type: Option<TypeName>,
}

impl MethodSignature {
    /// Whether the method's declared return type carries a value.
    pub fn returns_value(&self) -> bool {
        self.return_type.is_some()
    }
}

/// Everything this back end consumes for one method: the decoded instruction
/// stream, the structured region tree over it, and the signature metadata.
#[derive(Debug, Clone)]
pub struct MethodBody {
    pub signature: MethodSignature,
    pub instructions: Vec<Instruction>,
    pub regions: RegionTree,
}
