//! Per-method local variable tracking
//!
//! One table per method, owned by that method's converter. The table decides
//! whether a store becomes a typed declaration-with-initializer (first store
//! in program order) or a plain assignment (every later store). Keeping the
//! table per-method instead of process-wide is what makes independent
//! methods safe to process in parallel.

use crate::cil::{MethodSignature, TypeName};
use std::collections::{HashMap, HashSet};

/// Declared types and declaration state for one method's locals.
#[derive(Debug, Clone, Default)]
pub struct LocalVariableTable {
    types: HashMap<String, TypeName>,
    declared: HashSet<String>,
}

impl LocalVariableTable {
    /// Seed the table from a method signature. Nothing is marked declared
    /// yet; declarations are emitted lazily at each local's first store.
    pub fn from_signature(signature: &MethodSignature) -> Self {
        let types = signature
            .locals
            .iter()
            .map(|local| (local.name.clone(), local.ty.clone()))
            .collect();
        LocalVariableTable {
            types,
            declared: HashSet::new(),
        }
    }

    /// Declared type of a local, if the signature declares it.
    pub fn ty(&self, name: &str) -> Option<&TypeName> {
        self.types.get(name)
    }

    /// Whether a declaration statement has already been emitted for `name`.
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Mark `name` declared. Returns false if it already was, so a caller
    /// can detect a double declaration.
    pub fn mark_declared(&mut self, name: &str) -> bool {
        self.declared.insert(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cil::LocalVar;

    fn signature() -> MethodSignature {
        MethodSignature {
            name: "Sum".into(),
            params: vec!["values".into()],
            locals: vec![
                LocalVar {
                    name: "total".into(),
                    ty: TypeName::new("System.Int32"),
                },
                LocalVar {
                    name: "i".into(),
                    ty: TypeName::new("System.Int32"),
                },
            ],
            return_type: Some(TypeName::new("System.Int32")),
        }
    }

    #[test]
    fn first_store_declares_later_stores_assign() {
        let mut table = LocalVariableTable::from_signature(&signature());
        assert!(!table.is_declared("total"));
        assert!(table.mark_declared("total"));
        assert!(table.is_declared("total"));
        assert!(!table.mark_declared("total"));
        assert!(!table.is_declared("i"));
    }

    #[test]
    fn unknown_locals_have_no_type() {
        let table = LocalVariableTable::from_signature(&signature());
        assert_eq!(table.ty("total"), Some(&TypeName::new("System.Int32")));
        assert_eq!(table.ty("missing"), None);
    }
}
