//! Main decompiler module
//!
//! Orchestrates per-method processing: one region walker and one instruction
//! converter per method, each owning a fresh local variable table, so
//! independent methods can be decompiled in parallel.

use crate::ast::{RegionToStatementConverter, Statement};
use crate::cil::MethodBody;
use crate::error::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Decompilation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompileOptions {
    /// Annotate each region's start and end with a diagnostic comment.
    /// Has no effect on the executable semantics of the output.
    pub region_comments: bool,
}

/// Main decompiler struct
#[derive(Debug, Clone, Default)]
pub struct Decompiler {
    options: DecompileOptions,
}

impl Decompiler {
    /// Create a decompiler with default options
    pub fn new() -> Self {
        Decompiler::default()
    }

    pub fn with_options(options: DecompileOptions) -> Self {
        Decompiler { options }
    }

    pub fn options(&self) -> &DecompileOptions {
        &self.options
    }

    /// Decompile a single method body into a block statement.
    pub fn decompile_method(&self, method: &MethodBody) -> Result<Statement> {
        log::debug!("decompiling method {}", method.signature.name);
        let mut converter =
            RegionToStatementConverter::new(method, self.options.region_comments);
        Ok(Statement::Block(converter.convert_body()?))
    }

    /// Decompile independent methods in parallel, preserving input order.
    pub fn decompile_all(&self, methods: &[MethodBody]) -> Result<Vec<Statement>> {
        methods
            .par_iter()
            .map(|method| self.decompile_method(method))
            .collect()
    }
}
