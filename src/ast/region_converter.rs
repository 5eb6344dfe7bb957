//! Region-to-statement conversion
//!
//! The depth-first walk over a method's region tree. Blocks lower their
//! stack expressions through the instruction converter; Sequences become
//! nested scopes; Loops become condition-less loop wrappers whose exits are
//! the `break`/`goto` statements branch resolution emits inside the body.

use crate::ast::control_flow::resolve_branch;
use crate::ast::instructions::InstructionToStatementConverter;
use crate::ast::statements::Statement;
use crate::cil::{MethodBody, RegionId, RegionKind, RegionTree};
use crate::error::{Error, Result};

/// Walks a region tree and produces the method body's statement sequence.
pub struct RegionToStatementConverter<'a> {
    regions: &'a RegionTree,
    instruction_converter: InstructionToStatementConverter<'a>,
    /// Interleave diagnostic region-boundary comments into the output
    region_comments: bool,
}

impl<'a> RegionToStatementConverter<'a> {
    pub fn new(method: &'a MethodBody, region_comments: bool) -> Self {
        RegionToStatementConverter {
            regions: &method.regions,
            instruction_converter: InstructionToStatementConverter::new(method),
            region_comments,
        }
    }

    /// Lower the whole tree, starting at its root. An empty tree lowers to
    /// an empty statement sequence.
    pub fn convert_body(&mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        if let Some(root) = self.regions.root() {
            self.convert_region(root, &mut statements)?;
        }
        Ok(statements)
    }

    /// Lower one region, appending its statements to `out`.
    fn convert_region(&mut self, id: RegionId, out: &mut Vec<Statement>) -> Result<()> {
        let regions = self.regions;
        log::debug!("converting region {}", regions.label(id));

        if self.region_comments {
            out.push(Statement::Comment(regions.describe(id)));
        }
        out.push(Statement::Label(regions.label(id).to_string()));

        match regions.kind(id) {
            RegionKind::Block { body, fall_through } => {
                for expr in body {
                    out.push(self.instruction_converter.convert_expression(expr)?);
                }
                // A fall-through that is just the next region in textual
                // order needs no statement; anything else does.
                if let Some(target) = *fall_through {
                    if regions.next_sibling(id) != Some(target) {
                        out.push(resolve_branch(regions, id, target).into_statement());
                    }
                }
            }
            RegionKind::Sequence { children } => {
                let mut inner = Vec::new();
                for &child in children {
                    self.convert_region(child, &mut inner)?;
                }
                out.push(Statement::Block(inner));
            }
            RegionKind::Loop { body } => {
                let body = body.ok_or_else(|| {
                    Error::structuring(format!("loop '{}' has no body", regions.label(id)))
                })?;
                let mut inner = Vec::new();
                self.convert_region(body, &mut inner)?;
                out.push(Statement::Loop(inner));
            }
        }

        if self.region_comments {
            out.push(Statement::Comment(String::new()));
        }
        Ok(())
    }
}
