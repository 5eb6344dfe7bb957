//! Branch instruction helper methods
//!
//! Conditional branches lower to an `if` guarding the resolved transfer; the
//! fall-through path stays unguarded, so no `else` is ever synthesized.

use super::{expect_args, InstructionToStatementConverter, Lowered, StatementConversionError};
use crate::ast::control_flow::resolve_branch;
use crate::ast::statements::{BinaryOp, Expression, Statement, UnaryOp};
use crate::cil::{InstructionId, Operand};

/// Trait providing branch lowering helper methods
pub trait JumpHelpers {
    /// Lower `br` to the resolved transfer statement.
    fn create_unconditional_branch(
        &mut self,
        id: InstructionId,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `brtrue`/`brfalse` to `if (cond) <transfer>`.
    fn create_truthiness_branch(
        &mut self,
        id: InstructionId,
        args: Vec<Expression>,
        negate: bool,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower a relational branch to `if (lhs op rhs) <transfer>`.
    fn create_comparison_branch(
        &mut self,
        id: InstructionId,
        args: Vec<Expression>,
        op: BinaryOp,
    ) -> Result<Lowered, StatementConversionError>;
}

impl<'a> InstructionToStatementConverter<'a> {
    /// Resolve the transfer for a branch instruction: from the block
    /// containing the branch to the block containing the target instruction.
    fn branch_statement(
        &self,
        id: InstructionId,
    ) -> Result<Statement, StatementConversionError> {
        let instr = self.instruction(id)?;
        let Operand::Target(target_id) = instr.operand else {
            return Err(StatementConversionError::InvalidOperand {
                instruction: instr.description(),
                message: "branch requires an instruction target operand".into(),
            });
        };
        // The operand must be a decoded instruction of this method
        self.instruction(target_id)?;

        let source = self.regions.block_containing(id).ok_or_else(|| {
            StatementConversionError::DanglingBranchTarget {
                instruction: instr.description(),
            }
        })?;
        let target = self.regions.block_containing(target_id).ok_or_else(|| {
            StatementConversionError::DanglingBranchTarget {
                instruction: instr.description(),
            }
        })?;

        Ok(resolve_branch(self.regions, source, target).into_statement())
    }
}

impl<'a> JumpHelpers for InstructionToStatementConverter<'a> {
    fn create_unconditional_branch(
        &mut self,
        id: InstructionId,
    ) -> Result<Lowered, StatementConversionError> {
        Ok(Lowered::Stmt(self.branch_statement(id)?))
    }

    fn create_truthiness_branch(
        &mut self,
        id: InstructionId,
        args: Vec<Expression>,
        negate: bool,
    ) -> Result<Lowered, StatementConversionError> {
        let transfer = self.branch_statement(id)?;
        let instr = self.instruction(id)?;
        let [operand] = expect_args(instr, args)?;
        let condition = if negate {
            Expression::unary(UnaryOp::Not, operand)
        } else {
            operand
        };
        Ok(Lowered::Stmt(Statement::If {
            condition,
            then: Box::new(transfer),
        }))
    }

    fn create_comparison_branch(
        &mut self,
        id: InstructionId,
        args: Vec<Expression>,
        op: BinaryOp,
    ) -> Result<Lowered, StatementConversionError> {
        let transfer = self.branch_statement(id)?;
        let instr = self.instruction(id)?;
        let [lhs, rhs] = expect_args(instr, args)?;
        Ok(Lowered::Stmt(Statement::If {
            condition: Expression::binary(lhs, op, rhs),
            then: Box::new(transfer),
        }))
    }
}
