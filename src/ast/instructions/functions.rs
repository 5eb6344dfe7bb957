//! Call and return helper methods

use super::{InstructionToStatementConverter, Lowered, StatementConversionError};
use crate::ast::statements::{Expression, Statement};
use crate::cil::{Instruction, Operand};

/// Trait providing call and return helper methods
pub trait FunctionHelpers {
    /// Lower `call` to an invocation. Instance callees consume the first
    /// popped argument as the receiver; static callees are invoked on their
    /// declaring type.
    fn create_method_call(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `ret`, carrying the popped value unless the method is void.
    fn create_return(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError>;
}

impl<'a> FunctionHelpers for InstructionToStatementConverter<'a> {
    fn create_method_call(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        let Operand::Method(callee) = &instr.operand else {
            return Err(StatementConversionError::InvalidOperand {
                instruction: instr.description(),
                message: "call requires a method operand".into(),
            });
        };

        let mut args = args.into_iter();
        let target = if callee.has_this {
            let Some(receiver) = args.next() else {
                return Err(StatementConversionError::InvalidOperand {
                    instruction: instr.description(),
                    message: "instance call is missing its receiver argument".into(),
                });
            };
            Expression::member(receiver, callee.name.clone())
        } else {
            Expression::member(
                Expression::ident(callee.declaring_type.as_str()),
                callee.name.clone(),
            )
        };

        Ok(Lowered::Expr(Expression::Invocation {
            target: Box::new(target),
            args: args.collect(),
        }))
    }

    fn create_return(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        if !self.signature.returns_value() {
            return Ok(Lowered::Stmt(Statement::Return(None)));
        }
        let Some(value) = args.into_iter().next() else {
            return Err(StatementConversionError::InvalidOperand {
                instruction: instr.description(),
                message: "non-void return is missing its value argument".into(),
            });
        };
        Ok(Lowered::Stmt(Statement::Return(Some(value))))
    }
}
