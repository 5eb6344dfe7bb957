//! Local, parameter and constant helper methods
//!
//! Stores consult the per-method local variable table: the first store to a
//! local emits its typed declaration, every later store a plain assignment.

use super::{expect_args, InstructionToStatementConverter, Lowered, StatementConversionError};
use crate::ast::statements::{Expression, Literal, Statement};
use crate::cil::{Instruction, OpCode, Operand};

/// Trait providing local/parameter/constant helper methods
pub trait VariableHelpers {
    /// Lower `ldarg` to a reference to the parameter's declared name.
    fn create_parameter_load(
        &mut self,
        instr: &Instruction,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `ldloc` to a reference to the local's declared name.
    fn create_local_load(
        &mut self,
        instr: &Instruction,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `ldc.*`, `ldstr` and `ldnull` to literal expressions.
    fn create_constant(
        &mut self,
        instr: &Instruction,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `stloc` to a declaration-with-initializer or an assignment.
    fn create_local_store(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError>;
}

impl<'a> VariableHelpers for InstructionToStatementConverter<'a> {
    fn create_parameter_load(
        &mut self,
        instr: &Instruction,
    ) -> Result<Lowered, StatementConversionError> {
        let Operand::Param(name) = &instr.operand else {
            return Err(StatementConversionError::InvalidOperand {
                instruction: instr.description(),
                message: "ldarg requires a parameter operand".into(),
            });
        };
        Ok(Lowered::Expr(Expression::ident(name.clone())))
    }

    fn create_local_load(
        &mut self,
        instr: &Instruction,
    ) -> Result<Lowered, StatementConversionError> {
        let Operand::Local(name) = &instr.operand else {
            return Err(StatementConversionError::InvalidOperand {
                instruction: instr.description(),
                message: "ldloc requires a local operand".into(),
            });
        };
        Ok(Lowered::Expr(Expression::ident(name.clone())))
    }

    fn create_constant(
        &mut self,
        instr: &Instruction,
    ) -> Result<Lowered, StatementConversionError> {
        let literal = match (&instr.opcode, &instr.operand) {
            (OpCode::Ldnull, _) => Literal::Null,
            (_, Operand::Int(v)) => Literal::Int(*v),
            (_, Operand::Float(v)) => Literal::Float(*v),
            (_, Operand::Str(s)) => Literal::Str(s.clone()),
            _ => {
                return Err(StatementConversionError::InvalidOperand {
                    instruction: instr.description(),
                    message: "constant load requires a constant operand".into(),
                })
            }
        };
        Ok(Lowered::Expr(Expression::Literal(literal)))
    }

    fn create_local_store(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        let Operand::Local(name) = &instr.operand else {
            return Err(StatementConversionError::InvalidOperand {
                instruction: instr.description(),
                message: "stloc requires a local operand".into(),
            });
        };
        let [value] = expect_args(instr, args)?;

        if self.locals.is_declared(name) {
            return Ok(Lowered::Expr(Expression::Assignment {
                target: Box::new(Expression::ident(name.clone())),
                value: Box::new(value),
            }));
        }

        let ty = self
            .locals
            .ty(name)
            .cloned()
            .ok_or_else(|| StatementConversionError::UnknownLocal(name.clone()))?;
        self.locals.mark_declared(name);
        Ok(Lowered::Stmt(Statement::LocalDeclaration {
            ty: Some(ty),
            name: name.clone(),
            init: value,
        }))
    }
}
