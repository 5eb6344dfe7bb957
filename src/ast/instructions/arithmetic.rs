//! Arithmetic, comparison and conversion helper methods
//!
//! Helper methods for lowering the operator-shaped portion of the opcode
//! set. Used by the main instruction dispatch.

use super::{expect_args, InstructionToStatementConverter, Lowered, StatementConversionError};
use crate::ast::statements::{BinaryOp, Expression, Literal, UnaryOp};
use crate::cil::{Instruction, TypeName};

/// Trait providing arithmetic operation helper methods
pub trait ArithmeticHelpers {
    /// Lower a two-argument instruction to `lhs op rhs`.
    fn create_binary_operation(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
        op: BinaryOp,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower a one-argument instruction to `op operand`.
    fn create_unary_operation(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
        op: UnaryOp,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `ceq`, coercing the second operand to a boolean shape.
    fn create_equality_comparison(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower a numeric conversion to a cast to the named fixed-width type.
    fn create_conversion(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
        target_type: &str,
    ) -> Result<Lowered, StatementConversionError>;
}

/// Rewrite an integer operand into an idiomatic boolean test:
/// `x` becomes `(x != 0)`.
fn convert_int_to_bool(operand: Expression) -> Expression {
    Expression::paren(Expression::binary(
        operand,
        BinaryOp::Ne,
        Expression::Literal(Literal::Int(0)),
    ))
}

impl<'a> ArithmeticHelpers for InstructionToStatementConverter<'a> {
    fn create_binary_operation(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
        op: BinaryOp,
    ) -> Result<Lowered, StatementConversionError> {
        let [lhs, rhs] = expect_args(instr, args)?;
        Ok(Lowered::Expr(Expression::binary(lhs, op, rhs)))
    }

    fn create_unary_operation(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
        op: UnaryOp,
    ) -> Result<Lowered, StatementConversionError> {
        let [operand] = expect_args(instr, args)?;
        Ok(Lowered::Expr(Expression::unary(op, operand)))
    }

    fn create_equality_comparison(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        let [lhs, rhs] = expect_args(instr, args)?;
        Ok(Lowered::Expr(Expression::binary(
            lhs,
            BinaryOp::Eq,
            convert_int_to_bool(rhs),
        )))
    }

    fn create_conversion(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
        target_type: &str,
    ) -> Result<Lowered, StatementConversionError> {
        let [operand] = expect_args(instr, args)?;
        Ok(Lowered::Expr(Expression::Cast {
            ty: TypeName::new(target_type),
            operand: Box::new(operand),
        }))
    }
}
