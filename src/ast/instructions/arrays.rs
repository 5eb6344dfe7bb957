//! Array operation helper methods

use super::{expect_args, InstructionToStatementConverter, Lowered, StatementConversionError};
use crate::ast::statements::Expression;
use crate::cil::{Instruction, Operand};

/// Trait providing array operation helper methods
pub trait ArrayHelpers {
    /// Lower `newarr` to a rank-1 array creation sized by the popped length.
    fn create_array_creation(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `ldlen` to an `array.Length` member read.
    fn create_array_length(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `ldelem.*` / `ldelema` to an indexer read.
    fn create_element_load(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError>;

    /// Lower `stelem.*` to an indexer assignment.
    fn create_element_store(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError>;
}

impl<'a> ArrayHelpers for InstructionToStatementConverter<'a> {
    fn create_array_creation(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        let Operand::Type(element_type) = &instr.operand else {
            return Err(StatementConversionError::InvalidOperand {
                instruction: instr.description(),
                message: "newarr requires a type operand".into(),
            });
        };
        let [length] = expect_args(instr, args)?;
        Ok(Lowered::Expr(Expression::ArrayCreation {
            element_type: element_type.clone(),
            length: Box::new(length),
        }))
    }

    fn create_array_length(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        let [array] = expect_args(instr, args)?;
        Ok(Lowered::Expr(Expression::member(array, "Length")))
    }

    fn create_element_load(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        let [array, index] = expect_args(instr, args)?;
        Ok(Lowered::Expr(Expression::Indexer {
            target: Box::new(array),
            index: Box::new(index),
        }))
    }

    fn create_element_store(
        &mut self,
        instr: &Instruction,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        let [array, index, value] = expect_args(instr, args)?;
        Ok(Lowered::Expr(Expression::Assignment {
            target: Box::new(Expression::Indexer {
                target: Box::new(array),
                index: Box::new(index),
            }),
            value: Box::new(value),
        }))
    }
}
