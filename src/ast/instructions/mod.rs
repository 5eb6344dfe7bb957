//! Instruction-to-statement conversion
//!
//! The Expression Materializer and the opcode semantics table. The converter
//! recursively lowers a `StackExpression` into the target tree: stack inputs
//! become references to the named temporaries materialized upstream, nested
//! argument expressions are lowered first, and the rooted instruction is then
//! dispatched through one exhaustive match over the opcode set.
//!
//! Failure is split in two. `StatementConversionError::Unsupported` is the
//! recoverable per-expression outcome for the large set of instructions this
//! layer defines no lowering for; it is caught at `convert_expression` and
//! degrades to a placeholder comment. Every other variant is an upstream
//! contract violation and aborts the method.

use crate::ast::statements::{BinaryOp, Expression, Statement, UnaryOp};
use crate::ast::variables::LocalVariableTable;
use crate::cil::{
    Instruction, InstructionId, MethodBody, MethodSignature, OpCode, RegionTree, StackExpression,
};
use crate::error::Error;

mod arithmetic;
mod arrays;
mod functions;
mod jump;
mod variables;

use arithmetic::ArithmeticHelpers;
use arrays::ArrayHelpers;
use functions::FunctionHelpers;
use jump::JumpHelpers;
use variables::VariableHelpers;

/// Error types for instruction-to-statement conversion
#[derive(Debug, thiserror::Error)]
pub enum StatementConversionError {
    /// The one recoverable failure: no lowering is defined for the
    /// instruction. Carries the instruction description for the placeholder.
    #[error("Unsupported instruction: {0}")]
    Unsupported(String),
    #[error("Invalid operand for {instruction}: {message}")]
    InvalidOperand {
        instruction: String,
        message: String,
    },
    #[error("Instruction reference #{0} is outside the method body")]
    InvalidInstructionRef(usize),
    #[error("Branch in {instruction} targets an instruction outside any block")]
    DanglingBranchTarget { instruction: String },
    #[error("Nested argument of {instruction} lowered to a statement, not an expression")]
    NestedStatement { instruction: String },
    #[error("Store to local '{0}' which the method signature does not declare")]
    UnknownLocal(String),
}

/// Result of lowering one instruction: some instructions are inherently
/// statements (stores, returns, branches), the rest are expressions.
#[derive(Debug)]
pub enum Lowered {
    Expr(Expression),
    Stmt(Statement),
}

/// Lowers stack expressions for one method.
///
/// Owns the method's local variable table; borrows the rest. One converter
/// per method, never shared, so independent methods can run in parallel.
pub struct InstructionToStatementConverter<'a> {
    signature: &'a MethodSignature,
    instructions: &'a [Instruction],
    regions: &'a RegionTree,
    locals: LocalVariableTable,
}

impl<'a> InstructionToStatementConverter<'a> {
    pub fn new(method: &'a MethodBody) -> Self {
        InstructionToStatementConverter {
            signature: &method.signature,
            instructions: &method.instructions,
            regions: &method.regions,
            locals: LocalVariableTable::from_signature(&method.signature),
        }
    }

    /// Resolve an instruction back-reference against the method stream.
    fn instruction(
        &self,
        id: InstructionId,
    ) -> Result<&'a Instruction, StatementConversionError> {
        self.instructions
            .get(id.0)
            .ok_or(StatementConversionError::InvalidInstructionRef(id.0))
    }

    /// Deterministic name of the temporary holding an instruction's pushed
    /// value, derived from its source offset.
    fn temp_name(offset: u32) -> String {
        format!("expr{:02X}", offset)
    }

    /// Materializer boundary: lower one top-level stack expression into a
    /// statement, degrading unsupported instructions to placeholder comments.
    pub fn convert_expression(&mut self, expr: &StackExpression) -> crate::error::Result<Statement> {
        let instr = self
            .instruction(expr.instruction)
            .map_err(Self::fatal)?;
        log::debug!("converting {}", instr.description());

        match self.materialize(expr) {
            Ok(Lowered::Stmt(stmt)) => Ok(stmt),
            Ok(Lowered::Expr(init)) => {
                if expr.push_count == 1 {
                    // Named temporary so later consumers can refer to the
                    // pushed value by a stable name.
                    Ok(Statement::LocalDeclaration {
                        ty: None,
                        name: Self::temp_name(instr.offset),
                        init,
                    })
                } else {
                    Ok(Statement::Expression(init))
                }
            }
            Err(StatementConversionError::Unsupported(description)) => {
                log::warn!("no lowering for {}, emitting placeholder", description);
                Ok(Statement::Comment(description))
            }
            Err(err) => Err(Self::fatal(err)),
        }
    }

    fn fatal(err: StatementConversionError) -> Error {
        match err {
            StatementConversionError::InvalidInstructionRef(index) => {
                Error::InvalidInstructionRef { index }
            }
            other => Error::ast(other.to_string()),
        }
    }

    /// Recursively lower a stack expression: assemble the argument list from
    /// stack inputs and nested expressions, then dispatch on the opcode.
    fn materialize(
        &mut self,
        expr: &StackExpression,
    ) -> Result<Lowered, StatementConversionError> {
        let mut args = Vec::with_capacity(expr.stack_inputs.len() + expr.args.len());

        // Values popped from the logical stack were materialized upstream as
        // named temporaries; refer to them by name, never re-evaluate.
        for slot in &expr.stack_inputs {
            let producer = self.instruction(slot.allocated_by)?;
            args.push(Expression::Identifier(Self::temp_name(producer.offset)));
        }

        // Nested argument expressions are lowered in place, parenthesized
        // where the upstream analyzer flagged a precedence boundary.
        for nested in &expr.args {
            let lowered = match self.materialize(nested)? {
                Lowered::Expr(e) => e,
                Lowered::Stmt(_) => {
                    let instr = self.instruction(expr.instruction)?;
                    return Err(StatementConversionError::NestedStatement {
                        instruction: instr.description(),
                    });
                }
            };
            if nested.parenthesized {
                args.push(Expression::paren(lowered));
            } else {
                args.push(lowered);
            }
        }

        self.lower_instruction(expr.instruction, args)
    }

    /// The opcode semantics table: a total mapping from one instruction plus
    /// its materialized arguments to a lowered form.
    fn lower_instruction(
        &mut self,
        id: InstructionId,
        args: Vec<Expression>,
    ) -> Result<Lowered, StatementConversionError> {
        use OpCode::*;

        let instr = self.instruction(id)?;
        match instr.opcode {
            // Arithmetic and bitwise.
            // TODO: the .ovf and .un variants collapse onto the plain
            // operator; overflow checking and signedness are lost at this
            // layer.
            Add | AddOvf | AddOvfUn => self.create_binary_operation(instr, args, BinaryOp::Add),
            Sub | SubOvf | SubOvfUn => self.create_binary_operation(instr, args, BinaryOp::Sub),
            Mul | MulOvf | MulOvfUn => self.create_binary_operation(instr, args, BinaryOp::Mul),
            Div | DivUn => self.create_binary_operation(instr, args, BinaryOp::Div),
            Rem | RemUn => self.create_binary_operation(instr, args, BinaryOp::Rem),
            And => self.create_binary_operation(instr, args, BinaryOp::BitAnd),
            Or => self.create_binary_operation(instr, args, BinaryOp::BitOr),
            Xor => self.create_binary_operation(instr, args, BinaryOp::BitXor),
            Shl => self.create_binary_operation(instr, args, BinaryOp::Shl),
            Shr | ShrUn => self.create_binary_operation(instr, args, BinaryOp::Shr),
            Neg => self.create_unary_operation(instr, args, UnaryOp::Neg),
            Not => self.create_unary_operation(instr, args, UnaryOp::BitNot),

            // Comparisons
            Ceq => self.create_equality_comparison(instr, args),
            Cgt | CgtUn => self.create_binary_operation(instr, args, BinaryOp::Gt),
            Clt | CltUn => self.create_binary_operation(instr, args, BinaryOp::Lt),

            // Conversions.
            // TODO: .ovf and .un conversion variants use the same unchecked
            // cast as their plain forms; range checks are not modeled.
            ConvI | ConvOvfI | ConvOvfIUn => self.create_conversion(instr, args, "Int32"),
            ConvI1 | ConvOvfI1 | ConvOvfI1Un => self.create_conversion(instr, args, "SByte"),
            ConvI2 | ConvOvfI2 | ConvOvfI2Un => self.create_conversion(instr, args, "Int16"),
            ConvI4 | ConvOvfI4 | ConvOvfI4Un => self.create_conversion(instr, args, "Int32"),
            ConvI8 | ConvOvfI8 | ConvOvfI8Un => self.create_conversion(instr, args, "Int64"),
            ConvU | ConvOvfU | ConvOvfUUn => self.create_conversion(instr, args, "UInt32"),
            ConvU1 | ConvOvfU1 | ConvOvfU1Un => self.create_conversion(instr, args, "Byte"),
            ConvU2 | ConvOvfU2 | ConvOvfU2Un => self.create_conversion(instr, args, "UInt16"),
            ConvU4 | ConvOvfU4 | ConvOvfU4Un => self.create_conversion(instr, args, "UInt32"),
            ConvU8 | ConvOvfU8 | ConvOvfU8Un => self.create_conversion(instr, args, "UInt64"),
            ConvR4 => self.create_conversion(instr, args, "Single"),
            ConvR8 | ConvRUn => self.create_conversion(instr, args, "Double"),

            // Arrays
            Newarr => self.create_array_creation(instr, args),
            Ldlen => self.create_array_length(instr, args),
            LdelemI | LdelemI1 | LdelemI2 | LdelemI4 | LdelemI8 | LdelemU1 | LdelemU2
            | LdelemU4 | LdelemR4 | LdelemR8 | LdelemRef | Ldelema => {
                self.create_element_load(instr, args)
            }
            StelemI | StelemI1 | StelemI2 | StelemI4 | StelemI8 | StelemR4 | StelemR8
            | StelemRef => self.create_element_store(instr, args),

            // Branching
            Br => self.create_unconditional_branch(id),
            Brtrue => self.create_truthiness_branch(id, args, false),
            Brfalse => self.create_truthiness_branch(id, args, true),
            Beq => self.create_comparison_branch(id, args, BinaryOp::Eq),
            BneUn => self.create_comparison_branch(id, args, BinaryOp::Ne),
            Bge | BgeUn => self.create_comparison_branch(id, args, BinaryOp::Ge),
            Bgt | BgtUn => self.create_comparison_branch(id, args, BinaryOp::Gt),
            Ble | BleUn => self.create_comparison_branch(id, args, BinaryOp::Le),
            Blt | BltUn => self.create_comparison_branch(id, args, BinaryOp::Lt),

            // Calls and return
            Call => self.create_method_call(instr, args),
            Ret => self.create_return(instr, args),

            // Locals, parameters and constants
            Ldarg => self.create_parameter_load(instr),
            Ldloc => self.create_local_load(instr),
            LdcI4 | LdcI8 | LdcR4 | LdcR8 | Ldstr | Ldnull => self.create_constant(instr),
            Stloc => self.create_local_store(instr, args),

            // No-op: placeholder with no runtime effect
            Nop => Ok(Lowered::Stmt(Statement::Comment("No-op".into()))),

            // The explicitly-unsupported remainder: heap/object model,
            // indirect memory, exception regions, stack shuffling, pointers
            // and metadata. Each degrades to a placeholder at the
            // materializer boundary.
            LdelemAny | StelemAny | Ldarga | Starg | Ldloca | Calli | Callvirt | Box | Unbox
            | UnboxAny | Castclass | Isinst | Newobj | Ldfld | Ldflda | Ldsfld | Ldsflda
            | Stfld | Stsfld | Ldobj | Stobj | Cpobj | Initobj | LdindI | LdindI1 | LdindI2
            | LdindI4 | LdindI8 | LdindU1 | LdindU2 | LdindU4 | LdindR4 | LdindR8 | LdindRef
            | StindI | StindI1 | StindI2 | StindI4 | StindI8 | StindR4 | StindR8 | StindRef
            | Throw | Rethrow | Leave | Endfinally | Endfilter | Dup | Pop | Arglist | Break
            | Ckfinite | Constrained | Cpblk | Initblk | Jmp | Ldftn | Ldvirtftn | Ldtoken
            | Localloc | Mkrefany | No | Readonly | Refanytype | Refanyval | Sizeof | Switch
            | Tail | Unaligned | Volatile => {
                Err(StatementConversionError::Unsupported(instr.description()))
            }
        }
    }
}

/// Take exactly `N` materialized arguments, or fail with a contract error.
fn expect_args<const N: usize>(
    instr: &Instruction,
    args: Vec<Expression>,
) -> Result<[Expression; N], StatementConversionError> {
    let found = args.len();
    args.try_into()
        .map_err(|_| StatementConversionError::InvalidOperand {
            instruction: instr.description(),
            message: format!("expected {} stack arguments, found {}", N, found),
        })
}
