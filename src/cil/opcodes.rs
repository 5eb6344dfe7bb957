//! CIL operation codes
//!
//! The closed instruction set this back end understands. The enum mirrors the
//! ECMA-335 mnemonics; variants the semantics table has no lowering for are
//! still present so that upstream can hand us any decoded method body and get
//! a degraded-but-complete rendering back.

use serde::Serialize;
use std::fmt;

/// CIL operation code for a single decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OpCode {
    // Arithmetic and bitwise
    Add,
    AddOvf,
    AddOvfUn,
    Sub,
    SubOvf,
    SubOvfUn,
    Mul,
    MulOvf,
    MulOvfUn,
    Div,
    DivUn,
    Rem,
    RemUn,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    ShrUn,
    Neg,
    Not,

    // Comparison
    Ceq,
    Cgt,
    CgtUn,
    Clt,
    CltUn,

    // Branching
    Br,
    Brfalse,
    Brtrue,
    Beq,
    Bge,
    BgeUn,
    Bgt,
    BgtUn,
    Ble,
    BleUn,
    Blt,
    BltUn,
    BneUn,

    // Conversions
    ConvI,
    ConvI1,
    ConvI2,
    ConvI4,
    ConvI8,
    ConvU,
    ConvU1,
    ConvU2,
    ConvU4,
    ConvU8,
    ConvR4,
    ConvR8,
    ConvRUn,
    ConvOvfI,
    ConvOvfI1,
    ConvOvfI2,
    ConvOvfI4,
    ConvOvfI8,
    ConvOvfU,
    ConvOvfU1,
    ConvOvfU2,
    ConvOvfU4,
    ConvOvfU8,
    ConvOvfIUn,
    ConvOvfI1Un,
    ConvOvfI2Un,
    ConvOvfI4Un,
    ConvOvfI8Un,
    ConvOvfUUn,
    ConvOvfU1Un,
    ConvOvfU2Un,
    ConvOvfU4Un,
    ConvOvfU8Un,

    // Arrays
    Newarr,
    Ldlen,
    LdelemI,
    LdelemI1,
    LdelemI2,
    LdelemI4,
    LdelemI8,
    LdelemU1,
    LdelemU2,
    LdelemU4,
    LdelemR4,
    LdelemR8,
    LdelemRef,
    LdelemAny,
    Ldelema,
    StelemI,
    StelemI1,
    StelemI2,
    StelemI4,
    StelemI8,
    StelemR4,
    StelemR8,
    StelemRef,
    StelemAny,

    // Locals, parameters and constants
    Ldarg,
    Ldarga,
    Starg,
    Ldloc,
    Ldloca,
    Stloc,
    LdcI4,
    LdcI8,
    LdcR4,
    LdcR8,
    Ldstr,
    Ldnull,

    // Calls and return
    Call,
    Calli,
    Callvirt,
    Ret,

    // Object model (unsupported at this layer)
    Box,
    Unbox,
    UnboxAny,
    Castclass,
    Isinst,
    Newobj,
    Ldfld,
    Ldflda,
    Ldsfld,
    Ldsflda,
    Stfld,
    Stsfld,
    Ldobj,
    Stobj,
    Cpobj,
    Initobj,

    // Indirect memory access (unsupported at this layer)
    LdindI,
    LdindI1,
    LdindI2,
    LdindI4,
    LdindI8,
    LdindU1,
    LdindU2,
    LdindU4,
    LdindR4,
    LdindR8,
    LdindRef,
    StindI,
    StindI1,
    StindI2,
    StindI4,
    StindI8,
    StindR4,
    StindR8,
    StindRef,

    // Exception handling (unsupported at this layer)
    Throw,
    Rethrow,
    Leave,
    Endfinally,
    Endfilter,

    // Stack manipulation (unsupported at this layer)
    Dup,
    Pop,

    // Metadata, pointers and prefixes (unsupported at this layer)
    Arglist,
    Break,
    Ckfinite,
    Constrained,
    Cpblk,
    Initblk,
    Jmp,
    Ldftn,
    Ldvirtftn,
    Ldtoken,
    Localloc,
    Mkrefany,
    No,
    Nop,
    Readonly,
    Refanytype,
    Refanyval,
    Sizeof,
    Switch,
    Tail,
    Unaligned,
    Volatile,
}

impl OpCode {
    /// Dotted IL spelling of this opcode, as it appears in disassembly and in
    /// degraded placeholder comments.
    pub fn mnemonic(&self) -> &'static str {
        use OpCode::*;
        match self {
            Add => "add",
            AddOvf => "add.ovf",
            AddOvfUn => "add.ovf.un",
            Sub => "sub",
            SubOvf => "sub.ovf",
            SubOvfUn => "sub.ovf.un",
            Mul => "mul",
            MulOvf => "mul.ovf",
            MulOvfUn => "mul.ovf.un",
            Div => "div",
            DivUn => "div.un",
            Rem => "rem",
            RemUn => "rem.un",
            And => "and",
            Or => "or",
            Xor => "xor",
            Shl => "shl",
            Shr => "shr",
            ShrUn => "shr.un",
            Neg => "neg",
            Not => "not",
            Ceq => "ceq",
            Cgt => "cgt",
            CgtUn => "cgt.un",
            Clt => "clt",
            CltUn => "clt.un",
            Br => "br",
            Brfalse => "brfalse",
            Brtrue => "brtrue",
            Beq => "beq",
            Bge => "bge",
            BgeUn => "bge.un",
            Bgt => "bgt",
            BgtUn => "bgt.un",
            Ble => "ble",
            BleUn => "ble.un",
            Blt => "blt",
            BltUn => "blt.un",
            BneUn => "bne.un",
            ConvI => "conv.i",
            ConvI1 => "conv.i1",
            ConvI2 => "conv.i2",
            ConvI4 => "conv.i4",
            ConvI8 => "conv.i8",
            ConvU => "conv.u",
            ConvU1 => "conv.u1",
            ConvU2 => "conv.u2",
            ConvU4 => "conv.u4",
            ConvU8 => "conv.u8",
            ConvR4 => "conv.r4",
            ConvR8 => "conv.r8",
            ConvRUn => "conv.r.un",
            ConvOvfI => "conv.ovf.i",
            ConvOvfI1 => "conv.ovf.i1",
            ConvOvfI2 => "conv.ovf.i2",
            ConvOvfI4 => "conv.ovf.i4",
            ConvOvfI8 => "conv.ovf.i8",
            ConvOvfU => "conv.ovf.u",
            ConvOvfU1 => "conv.ovf.u1",
            ConvOvfU2 => "conv.ovf.u2",
            ConvOvfU4 => "conv.ovf.u4",
            ConvOvfU8 => "conv.ovf.u8",
            ConvOvfIUn => "conv.ovf.i.un",
            ConvOvfI1Un => "conv.ovf.i1.un",
            ConvOvfI2Un => "conv.ovf.i2.un",
            ConvOvfI4Un => "conv.ovf.i4.un",
            ConvOvfI8Un => "conv.ovf.i8.un",
            ConvOvfUUn => "conv.ovf.u.un",
            ConvOvfU1Un => "conv.ovf.u1.un",
            ConvOvfU2Un => "conv.ovf.u2.un",
            ConvOvfU4Un => "conv.ovf.u4.un",
            ConvOvfU8Un => "conv.ovf.u8.un",
            Newarr => "newarr",
            Ldlen => "ldlen",
            LdelemI => "ldelem.i",
            LdelemI1 => "ldelem.i1",
            LdelemI2 => "ldelem.i2",
            LdelemI4 => "ldelem.i4",
            LdelemI8 => "ldelem.i8",
            LdelemU1 => "ldelem.u1",
            LdelemU2 => "ldelem.u2",
            LdelemU4 => "ldelem.u4",
            LdelemR4 => "ldelem.r4",
            LdelemR8 => "ldelem.r8",
            LdelemRef => "ldelem.ref",
            LdelemAny => "ldelem.any",
            Ldelema => "ldelema",
            StelemI => "stelem.i",
            StelemI1 => "stelem.i1",
            StelemI2 => "stelem.i2",
            StelemI4 => "stelem.i4",
            StelemI8 => "stelem.i8",
            StelemR4 => "stelem.r4",
            StelemR8 => "stelem.r8",
            StelemRef => "stelem.ref",
            StelemAny => "stelem.any",
            Ldarg => "ldarg",
            Ldarga => "ldarga",
            Starg => "starg",
            Ldloc => "ldloc",
            Ldloca => "ldloca",
            Stloc => "stloc",
            LdcI4 => "ldc.i4",
            LdcI8 => "ldc.i8",
            LdcR4 => "ldc.r4",
            LdcR8 => "ldc.r8",
            Ldstr => "ldstr",
            Ldnull => "ldnull",
            Call => "call",
            Calli => "calli",
            Callvirt => "callvirt",
            Ret => "ret",
            Box => "box",
            Unbox => "unbox",
            UnboxAny => "unbox.any",
            Castclass => "castclass",
            Isinst => "isinst",
            Newobj => "newobj",
            Ldfld => "ldfld",
            Ldflda => "ldflda",
            Ldsfld => "ldsfld",
            Ldsflda => "ldsflda",
            Stfld => "stfld",
            Stsfld => "stsfld",
            Ldobj => "ldobj",
            Stobj => "stobj",
            Cpobj => "cpobj",
            Initobj => "initobj",
            LdindI => "ldind.i",
            LdindI1 => "ldind.i1",
            LdindI2 => "ldind.i2",
            LdindI4 => "ldind.i4",
            LdindI8 => "ldind.i8",
            LdindU1 => "ldind.u1",
            LdindU2 => "ldind.u2",
            LdindU4 => "ldind.u4",
            LdindR4 => "ldind.r4",
            LdindR8 => "ldind.r8",
            LdindRef => "ldind.ref",
            StindI => "stind.i",
            StindI1 => "stind.i1",
            StindI2 => "stind.i2",
            StindI4 => "stind.i4",
            StindI8 => "stind.i8",
            StindR4 => "stind.r4",
            StindR8 => "stind.r8",
            StindRef => "stind.ref",
            Throw => "throw",
            Rethrow => "rethrow",
            Leave => "leave",
            Endfinally => "endfinally",
            Endfilter => "endfilter",
            Dup => "dup",
            Pop => "pop",
            Arglist => "arglist",
            Break => "break",
            Ckfinite => "ckfinite",
            Constrained => "constrained.",
            Cpblk => "cpblk",
            Initblk => "initblk",
            Jmp => "jmp",
            Ldftn => "ldftn",
            Ldvirtftn => "ldvirtftn",
            Ldtoken => "ldtoken",
            Localloc => "localloc",
            Mkrefany => "mkrefany",
            No => "no.",
            Nop => "nop",
            Readonly => "readonly.",
            Refanytype => "refanytype",
            Refanyval => "refanyval",
            Sizeof => "sizeof",
            Switch => "switch",
            Tail => "tail.",
            Unaligned => "unaligned.",
            Volatile => "volatile.",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics_use_dotted_spelling() {
        assert_eq!(OpCode::LdcI4.mnemonic(), "ldc.i4");
        assert_eq!(OpCode::ConvOvfU2Un.mnemonic(), "conv.ovf.u2.un");
        assert_eq!(OpCode::LdindRef.mnemonic(), "ldind.ref");
        assert_eq!(OpCode::Add.to_string(), "add");
    }
}
