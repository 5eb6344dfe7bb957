//! End-to-end tests for branch resolution and region-tree walking: loops,
//! continue/break classification, label fallbacks and fall-through edges.

use cil_dec_rs::ast::{Expression, Statement};
use cil_dec_rs::cil::{
    Instruction, InstructionId, MethodBody, MethodSignature, OpCode, Operand, RegionTree,
    StackExpression,
};
use cil_dec_rs::Decompiler;

fn instr(opcode: OpCode, operand: Operand, offset: u32, pop: u8, push: u8) -> Instruction {
    Instruction {
        opcode,
        operand,
        offset,
        pop_count: pop,
        push_count: push,
    }
}

fn signature(name: &str, params: &[&str]) -> MethodSignature {
    MethodSignature {
        name: name.to_string(),
        params: params.iter().map(|p| p.to_string()).collect(),
        locals: vec![],
        return_type: None,
    }
}

/// Body { Loop_1 { Loop_1_Body { Entry, Work } }, After }
///
/// Entry tests its parameter and jumps back to its own head; Work jumps to
/// After.
fn loop_method() -> MethodBody {
    let instructions = vec![
        instr(OpCode::Ldarg, Operand::Param("i".into()), 0, 0, 1),
        instr(OpCode::Brtrue, Operand::Target(InstructionId(0)), 1, 1, 0),
        instr(OpCode::Br, Operand::Target(InstructionId(3)), 2, 0, 0),
        instr(OpCode::LdcI4, Operand::Int(0), 3, 0, 1),
    ];

    let mut regions = RegionTree::new();
    let root = regions.add_sequence(None, "Body").unwrap();
    let lp = regions.add_loop(Some(root), "Loop_1").unwrap();
    let body = regions.add_sequence(Some(lp), "Loop_1_Body").unwrap();
    regions
        .add_block(
            Some(body),
            "Entry",
            vec![StackExpression::with_args(
                InstructionId(1),
                vec![StackExpression::leaf(InstructionId(0), 0, 1)],
                1,
                0,
            )],
        )
        .unwrap();
    regions
        .add_block(
            Some(body),
            "Work",
            vec![StackExpression::leaf(InstructionId(2), 0, 0)],
        )
        .unwrap();
    regions
        .add_block(
            Some(root),
            "After",
            vec![StackExpression::leaf(InstructionId(3), 0, 1)],
        )
        .unwrap();

    MethodBody {
        signature: signature("Spin", &["i"]),
        instructions,
        regions,
    }
}

/// Statements of the loop body's inner block from a `loop_method` result.
fn loop_inner_statements(decompiled: &Statement) -> &[Statement] {
    let Statement::Block(top) = decompiled else {
        panic!("method body should be a block");
    };
    assert_eq!(top[0], Statement::Label("Body".into()));
    let Statement::Block(body) = &top[1] else {
        panic!("sequence should lower to a nested block");
    };
    assert_eq!(body[0], Statement::Label("Loop_1".into()));
    let Statement::Loop(loop_stmts) = &body[1] else {
        panic!("loop region should lower to a loop statement");
    };
    assert_eq!(loop_stmts[0], Statement::Label("Loop_1_Body".into()));
    let Statement::Block(inner) = &loop_stmts[1] else {
        panic!("loop body sequence should lower to a nested block");
    };
    inner
}

#[test]
fn loop_regions_produce_condition_less_loops() {
    let decompiled = Decompiler::new().decompile_method(&loop_method()).unwrap();
    let Statement::Block(top) = &decompiled else {
        panic!("method body should be a block");
    };
    let Statement::Block(body) = &top[1] else {
        panic!("sequence should lower to a nested block");
    };
    assert!(matches!(body[1], Statement::Loop(_)));
    // The region following the loop still lowers after it.
    assert_eq!(body[2], Statement::Label("After".into()));
}

#[test]
fn jump_to_loop_head_becomes_guarded_continue() {
    let decompiled = Decompiler::new().decompile_method(&loop_method()).unwrap();
    let inner = loop_inner_statements(&decompiled);

    assert_eq!(inner[0], Statement::Label("Entry".into()));
    let Statement::If { condition, then } = &inner[1] else {
        panic!("conditional branch should lower to an if, got {:?}", inner[1]);
    };
    assert_eq!(condition, &Expression::ident("i"));
    assert_eq!(**then, Statement::Continue);
}

#[test]
fn jump_past_loop_end_becomes_break() {
    let decompiled = Decompiler::new().decompile_method(&loop_method()).unwrap();
    let inner = loop_inner_statements(&decompiled);

    assert_eq!(inner[2], Statement::Label("Work".into()));
    assert_eq!(inner[3], Statement::Break);
}

#[test]
fn brfalse_negates_its_condition() {
    let instructions = vec![
        instr(OpCode::Ldarg, Operand::Param("flag".into()), 0, 0, 1),
        instr(OpCode::Brfalse, Operand::Target(InstructionId(2)), 1, 1, 0),
        instr(OpCode::LdcI4, Operand::Int(1), 2, 0, 1),
    ];

    let mut regions = RegionTree::new();
    let root = regions.add_sequence(None, "Body").unwrap();
    regions
        .add_block(
            Some(root),
            "Check",
            vec![StackExpression::with_args(
                InstructionId(1),
                vec![StackExpression::leaf(InstructionId(0), 0, 1)],
                1,
                0,
            )],
        )
        .unwrap();
    regions
        .add_block(
            Some(root),
            "Skip",
            vec![StackExpression::leaf(InstructionId(2), 0, 1)],
        )
        .unwrap();
    let method = MethodBody {
        signature: signature("Gate", &["flag"]),
        instructions,
        regions,
    };

    let decompiled = Decompiler::new().decompile_method(&method).unwrap();
    let Statement::Block(top) = &decompiled else {
        panic!("method body should be a block");
    };
    let Statement::Block(body) = &top[1] else {
        panic!("sequence should lower to a nested block");
    };
    assert_eq!(body[1].to_string(), "if (!flag) goto Skip;");
}

#[test]
fn comparison_branch_guards_the_transfer_without_else() {
    let instructions = vec![
        instr(OpCode::Ldarg, Operand::Param("a".into()), 0, 0, 1),
        instr(OpCode::Ldarg, Operand::Param("b".into()), 1, 0, 1),
        instr(OpCode::Beq, Operand::Target(InstructionId(4)), 2, 2, 0),
        instr(OpCode::LdcI4, Operand::Int(0), 3, 0, 1),
        instr(OpCode::LdcI4, Operand::Int(1), 4, 0, 1),
    ];

    let mut regions = RegionTree::new();
    let root = regions.add_sequence(None, "Body").unwrap();
    regions
        .add_block(
            Some(root),
            "Block_A",
            vec![
                StackExpression::with_args(
                    InstructionId(2),
                    vec![
                        StackExpression::leaf(InstructionId(0), 0, 1),
                        StackExpression::leaf(InstructionId(1), 0, 1),
                    ],
                    2,
                    0,
                ),
                StackExpression::leaf(InstructionId(3), 0, 1),
            ],
        )
        .unwrap();
    regions
        .add_block(
            Some(root),
            "Block_B",
            vec![StackExpression::leaf(InstructionId(4), 0, 1)],
        )
        .unwrap();
    let method = MethodBody {
        signature: signature("PickOne", &["a", "b"]),
        instructions,
        regions,
    };

    let decompiled = Decompiler::new().decompile_method(&method).unwrap();
    let Statement::Block(top) = &decompiled else {
        panic!("method body should be a block");
    };
    let Statement::Block(body) = &top[1] else {
        panic!("sequence should lower to a nested block");
    };
    assert_eq!(body[1].to_string(), "if (a == b) goto Block_B;");
    // The fall-through path stays unguarded after the if.
    assert_eq!(body[2].to_string(), "var expr03 = 0;");
}

#[test]
fn jump_out_of_loop_to_distant_region_falls_back_to_goto() {
    let instructions = vec![
        instr(OpCode::Ldarg, Operand::Param("i".into()), 0, 0, 1),
        instr(OpCode::Brtrue, Operand::Target(InstructionId(0)), 1, 1, 0),
        instr(OpCode::Br, Operand::Target(InstructionId(4)), 2, 0, 0),
        instr(OpCode::LdcI4, Operand::Int(1), 3, 0, 1),
        instr(OpCode::LdcI4, Operand::Int(2), 4, 0, 1),
    ];

    let mut regions = RegionTree::new();
    let root = regions.add_sequence(None, "Body").unwrap();
    let lp = regions.add_loop(Some(root), "Loop_1").unwrap();
    let body = regions.add_sequence(Some(lp), "Loop_1_Body").unwrap();
    regions
        .add_block(
            Some(body),
            "Entry",
            vec![StackExpression::with_args(
                InstructionId(1),
                vec![StackExpression::leaf(InstructionId(0), 0, 1)],
                1,
                0,
            )],
        )
        .unwrap();
    regions
        .add_block(
            Some(body),
            "Work",
            vec![StackExpression::leaf(InstructionId(2), 0, 0)],
        )
        .unwrap();
    regions
        .add_block(
            Some(root),
            "After",
            vec![StackExpression::leaf(InstructionId(3), 0, 1)],
        )
        .unwrap();
    regions
        .add_block(
            Some(root),
            "Far",
            vec![StackExpression::leaf(InstructionId(4), 0, 1)],
        )
        .unwrap();
    let method = MethodBody {
        signature: signature("Escape", &["i"]),
        instructions,
        regions,
    };

    // Far is not the region immediately after the loop, so the transfer
    // cannot be a break.
    let decompiled = Decompiler::new().decompile_method(&method).unwrap();
    let inner = loop_inner_statements(&decompiled);
    assert_eq!(inner[3], Statement::Goto("Far".into()));
}

#[test]
fn redundant_fall_through_is_elided_explicit_one_is_kept() {
    let instructions = vec![
        instr(OpCode::LdcI4, Operand::Int(1), 0, 0, 1),
        instr(OpCode::LdcI4, Operand::Int(2), 1, 0, 1),
        instr(OpCode::LdcI4, Operand::Int(3), 2, 0, 1),
    ];

    let mut regions = RegionTree::new();
    let root = regions.add_sequence(None, "Body").unwrap();
    let a = regions
        .add_block(
            Some(root),
            "Block_A",
            vec![StackExpression::leaf(InstructionId(0), 0, 1)],
        )
        .unwrap();
    let b = regions
        .add_block(
            Some(root),
            "Block_B",
            vec![StackExpression::leaf(InstructionId(1), 0, 1)],
        )
        .unwrap();
    let c = regions
        .add_block(
            Some(root),
            "Block_C",
            vec![StackExpression::leaf(InstructionId(2), 0, 1)],
        )
        .unwrap();
    // A skips B; B flows into its textual successor.
    regions.set_fall_through(a, c).unwrap();
    regions.set_fall_through(b, c).unwrap();
    let method = MethodBody {
        signature: signature("Skip", &[]),
        instructions,
        regions,
    };

    let decompiled = Decompiler::new().decompile_method(&method).unwrap();
    let Statement::Block(top) = &decompiled else {
        panic!("method body should be a block");
    };
    let Statement::Block(body) = &top[1] else {
        panic!("sequence should lower to a nested block");
    };
    assert_eq!(
        body.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        vec![
            "Block_A:",
            "var expr00 = 1;",
            "goto Block_C;",
            "Block_B:",
            "var expr01 = 2;",
            "Block_C:",
            "var expr02 = 3;",
        ]
    );
}

#[test]
fn branch_to_instruction_outside_any_block_is_fatal() {
    let instructions = vec![
        instr(OpCode::Br, Operand::Target(InstructionId(1)), 0, 0, 0),
        instr(OpCode::LdcI4, Operand::Int(1), 1, 0, 1),
    ];

    // Instruction 1 is decoded but no block's expressions contain it.
    let mut regions = RegionTree::new();
    let root = regions.add_sequence(None, "Body").unwrap();
    regions
        .add_block(
            Some(root),
            "Block_A",
            vec![StackExpression::leaf(InstructionId(0), 0, 0)],
        )
        .unwrap();
    let method = MethodBody {
        signature: signature("Dangling", &[]),
        instructions,
        regions,
    };

    assert!(Decompiler::new().decompile_method(&method).is_err());
}

#[test]
fn branch_to_missing_instruction_is_fatal() {
    let instructions = vec![instr(
        OpCode::Br,
        Operand::Target(InstructionId(9)),
        0,
        0,
        0,
    )];

    let mut regions = RegionTree::new();
    regions
        .add_block(
            None,
            "Block_A",
            vec![StackExpression::leaf(InstructionId(0), 0, 0)],
        )
        .unwrap();
    let method = MethodBody {
        signature: signature("OutOfRange", &[]),
        instructions,
        regions,
    };

    assert!(Decompiler::new().decompile_method(&method).is_err());
}

#[test]
fn loop_without_body_is_a_structuring_error() {
    let mut regions = RegionTree::new();
    regions.add_loop(None, "Loop_1").unwrap();
    let method = MethodBody {
        signature: signature("Hollow", &[]),
        instructions: vec![],
        regions,
    };

    assert!(Decompiler::new().decompile_method(&method).is_err());
}
