use cil_dec_rs::cil::{
    Instruction, InstructionId, LocalVar, MethodBody, MethodSignature, OpCode, Operand, RegionTree,
    StackExpression, TypeName,
};
use cil_dec_rs::Decompiler;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A counting-loop method with a long run of arithmetic temporaries.
fn synthetic_method(name: &str) -> MethodBody {
    let mut instructions = vec![
        Instruction {
            opcode: OpCode::LdcI4,
            operand: Operand::Int(0),
            offset: 0,
            pop_count: 0,
            push_count: 1,
        },
        Instruction {
            opcode: OpCode::Stloc,
            operand: Operand::Local("total".into()),
            offset: 1,
            pop_count: 1,
            push_count: 0,
        },
    ];
    let mut work_exprs = Vec::new();
    for i in 0..64u32 {
        let base = instructions.len();
        instructions.push(Instruction {
            opcode: OpCode::LdcI4,
            operand: Operand::Int(i as i64),
            offset: 2 + i * 3,
            pop_count: 0,
            push_count: 1,
        });
        instructions.push(Instruction {
            opcode: OpCode::LdcI4,
            operand: Operand::Int(1),
            offset: 3 + i * 3,
            pop_count: 0,
            push_count: 1,
        });
        instructions.push(Instruction {
            opcode: OpCode::Add,
            operand: Operand::None,
            offset: 4 + i * 3,
            pop_count: 2,
            push_count: 1,
        });
        work_exprs.push(StackExpression::with_args(
            InstructionId(base + 2),
            vec![
                StackExpression::leaf(InstructionId(base), 0, 1),
                StackExpression::leaf(InstructionId(base + 1), 0, 1),
            ],
            2,
            1,
        ));
    }
    let back_edge = instructions.len();
    instructions.push(Instruction {
        opcode: OpCode::Br,
        operand: Operand::Target(InstructionId(2)),
        offset: 2 + 64 * 3,
        pop_count: 0,
        push_count: 0,
    });

    let mut regions = RegionTree::new();
    let root = regions.add_sequence(None, "Body").unwrap();
    let entry_exprs = vec![
        StackExpression::with_args(
            InstructionId(1),
            vec![StackExpression::leaf(InstructionId(0), 0, 1)],
            1,
            0,
        ),
    ];
    regions.add_block(Some(root), "Entry", entry_exprs).unwrap();
    let lp = regions.add_loop(Some(root), "Loop_1").unwrap();
    let body = regions.add_sequence(Some(lp), "Loop_1_Body").unwrap();
    work_exprs.push(StackExpression::leaf(InstructionId(back_edge), 0, 0));
    regions.add_block(Some(body), "Work", work_exprs).unwrap();

    MethodBody {
        signature: MethodSignature {
            name: name.to_string(),
            params: vec![],
            locals: vec![LocalVar {
                name: "total".into(),
                ty: TypeName::new("Int32"),
            }],
            return_type: None,
        },
        instructions,
        regions,
    }
}

fn decompile_benchmark(c: &mut Criterion) {
    let method = synthetic_method("Hot");
    c.bench_function("decompile_method", |b| {
        b.iter(|| {
            black_box(Decompiler::new().decompile_method(&method).unwrap());
        });
    });

    let methods: Vec<MethodBody> = (0..32)
        .map(|i| synthetic_method(&format!("Method{}", i)))
        .collect();
    c.bench_function("decompile_all_32_methods", |b| {
        b.iter(|| {
            black_box(Decompiler::new().decompile_all(&methods).unwrap());
        });
    });
}

criterion_group!(benches, decompile_benchmark);
criterion_main!(benches);
