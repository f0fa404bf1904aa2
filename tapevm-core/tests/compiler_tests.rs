//! 编译器测试
//!
//! 游程合并、跳转回填、括号校验与确定性

mod common;
use common::{balanced_source, Lcg};

use tapevm_core::{compile, Compiler, Instruction, OpKind, SyntaxError};

// ===== 游程合并 =====

#[test]
fn test_plus_runs_collapse_to_one_instruction() {
    for len in 1..=64 {
        let source = "+".repeat(len);
        let program = compile(&source).unwrap();
        assert_eq!(program.len(), 1);
        assert_eq!(program[0].kind(), OpKind::Increment);
        assert_eq!(program[0].repeat(), len);
    }
}

#[test]
fn test_scenario_simple_sequence() {
    let program = compile("+++>---").unwrap();
    let kinds: Vec<(OpKind, usize, usize)> = program
        .iter()
        .map(|i| (i.kind(), i.repeat(), i.jump_target()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (OpKind::Increment, 3, 0),
            (OpKind::MoveRight, 1, 0),
            (OpKind::Decrement, 3, 0),
        ]
    );
}

// ===== 跳转回填 =====

#[test]
fn test_scenario_loop() {
    let program = compile("+++[>,.<-]").unwrap();
    assert_eq!(program.len(), 8);
    assert_eq!(program[1], Instruction::LoopOpen(7));
    assert_eq!(program[7], Instruction::LoopClose(1));
}

#[test]
fn test_jump_targets_are_sound() {
    let mut rng = Lcg::new(0x5eed);
    for round in 0..200 {
        let source = balanced_source(&mut rng, 10 + round);
        let program = compile(&source).unwrap();
        for (index, instruction) in program.iter().enumerate() {
            match *instruction {
                Instruction::LoopOpen(close) => {
                    assert!(close > index && close < program.len(), "{source}");
                    assert_eq!(program[close], Instruction::LoopClose(index));
                }
                Instruction::LoopClose(open) => {
                    assert!(open < index, "{source}");
                    assert_eq!(program[open], Instruction::LoopOpen(index));
                }
                _ => assert_eq!(instruction.jump_target(), 0),
            }
        }
    }
}

// ===== 括号校验 =====

#[test]
fn test_unbalanced_sources_fail() {
    for source in ["]", "[", "+[[-]", "+]-[", "[]]", "[[]"] {
        let err = compile(source).unwrap_err();
        assert!(
            matches!(
                err,
                SyntaxError::UnmatchedClose { .. } | SyntaxError::UnmatchedOpen { .. }
            ),
            "{source}"
        );
    }
}

#[test]
fn test_syntax_error_position() {
    let err = compile("+++\n--]").unwrap_err();
    assert_eq!(err.line(), 2);
    assert_eq!(err.column(), 3);
}

// ===== 确定性 =====

#[test]
fn test_compilation_is_deterministic() {
    let mut rng = Lcg::new(42);
    let compiler = Compiler::new();
    for _ in 0..50 {
        let source = balanced_source(&mut rng, 80);
        let first = compiler.compile(&source).unwrap();
        let second = compiler.compile(&source).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_failed_compile_does_not_leak_into_next() {
    let compiler = Compiler::new();
    assert!(compiler.compile("[[[").is_err());
    let compiled = compiler.compile("[-]").unwrap();
    assert_eq!(
        compiled.program.instructions(),
        &[
            Instruction::LoopOpen(2),
            Instruction::Decrement(1),
            Instruction::LoopClose(0),
        ]
    );
}

// ===== 自定义指令 =====

#[test]
fn test_custom_instructions_mixed_with_operators() {
    let program = compile("{memory}10++++{memory}10{increment}150{memory}10").unwrap();
    let names: Vec<(&str, i64)> = program
        .iter()
        .filter_map(|i| Some((i.custom_name()?, i.custom_arg()?)))
        .collect();
    assert_eq!(
        names,
        vec![
            ("{memory}", 10),
            ("{memory}", 10),
            ("{increment}", 150),
            ("{memory}", 10),
        ]
    );
    assert_eq!(program[1], Instruction::Increment(4));
}
