//! VM 执行测试
//!
//! 端到端测试：编译并执行源码

mod common;
use common::{balanced_source, run_code, run_program, Lcg};

use std::io;
use std::sync::Arc;
use std::thread;

use tapevm_core::{compile, Cell, Halt, Machine, MachineConfig, MachineView, RuntimeError, StreamError};

// ===== 输入输出 =====

#[test]
fn test_scenario_read_write() {
    let result = run_code("+++>++++++++++<,.,.", b"123").unwrap();
    assert_eq!(result.output, b"12");
    assert_eq!(result.halt, Halt::Completed);
}

#[test]
fn test_echo_round_trip() {
    let mut rng = Lcg::new(7);
    for len in 0..40 {
        let input: Vec<u8> = (0..len).map(|_| rng.below(256) as u8).collect();
        let source = ",.".repeat(len);
        let result = run_code(&source, &input).unwrap();
        assert_eq!(result.output, input);
    }
}

#[test]
fn test_hello_world() {
    let source = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    let result = run_code(source, b"").unwrap();
    assert_eq!(result.output, b"Hello World!\n");
}

#[test]
fn test_input_exhausted() {
    let err = run_code(",,", b"").unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Stream {
            source: StreamError::UnexpectedEof,
            ..
        }
    ));
}

// ===== 跳转安全 =====

#[test]
fn test_random_programs_stay_in_bounds() {
    let mut rng = Lcg::new(99);
    let config = MachineConfig {
        memory_size: 64,
        max_steps: Some(10_000),
        ..MachineConfig::default()
    };
    for _ in 0..100 {
        let source = balanced_source(&mut rng, 60);
        let program = compile(&source).unwrap();
        let input = vec![1u8; 4096];
        let mut machine = Machine::with_config(&program, &input[..], io::sink(), &config);
        match machine.execute() {
            Ok(_) | Err(RuntimeError::StepLimitExceeded { .. }) => {}
            Err(RuntimeError::Stream { .. }) => {}
            Err(other) => panic!("{source}: {other}"),
        }
        assert!(machine.instruction_pointer() <= program.len());
        assert!(machine.data_pointer() < 64);
    }
}

// ===== 自定义指令 =====

#[test]
fn test_scenario_power() {
    let program = compile("++{power}3").unwrap();
    let mut power = |name: &str, arg: i64, view: &mut MachineView<'_>| {
        if name == "{power}" {
            let value = view.current().wrapping_pow(arg as u32);
            view.set_current(value);
        }
    };
    let result = run_program(&program, b"", Some(&mut power)).unwrap();
    assert_eq!(result.memory[0], 8);
}

#[test]
fn test_dispatch_sees_name_and_arg() {
    let program = compile(">{increment}72.{memory}").unwrap();
    let mut calls: Vec<(String, i64, usize)> = Vec::new();
    let mut record = |name: &str, arg: i64, view: &mut MachineView<'_>| {
        calls.push((name.to_string(), arg, view.data_pointer()));
        if name == "{increment}" {
            *view.current_mut() += arg;
        }
    };
    let result = run_program(&program, b"", Some(&mut record)).unwrap();
    assert_eq!(result.output, b"H");
    assert_eq!(
        calls,
        vec![
            ("{increment}".to_string(), 72, 1),
            ("{memory}".to_string(), 0, 1),
        ]
    );
}

// ===== 并发 =====

#[test]
fn test_shared_program_across_threads() {
    let program = Arc::new(compile(",[.,]").unwrap());
    let handles: Vec<_> = (0..4u8)
        .map(|n| {
            let program = Arc::clone(&program);
            thread::spawn(move || {
                let input = vec![b'a' + n; 3 + n as usize]
                    .into_iter()
                    .chain([0])
                    .collect::<Vec<u8>>();
                let mut machine = Machine::new(&program, &input[..], Vec::new());
                machine.execute().unwrap();
                machine.into_parts().1
            })
        })
        .collect();
    for (n, handle) in handles.into_iter().enumerate() {
        let output = handle.join().unwrap();
        assert_eq!(output, vec![b'a' + n as u8; 3 + n]);
    }
}

#[test]
fn test_memory_snapshot() {
    let result = run_code("+>++>+++", b"").unwrap();
    let expected: [Cell; 4] = [1, 2, 3, 0];
    assert_eq!(&result.memory[..4], &expected);
    assert_eq!(result.memory.len(), 30_000);
}
