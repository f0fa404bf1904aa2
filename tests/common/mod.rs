//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use tapevm_workspace::{run_to_vec, ExecuteOutput, MachineView, RunConfig, TapeError};

/// 用默认配置执行，返回输出字节
pub fn run_code(code: &str, input: &[u8]) -> Result<Vec<u8>, TapeError> {
    run_code_with(code, input, &RunConfig::default()).map(|(_, output)| output)
}

/// 用指定配置执行
pub fn run_code_with(
    code: &str,
    input: &[u8],
    config: &RunConfig,
) -> Result<(ExecuteOutput, Vec<u8>), TapeError> {
    run_to_vec(code, input, None, config)
}

/// 执行并把输出当作 UTF-8 文本
pub fn run_text(code: &str, input: &str) -> String {
    let output = run_code(code, input.as_bytes()).unwrap();
    String::from_utf8(output).unwrap()
}

/// 示例程序中的 `{increment}` / `{power}` 指令，调用记录写入 `calls`
pub fn recording_dispatch(
    calls: &mut Vec<(String, i64)>,
) -> impl FnMut(&str, i64, &mut MachineView<'_>) + '_ {
    move |name: &str, arg: i64, view: &mut MachineView<'_>| {
        calls.push((name.to_string(), arg));
        match name {
            "{increment}" => *view.current_mut() += arg,
            "{power}" => {
                let value = view.current().pow(arg as u32);
                view.set_current(value);
            }
            _ => {}
        }
    }
}
