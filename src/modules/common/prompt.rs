//! 交互确认

use std::io::{BufRead, Write};

/// 向操作者提问, 返回是否同意
///
/// 闭包 `Fn(&str) -> bool` 也实现了该 trait, 测试中可直接给出固定回答。
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// 从控制台读取 y/N
///
/// 问题写到 stderr, stdout 只留给结果输出 (例如 `--format json`)。
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl Confirm for ConsolePrompt {
    fn confirm(&self, question: &str) -> bool {
        ask(question, &mut std::io::stdin().lock(), &mut std::io::stderr())
    }
}

fn ask(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if write!(output, "  {} [y/N] ", question).is_err() || output.flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }

    parse_answer(&answer)
}

fn parse_answer(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes" | "是")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_answer_defaults_to_no() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer(" YES "));
        assert!(!parse_answer("\n"));
        assert!(!parse_answer("n"));
        assert!(!parse_answer("maybe"));
    }

    #[test]
    fn question_goes_to_the_given_writer() {
        let mut input = std::io::Cursor::new(b"y\n".to_vec());
        let mut output = Vec::new();

        assert!(ask("删除安装目录吗?", &mut input, &mut output));
        assert_eq!(String::from_utf8(output).unwrap(), "  删除安装目录吗? [y/N] ");
    }

    #[test]
    fn closed_input_means_no() {
        let mut input = std::io::Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        assert!(!ask("继续?", &mut input, &mut output));
    }

    #[test]
    fn closures_act_as_prompts() {
        let always = |_: &str| true;
        assert!(always.confirm("继续?"));
    }
}
