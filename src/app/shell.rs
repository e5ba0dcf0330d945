// ==========================================
// 库存盘点系统 - 会话 Shell
// ==========================================
// 职责: 行命令解析 + 分发 + 输出
// 约定: 命令失败只输出错误行,会话继续；EOF 或 quit 结束
// ==========================================

use crate::app::commands;
use crate::app::state::AppState;
use crate::domain::SortDirection;
use std::io::{self, BufRead, Write};
use std::string::FromUtf8Error;

/// 会话命令
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Load(String),
    Count { row: String, value: String },
    Fill(String),
    Reconcile,
    Summary,
    Find {
        code: Option<String>,
        location: Option<String>,
    },
    Shortages,
    Overages,
    All,
    Sort(SortDirection),
    Save(String),
    Export(String),
    Help,
    Quit,
    Empty,
}

/// 命令解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellParseError {
    Unknown(String),
    Usage(&'static str),
}

/// 路径参数: 命令之后的全部内容,去掉包裹的引号
fn path_arg(rest: &str) -> Option<String> {
    let trimmed = rest.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

impl ShellCommand {
    /// 解析一行输入
    pub fn parse(line: &str) -> Result<Self, ShellParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ShellCommand::Empty);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name.to_lowercase().as_str() {
            "load" => ShellCommand::Load(path_arg(rest).ok_or(ShellParseError::Usage("load <arquivo>"))?),
            "save" => ShellCommand::Save(path_arg(rest).ok_or(ShellParseError::Usage("save <arquivo.json>"))?),
            "export" => ShellCommand::Export(path_arg(rest).ok_or(ShellParseError::Usage("export <arquivo.xlsx>"))?),
            "count" => match args.as_slice() {
                [row, value] => ShellCommand::Count {
                    row: row.to_string(),
                    value: value.to_string(),
                },
                _ => return Err(ShellParseError::Usage("count <linha> <valor>")),
            },
            "fill" => match args.as_slice() {
                [value] => ShellCommand::Fill(value.to_string()),
                _ => return Err(ShellParseError::Usage("fill <valor>")),
            },
            "reconcile" => ShellCommand::Reconcile,
            "summary" => ShellCommand::Summary,
            "find" => Self::parse_find(&args)?,
            "shortages" => ShellCommand::Shortages,
            "overages" => ShellCommand::Overages,
            "all" => ShellCommand::All,
            "sort" => match args.as_slice() {
                [direction] => ShellCommand::Sort(
                    SortDirection::parse(direction).ok_or(ShellParseError::Usage("sort asc|desc"))?,
                ),
                _ => return Err(ShellParseError::Usage("sort asc|desc")),
            },
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(ShellParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }

    fn parse_find(args: &[&str]) -> Result<Self, ShellParseError> {
        const USAGE: &str = "find [--code X] [--location Y]";
        let mut code = None;
        let mut location = None;
        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let value = iter.next().ok_or(ShellParseError::Usage(USAGE))?;
            match *flag {
                "--code" | "-c" => code = Some(value.to_string()),
                "--location" | "-l" => location = Some(value.to_string()),
                _ => return Err(ShellParseError::Usage(USAGE)),
            }
        }
        Ok(ShellCommand::Find { code, location })
    }
}

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Output(String),
    Error(String),
    Quit(String),
}

/// 执行一条命令
pub fn execute(state: &mut AppState, command: ShellCommand) -> ShellOutcome {
    let result = match command {
        ShellCommand::Empty => Ok(String::new()),
        ShellCommand::Help => Ok(state.tr("shell.help").trim_end().to_string()),
        ShellCommand::Quit => return ShellOutcome::Quit(state.tr("shell.bye")),
        ShellCommand::Load(path) => commands::load_table(state, &path),
        ShellCommand::Save(path) => commands::save_table(state, &path),
        ShellCommand::Export(path) => commands::export_table(state, &path),
        ShellCommand::Count { row, value } => commands::count_row(state, &row, &value),
        ShellCommand::Fill(value) => commands::fill_counts(state, &value),
        ShellCommand::Reconcile => commands::reconcile_table(state),
        ShellCommand::Summary => commands::show_summary(state),
        ShellCommand::Find { code, location } => {
            commands::find_items(state, code.as_deref(), location.as_deref())
        }
        ShellCommand::Shortages => commands::show_shortages(state),
        ShellCommand::Overages => commands::show_overages(state),
        ShellCommand::All => commands::show_all(state),
        ShellCommand::Sort(direction) => commands::sort_table(state, direction),
    };
    match result {
        Ok(text) => ShellOutcome::Output(text),
        Err(line) => ShellOutcome::Error(line),
    }
}

/// 解析并执行一行输入
pub fn execute_line(state: &mut AppState, line: &str) -> ShellOutcome {
    match ShellCommand::parse(line) {
        Ok(command) => execute(state, command),
        Err(ShellParseError::Unknown(name)) => ShellOutcome::Error(
            state.tr_args("shell.unknown_command", &[("command", name.as_str())]),
        ),
        Err(ShellParseError::Usage(usage)) => {
            ShellOutcome::Error(state.tr_args("shell.usage", &[("usage", usage)]))
        }
    }
}

/// 读取一行原始字节（去掉行尾）
///
/// # 返回
/// - Ok(None): EOF
/// - Ok(Some(Err(_))): 该行不是合法 UTF-8
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<Result<String, FromUtf8Error>>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8(buf)))
}

/// 运行会话循环
///
/// # 参数
/// - input: 命令来源（stdin 或测试输入）
/// - output: 输出目标
/// - interactive: 是否打印提示符
pub fn run<R: BufRead, W: Write>(
    state: &mut AppState,
    mut input: R,
    output: &mut W,
    interactive: bool,
) -> io::Result<()> {
    writeln!(
        output,
        "{}",
        state.tr_args("shell.welcome", &[("version", crate::VERSION)])
    )?;

    loop {
        if interactive {
            write!(output, "{}", state.tr("shell.prompt"))?;
            output.flush()?;
        }
        let Some(line) = read_line(&mut input)? else {
            break;
        };
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(bytes = e.as_bytes().len(), "linha de entrada não é UTF-8");
                writeln!(
                    output,
                    "{} [INVALID_INPUT]: {}",
                    state.tr("shell.error"),
                    state.tr("shell.invalid_utf8")
                )?;
                continue;
            }
        };

        match execute_line(state, &line) {
            ShellOutcome::Output(text) if text.is_empty() => {}
            ShellOutcome::Output(text) => writeln!(output, "{}", text)?,
            ShellOutcome::Error(text) => {
                tracing::debug!(command = %line.trim(), "comando falhou");
                writeln!(output, "{}", text)?
            }
            ShellOutcome::Quit(text) => {
                writeln!(output, "{}", text)?;
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("  "), Ok(ShellCommand::Empty));
        assert_eq!(
            ShellCommand::parse("load \"minha planilha.xlsx\""),
            Ok(ShellCommand::Load("minha planilha.xlsx".into()))
        );
        assert_eq!(
            ShellCommand::parse("COUNT 3 7,5"),
            Ok(ShellCommand::Count {
                row: "3".into(),
                value: "7,5".into()
            })
        );
        assert_eq!(
            ShellCommand::parse("sort desc"),
            Ok(ShellCommand::Sort(SortDirection::Descending))
        );
        assert_eq!(
            ShellCommand::parse("find --location A-01"),
            Ok(ShellCommand::Find {
                code: None,
                location: Some("A-01".into())
            })
        );
        assert_eq!(ShellCommand::parse("quit"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ShellCommand::parse("dance"),
            Err(ShellParseError::Unknown("dance".into()))
        );
        assert!(matches!(ShellCommand::parse("count 1"), Err(ShellParseError::Usage(_))));
        assert!(matches!(ShellCommand::parse("sort up"), Err(ShellParseError::Usage(_))));
        assert!(matches!(ShellCommand::parse("find --code"), Err(ShellParseError::Usage(_))));
        assert!(matches!(ShellCommand::parse("load"), Err(ShellParseError::Usage(_))));
    }

    #[test]
    fn test_failed_command_does_not_end_session() {
        let mut state = AppState::default();
        let input = b"summary\nbogus\nhelp\nquit\nsummary\n" as &[u8];
        let mut output = Vec::new();

        run(&mut state, input, &mut output, false).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("NO_TABLE_LOADED"));
        assert!(text.contains("bogus"));
        assert!(text.contains("reconcile"));
        assert!(text.trim_end().ends_with("Até logo."));
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let mut state = AppState::default();
        let input = b"help\n\xff\xfe\r\nbogus\nquit\n" as &[u8];
        let mut output = Vec::new();

        run(&mut state, input, &mut output, false).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("ERRO [INVALID_INPUT]"));
        assert!(text.contains("Comando desconhecido: 'bogus'"));
        assert!(text.trim_end().ends_with("Até logo."));
    }
}
