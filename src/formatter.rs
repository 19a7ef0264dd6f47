//! Code formatting for generated test sources.
//!
//! [`BuiltinFormatter`] is a small deterministic layout pass aimed at the
//! JavaScript the skeletons produce. It is not a JavaScript parser: it
//! tracks string, template and comment boundaries plus bracket depth, and
//! nothing more. [`ExternalFormatter`] hands the text to an outside program
//! such as prettier.

use std::fmt;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// An opening bracket was never closed.
    Unbalanced { expected: char, line: usize },
    /// A closing bracket with no matching opener.
    UnexpectedCloser { found: char, line: usize },
    UnterminatedString { line: usize },
    /// The external formatter could not be run or rejected the input.
    External(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Unbalanced { expected, line } => {
                write!(f, "bracket opened on line {} is never closed (expected '{}')", line, expected)
            }
            FormatError::UnexpectedCloser { found, line } => {
                write!(f, "unexpected '{}' on line {}", found, line)
            }
            FormatError::UnterminatedString { line } => {
                write!(f, "unterminated string literal on line {}", line)
            }
            FormatError::External(msg) => write!(f, "external formatter failed: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Pretty-prints generated source text.
#[async_trait::async_trait]
pub trait CodeFormatter: Send + Sync {
    async fn format(&self, source: &str) -> Result<String, FormatError>;

    fn name(&self) -> &str;
}

/// Deterministic, idempotent layout for generated JavaScript.
///
/// - drops empty list entries left by empty conditionals (`{ code, , }`
///   becomes `{ code }`)
/// - collapses runs of spaces outside literals
/// - indents two spaces per line that leaves a bracket open
/// - removes blank lines at block edges and collapses repeated ones
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatter;

impl BuiltinFormatter {
    pub fn format_str(&self, source: &str) -> Result<String, FormatError> {
        let source = source.replace("\r\n", "\n");
        let lines = layout(&source)?;
        Ok(render_lines(&lines))
    }
}

#[async_trait::async_trait]
impl CodeFormatter for BuiltinFormatter {
    async fn format(&self, source: &str) -> Result<String, FormatError> {
        self.format_str(source)
    }

    fn name(&self) -> &str {
        "builtin"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Str(char),
    LineComment,
}

#[derive(Debug)]
struct Line {
    text: String,
    /// Source lines of the brackets still open when the line starts.
    openers: Vec<usize>,
    /// Continuation of a template literal; emitted verbatim.
    raw: bool,
}

fn closer_of(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn is_opener(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Last non-whitespace character already emitted.
fn last_emitted(current: &str, lines: &[Line]) -> Option<char> {
    current.trim_end().chars().last().or_else(|| {
        lines
            .iter()
            .rev()
            .find_map(|line| line.text.trim_end().chars().last())
    })
}

/// A comma survives unless it would be empty: nothing before it in its list,
/// or nothing after it.
fn keep_comma(current: &str, lines: &[Line], rest: &[char]) -> bool {
    if last_emitted(current, lines).is_some_and(|c| is_opener(c) || c == ',') {
        return false;
    }
    match rest.iter().find(|c| !c.is_whitespace() && **c != ',') {
        Some(next) => !is_closer(*next),
        None => false,
    }
}

fn layout(source: &str) -> Result<Vec<Line>, FormatError> {
    let chars: Vec<char> = source.chars().collect();
    let mut lines: Vec<Line> = Vec::new();
    let mut current = String::new();
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut state = State::Code;
    let mut line_no = 1;
    let mut line_openers: Vec<usize> = Vec::new();
    let mut line_raw = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == '\n' {
            match state {
                State::Str('`') => {}
                State::Str(_) => return Err(FormatError::UnterminatedString { line: line_no }),
                State::LineComment => state = State::Code,
                State::Code => {}
            }
            lines.push(Line {
                text: std::mem::take(&mut current),
                openers: std::mem::take(&mut line_openers),
                raw: line_raw,
            });
            line_no += 1;
            line_openers = stack.iter().map(|(_, line)| *line).collect();
            line_raw = state == State::Str('`');
            i += 1;
            continue;
        }

        match state {
            State::LineComment => current.push(c),
            State::Str(quote) => {
                current.push(c);
                if c == '\\' {
                    if let Some(escaped) = next.filter(|n| *n != '\n') {
                        current.push(escaped);
                        i += 1;
                    }
                } else if c == quote {
                    state = State::Code;
                }
            }
            State::Code => match c {
                '\r' => {}
                '\\' => {
                    // Escapes outside strings only occur in regex literals.
                    current.push(c);
                    if let Some(escaped) = next.filter(|n| *n != '\n') {
                        current.push(escaped);
                        i += 1;
                    }
                }
                '"' | '\'' | '`' => {
                    current.push(c);
                    state = State::Str(c);
                }
                '/' if next == Some('/') => {
                    current.push_str("//");
                    state = State::LineComment;
                    i += 1;
                }
                ' ' | '\t' => {
                    if !current.ends_with(' ') {
                        current.push(' ');
                    }
                }
                ',' => {
                    if keep_comma(&current, &lines, &chars[i + 1..]) {
                        current.push(c);
                    }
                }
                c if is_opener(c) => {
                    stack.push((c, line_no));
                    current.push(c);
                }
                c if is_closer(c) => {
                    match stack.pop() {
                        Some((open, _)) if closer_of(open) == c => {}
                        _ => return Err(FormatError::UnexpectedCloser { found: c, line: line_no }),
                    }
                    current.push(c);
                }
                _ => current.push(c),
            },
        }
        i += 1;
    }

    if let State::Str(_) = state {
        return Err(FormatError::UnterminatedString { line: line_no });
    }
    if let Some((open, line)) = stack.last() {
        return Err(FormatError::Unbalanced {
            expected: closer_of(*open),
            line: *line,
        });
    }
    if !current.is_empty() {
        lines.push(Line {
            text: current,
            openers: line_openers,
            raw: line_raw,
        });
    }
    Ok(lines)
}

/// One level per source line that still has a bracket open, so
/// `test("a", async () => {` indents its body once, not twice.
fn indent_level(openers: &[usize], leading_closers: usize) -> usize {
    let live = &openers[..openers.len().saturating_sub(leading_closers)];
    let mut lines = live.to_vec();
    lines.dedup();
    lines.len()
}

fn render_lines(lines: &[Line]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut pending_blank = false;

    for line in lines {
        if line.raw {
            out.push(line.text.clone());
            pending_blank = false;
            continue;
        }
        let text = line.text.trim();
        if text.is_empty() {
            pending_blank = true;
            continue;
        }

        let leading_closers = text.chars().take_while(|c| is_closer(*c)).count();
        let after_opener = out
            .last()
            .and_then(|prev| prev.trim_end().chars().last())
            .is_some_and(is_opener);
        if pending_blank && !out.is_empty() && !after_opener && leading_closers == 0 {
            out.push(String::new());
        }
        pending_blank = false;

        let indent = indent_level(&line.openers, leading_closers);
        out.push(format!("{}{}", "  ".repeat(indent), text));
    }

    if out.is_empty() {
        return String::new();
    }
    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Formatter that pipes source through an external command's stdin/stdout.
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    program: String,
    args: Vec<String>,
}

impl ExternalFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `npx prettier --stdin-filepath <file_name>`.
    pub fn prettier(file_name: &str) -> Self {
        Self::new(
            "npx",
            vec![
                "prettier".to_string(),
                "--stdin-filepath".to_string(),
                file_name.to_string(),
            ],
        )
    }
}

#[async_trait::async_trait]
impl CodeFormatter for ExternalFormatter {
    async fn format(&self, source: &str) -> Result<String, FormatError> {
        debug!(program = %self.program, "running external formatter");
        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| FormatError::External(format!("failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .await
                .map_err(|e| FormatError::External(format!("failed to write stdin: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| FormatError::External(format!("failed to wait for {}: {}", self.program, e)))?;
        if !output.status.success() {
            return Err(FormatError::External(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| FormatError::External(format!("non-UTF-8 output: {}", e)))
    }

    fn name(&self) -> &str {
        &self.program
    }
}
