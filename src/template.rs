//! Placeholder substitution for test skeletons.
//!
//! Skeletons carry three kinds of markers:
//!
//! - **Block** markers, `// ##NAME##` on a line of their own, replaced by a
//!   multi-line fragment. An empty fragment removes the line.
//! - **Inline** markers, `##NAME##` anywhere in a line, replaced by a single
//!   token.
//! - **Conditional** markers, `##NAME-CONDITIONAL##`, replaced by the
//!   variable a block declares when that block is non-empty, and by nothing
//!   otherwise. This is how a call site references `args` only when an
//!   `args` declaration was emitted.
//!
//! Substitution is a single pass over the skeleton: text inserted for one
//! marker is never rescanned for others.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##([A-Z][A-Z0-9-]*)##").expect("marker pattern"));

const CONDITIONAL_SUFFIX: &str = "-CONDITIONAL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The skeleton references a marker no fragment was supplied for.
    UnresolvedMarker { marker: String },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnresolvedMarker { marker } => {
                write!(f, "no fragment supplied for marker ##{}##", marker)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Debug, Clone)]
struct Block {
    code: String,
    variable: Option<&'static str>,
}

/// Named fragments to splice into a skeleton.
#[derive(Debug, Clone, Default)]
pub struct Fragments {
    blocks: BTreeMap<&'static str, Block>,
    inline: BTreeMap<&'static str, String>,
}

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block fragment with no paired conditional.
    pub fn block(mut self, name: &'static str, code: impl Into<String>) -> Self {
        self.blocks.insert(
            name,
            Block {
                code: code.into(),
                variable: None,
            },
        );
        self
    }

    /// A block fragment declaring `variable`; `##NAME-CONDITIONAL##` renders
    /// as `variable` when `code` is non-empty.
    pub fn gated_block(
        mut self,
        name: &'static str,
        variable: &'static str,
        code: impl Into<String>,
    ) -> Self {
        self.blocks.insert(
            name,
            Block {
                code: code.into(),
                variable: Some(variable),
            },
        );
        self
    }

    pub fn inline(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.inline.insert(name, value.into());
        self
    }

    fn resolve_inline(&self, marker: &str) -> Option<&str> {
        if let Some(block_name) = marker.strip_suffix(CONDITIONAL_SUFFIX) {
            let block = self.blocks.get(block_name)?;
            let variable = block.variable?;
            return Some(if block.code.trim().is_empty() {
                ""
            } else {
                variable
            });
        }
        self.inline.get(marker).map(String::as_str)
    }

    fn knows(&self, marker: &str) -> bool {
        self.blocks.contains_key(marker) || self.resolve_inline(marker).is_some()
    }
}

/// Substitute every marker in `skeleton`.
///
/// Fails before producing any output if the skeleton names a marker that
/// `fragments` cannot resolve.
pub fn render(skeleton: &str, fragments: &Fragments) -> Result<String, TemplateError> {
    if let Some(marker) = MARKER_RE
        .captures_iter(skeleton)
        .map(|caps| caps[1].to_string())
        .find(|marker| !fragments.knows(marker))
    {
        return Err(TemplateError::UnresolvedMarker { marker });
    }

    let mut out = String::with_capacity(skeleton.len());
    for line in skeleton.lines() {
        if let Some(block) = block_marker(line).and_then(|name| fragments.blocks.get(name)) {
            let indent = &line[..line.len() - line.trim_start().len()];
            for code_line in block.code.lines() {
                if code_line.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(indent);
                    out.push_str(code_line);
                    out.push('\n');
                }
            }
            continue;
        }

        let replaced = MARKER_RE.replace_all(line, |caps: &Captures<'_>| {
            fragments.resolve_inline(&caps[1]).unwrap_or_default().to_string()
        });
        out.push_str(&replaced);
        out.push('\n');
    }
    Ok(out)
}

/// Name of the block marker on `line`, if the line is exactly `// ##NAME##`.
fn block_marker(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix("//")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix("##"))
        .and_then(|rest| rest.strip_suffix("##"))
        .filter(|name| !name.is_empty() && !name.contains('#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKELETON: &str = "\
test(##TEST-NAME##, async () => {
  // ##ADDRESS-MAP##
  // ##ARGUMENTS##
  const result = await run({ code, ##ADDRESS-MAP-CONDITIONAL##, ##ARGUMENTS-CONDITIONAL## });
});
";

    #[test]
    fn test_empty_blocks_disappear() {
        let fragments = Fragments::new()
            .inline("TEST-NAME", "\"Read\"")
            .gated_block("ADDRESS-MAP", "addressMap", "")
            .gated_block("ARGUMENTS", "args", "");

        let out = render(SKELETON, &fragments).unwrap();
        assert!(!out.contains("##"));
        assert!(!out.contains("addressMap"));
        assert!(!out.contains("args"));
        assert_eq!(
            out,
            "test(\"Read\", async () => {\n  const result = await run({ code, ,  });\n});\n"
        );
    }

    #[test]
    fn test_filled_blocks_are_indented_and_referenced() {
        let fragments = Fragments::new()
            .inline("TEST-NAME", "\"Read\"")
            .gated_block("ADDRESS-MAP", "addressMap", "const addressMap = {\n  Foo: Alice,\n};")
            .gated_block("ARGUMENTS", "args", "");

        let out = render(SKELETON, &fragments).unwrap();
        assert!(out.contains("  const addressMap = {\n    Foo: Alice,\n  };\n"));
        assert!(out.contains("run({ code, addressMap,  })"));
    }

    #[test]
    fn test_missing_fragment_is_an_error() {
        let fragments = Fragments::new().inline("TEST-NAME", "\"x\"");
        assert_eq!(
            render(SKELETON, &fragments),
            Err(TemplateError::UnresolvedMarker {
                marker: "ADDRESS-MAP".to_string()
            })
        );
    }

    #[test]
    fn test_conditional_requires_a_gated_block() {
        let fragments = Fragments::new().block("ARGUMENTS", "const args = [];");
        let err = render("f(##ARGUMENTS-CONDITIONAL##)", &fragments).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnresolvedMarker {
                marker: "ARGUMENTS-CONDITIONAL".to_string()
            }
        );
    }

    #[test]
    fn test_inserted_text_is_not_rescanned() {
        let fragments = Fragments::new()
            .inline("TEST-NAME", "\"##ENTITY-NAME##\"")
            .inline("ENTITY-NAME", "\"scripts\"");
        let out = render("test(##TEST-NAME##, ##ENTITY-NAME##)", &fragments).unwrap();
        assert_eq!(out, "test(\"##ENTITY-NAME##\", \"scripts\")\n");
    }

    #[test]
    fn test_block_marker_detection() {
        assert_eq!(block_marker("  // ##ACCOUNTS##"), Some("ACCOUNTS"));
        assert_eq!(block_marker("//##ACCOUNTS##"), Some("ACCOUNTS"));
        assert_eq!(block_marker("foo(##ACCOUNTS##)"), None);
        assert_eq!(block_marker("// plain comment"), None);
    }
}
