//! Argument lists for cpdf invocations
//!
//! Arguments are kept as discrete tokens and handed to the process as argv,
//! so values containing spaces (box geometry, color names) never need
//! quoting. Paths are kept as raw OS strings so non UTF-8 file names reach
//! cpdf unchanged. The `Display` rendering quotes tokens only for logs and
//! errors.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};

/// Ordered argument tokens for a single cpdf invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<OsString>,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single token
    pub fn arg(mut self, token: impl Into<OsString>) -> Self {
        self.tokens.push(token.into());
        self
    }

    /// Append every token in order
    pub fn args<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Append a path token, byte for byte
    pub fn path(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }

    /// Append `token` only when `value` is present and non-empty
    pub fn arg_if_present(self, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.arg(v),
            _ => self,
        }
    }

    /// Append `-o <path>`
    pub fn output(self, path: &Path) -> Self {
        self.arg("-o").path(path)
    }

    pub fn tokens(&self) -> &[OsString] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if `expected` appears as a contiguous run of tokens
    pub fn contains_sequence(&self, expected: &[&str]) -> bool {
        if expected.is_empty() {
            return true;
        }
        self.tokens
            .windows(expected.len())
            .any(|w| w.iter().zip(expected).all(|(a, b)| a == b))
    }
}

/// Serialized as an array of lossy UTF-8 strings
impl Serialize for CommandLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tokens.iter().map(|t| t.to_string_lossy()))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", quote_token(&token.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// Shell-style rendering of one token
fn quote_token(token: &str) -> String {
    let needs_quotes = token.is_empty() || token.chars().any(needs_quoting);
    if !needs_quotes {
        return token.to_string();
    }

    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push('"');
    for c in token.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn needs_quoting(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '"' | '\'' | '\\' | '$' | '`' | ';' | '&' | '|' | '*' | '?' | '(' | ')' | '<' | '>'
                | '[' | ']' | '{' | '}' | '#' | '~' | '!'
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_builds_tokens_in_order() {
        let out = PathBuf::from("/tmp/out.pdf");
        let cmd = CommandLine::new()
            .arg("-blacktext")
            .path(Path::new("in.pdf"))
            .output(&out);
        assert_eq!(cmd.tokens(), &["-blacktext", "in.pdf", "-o", "/tmp/out.pdf"]);
    }

    #[test]
    fn test_display_quotes_tokens_with_spaces() {
        let cmd = CommandLine::new().arg("-mediabox").arg("0 0 100 200").arg("in.pdf");
        assert_eq!(cmd.to_string(), r#"-mediabox "0 0 100 200" in.pdf"#);
    }

    #[test]
    fn test_display_escapes_embedded_quotes() {
        let cmd = CommandLine::new().arg("-color").arg(r#"a "b""#);
        assert_eq!(cmd.to_string(), r#"-color "a \"b\"""#);
    }

    #[test]
    fn test_display_quotes_empty_token() {
        let cmd = CommandLine::new().arg("");
        assert_eq!(cmd.to_string(), r#""""#);
    }

    #[test]
    fn test_display_quotes_shell_metacharacters() {
        for token in ["a;b", "x&y", "p|q", "*.pdf", "(1)", "<in", "out>", "#1", "~/in.pdf"] {
            let rendered = CommandLine::new().arg(token).to_string();
            assert_eq!(rendered, format!("\"{}\"", token));
        }
        assert_eq!(CommandLine::new().arg("1-3,odd").to_string(), "1-3,odd");
    }

    #[cfg(unix)]
    #[test]
    fn test_path_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"out\xff.pdf");
        let cmd = CommandLine::new().arg("-o").path(Path::new(raw));
        assert_eq!(cmd.tokens()[1].as_bytes(), b"out\xff.pdf");
        assert_eq!(cmd.to_string(), "-o out\u{fffd}.pdf");
    }

    #[test]
    fn test_arg_if_present_skips_missing_and_empty() {
        let cmd = CommandLine::new()
            .arg_if_present(None)
            .arg_if_present(Some(""))
            .arg_if_present(Some("1-3"));
        assert_eq!(cmd.tokens(), &["1-3"]);
    }

    #[test]
    fn test_contains_sequence() {
        let cmd = CommandLine::new().args(["-color", "red", "in.pdf"]);
        assert!(cmd.contains_sequence(&["-color", "red"]));
        assert!(!cmd.contains_sequence(&["red", "-color"]));
        assert!(cmd.contains_sequence(&[]));
    }

    #[test]
    fn test_serializes_as_token_array() {
        let cmd = CommandLine::new().args(["-pages", "in.pdf"]);
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"["-pages","in.pdf"]"#);
    }
}
