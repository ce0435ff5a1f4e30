//! Notes embedded in pull request descriptions.
//!
//! A note is a title followed by a colon and a fenced block:
//!
//! ````markdown
//! **Release note**:
//! ```
//! Widgets can now be renamed.
//! ```
//! ````
//!
//! Besides parsing, this module turns NDJSON records carrying a description
//! into one record per note found in it.

use std::io::{BufRead, Write};

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Title optionally wrapped in `*`, a colon, whitespace, then a fenced block
/// whose opening fence may carry an info string. Group 1 is the title,
/// group 2 the fenced content.
pub const DEFAULT_NOTE_PATTERN: &str =
    r"[\*]*([^\*:\n]+)[\*]*:\s*```[^\n]*\n((?s:.*?))\n```";

/// Replace `\r\n` and lone `\r` with `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// A titled note found in a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub body: String,
}

/// Finds notes using a pattern with a title group and a body group.
#[derive(Debug, Clone)]
pub struct NoteParser {
    regex: Regex,
}

impl NoteParser {
    /// Compile a note pattern.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// All notes in `text`, in order. Newlines are normalized first.
    #[must_use]
    pub fn notes(&self, text: &str) -> Vec<Note> {
        let text = normalize_newlines(text);
        self.regex
            .captures_iter(&text)
            .map(|caps| Note {
                title: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                body: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            })
            .collect()
    }
}

/// Field names used when expanding NDJSON records into notes.
#[derive(Debug, Clone)]
pub struct NoteKeys {
    /// Field holding the description to search.
    pub body: String,
    /// Field receiving the note title.
    pub kind: String,
    /// Field receiving the note content.
    pub desc: String,
}

impl Default for NoteKeys {
    fn default() -> Self {
        Self {
            body: "body".into(),
            kind: "kind".into(),
            desc: "description".into(),
        }
    }
}

/// Read NDJSON records from `input` and write one record per note to `output`.
///
/// Each emitted record is the input record without the body field, plus the
/// kind and desc fields. Blank lines are skipped. Returns the number of
/// records written.
///
/// # Errors
/// Returns [`Error::Record`] if a line is not a JSON object, lacks the body
/// field, or the body is not a string.
pub fn extract<R: BufRead, W: Write>(
    parser: &NoteParser,
    keys: &NoteKeys,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut written = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record: Map<String, Value> =
            serde_json::from_str(&line).map_err(|e| Error::Record {
                line: line_no,
                message: e.to_string(),
            })?;

        let body = match record.get(&keys.body) {
            Some(Value::String(body)) => body.clone(),
            Some(other) => {
                return Err(Error::Record {
                    line: line_no,
                    message: format!("expected \"{}\" to be a string, got {other}", keys.body),
                });
            }
            None => {
                return Err(Error::Record {
                    line: line_no,
                    message: format!("required key \"{}\" does not exist", keys.body),
                });
            }
        };

        for note in parser.notes(&body) {
            let mut out = record.clone();
            out.remove(&keys.body);
            out.insert(keys.kind.clone(), Value::String(note.title));
            out.insert(keys.desc.clone(), Value::String(note.body));
            serde_json::to_writer(&mut output, &out)?;
            writeln!(output)?;
            written += 1;
        }
    }

    tracing::debug!(records = written, "extracted notes");
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parser() -> NoteParser {
        NoteParser::new(DEFAULT_NOTE_PATTERN).unwrap()
    }

    fn titles_and_bodies(text: &str) -> Vec<(String, String)> {
        parser()
            .notes(text)
            .into_iter()
            .map(|n| (n.title, n.body))
            .collect()
    }

    fn pair(title: &str, body: &str) -> (String, String) {
        (title.to_string(), body.to_string())
    }

    // === Parsing ===

    #[test]
    fn test_plain_title() {
        assert_eq!(
            titles_and_bodies("mynote1:\n```\nNOTE1\n```\n"),
            vec![pair("mynote1", "NOTE1")]
        );
    }

    #[test]
    fn test_bold_title_multiline_body() {
        assert_eq!(
            titles_and_bodies("**mynote1**:\n```\nNOTE1\nNOTE2\n```\n"),
            vec![pair("mynote1", "NOTE1\nNOTE2")]
        );
    }

    #[test]
    fn test_crlf_and_multiple_notes() {
        assert_eq!(
            titles_and_bodies(
                "changelog1:\r\n```\r\nchange1\r\n```\r\n\r\n**changelog2**:\r\n```\r\nchange2\r\n```\r\n"
            ),
            vec![pair("changelog1", "change1"), pair("changelog2", "change2")]
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(
            titles_and_bodies("releasenote:\n```\nreleasenotecontent\n```"),
            vec![pair("releasenote", "releasenotecontent")]
        );
    }

    #[test]
    fn test_blank_line_before_fence() {
        assert_eq!(
            titles_and_bodies("changelog1:\r\n\r\n```\r\nchange1\r\n```\r\n"),
            vec![pair("changelog1", "change1")]
        );
    }

    #[test]
    fn test_info_string_on_fence() {
        assert_eq!(
            titles_and_bodies("changelog1:\r\n```foobar\r\nchange1\r\n```\r\n"),
            vec![pair("changelog1", "change1")]
        );
    }

    #[test]
    fn test_inline_code_in_body() {
        assert_eq!(
            titles_and_bodies("changelog1:\r\n```\r\nchange `foo` to `bar`\r\n second line \r\n```\r\n"),
            vec![pair("changelog1", "change `foo` to `bar`\n second line ")]
        );
    }

    #[test]
    fn test_no_notes() {
        assert!(parser().notes("Just a description.").is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            NoteParser::new("(unclosed"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    // === NDJSON ===

    #[test]
    fn test_extract_one_record_per_note() {
        let input = concat!(
            r#"{"number":1,"body":"a:\n```\nfirst\n```\nb:\n```\nsecond\n```"}"#,
            "\n",
            "\n",
            r#"{"number":2,"body":"nothing here"}"#,
            "\n"
        );
        let mut out = Vec::new();

        let written = extract(&parser(), &NoteKeys::default(), input.as_bytes(), &mut out).unwrap();

        assert_eq!(written, 2);
        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            lines[0],
            serde_json::json!({"number": 1, "kind": "a", "description": "first"})
        );
        assert_eq!(
            lines[1],
            serde_json::json!({"number": 1, "kind": "b", "description": "second"})
        );
    }

    #[test]
    fn test_extract_custom_keys() {
        let keys = NoteKeys {
            body: "text".into(),
            kind: "title".into(),
            desc: "content".into(),
        };
        let input = r#"{"text":"x:\n```\ny\n```"}"#;
        let mut out = Vec::new();

        extract(&parser(), &keys, input.as_bytes(), &mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!({"title": "x", "content": "y"}));
    }

    #[test]
    fn test_extract_missing_key() {
        let err = extract(
            &parser(),
            &NoteKeys::default(),
            r#"{"title":"x"}"#.as_bytes(),
            Vec::new(),
        )
        .unwrap_err();

        match err {
            Error::Record { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("required key \"body\""));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_non_string_body() {
        let err = extract(
            &parser(),
            &NoteKeys::default(),
            r#"{"body":42}"#.as_bytes(),
            Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Record { ref message, .. } if message.contains("string")));
    }

    #[test]
    fn test_extract_invalid_json() {
        let err = extract(
            &parser(),
            &NoteKeys::default(),
            "{not json".as_bytes(),
            Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Record { line: 1, .. }));
    }
}
