use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::model::SourceBook;

/// Question document compiled into the binary. Its LaTeX fragments carry
/// bare backslashes, so it is not strict JSON until [`escape_backslashes`]
/// runs over it.
pub const EMBEDDED_DOCUMENT: &str = include_str!("../assets/ic-joshi-misc-questions.json");

pub const EMBEDDED_SOURCE_LABEL: &str = "embedded";

#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub label: String,
    pub text: String,
}

pub fn load(source_path: Option<&Path>) -> Result<LoadedSource> {
    match source_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read source document {}", path.display()))?;
            Ok(LoadedSource {
                label: path.display().to_string(),
                text,
            })
        }
        None => Ok(LoadedSource {
            label: EMBEDDED_SOURCE_LABEL.to_string(),
            text: EMBEDDED_DOCUMENT.to_string(),
        }),
    }
}

/// The document both as written and in its typed form. `raw` keeps every
/// key, null and ordering of the input.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub raw: Value,
    pub book: SourceBook,
}

pub fn parse_document(input: &str) -> Result<ParsedDocument> {
    let text = input.strip_prefix('\u{feff}').unwrap_or(input);
    let raw: Value = serde_json::from_str(&escape_backslashes(text))
        .context("failed to parse question document")?;
    let book = serde_json::from_value(raw.clone())
        .context("question document does not have the expected book layout")?;
    Ok(ParsedDocument { raw, book })
}

/// Turns every backslash into a literal one. The last backslash of an odd
/// run directly before a double quote is kept as the quote's escape.
pub fn escape_backslashes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 64);
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let mut run = 1_usize;
        while chars.next_if_eq(&'\\').is_some() {
            run += 1;
        }

        let escapes_quote = run % 2 == 1 && chars.peek() == Some(&'"');
        let literal = if escapes_quote { run - 1 } else { run };
        for _ in 0..literal {
            out.push_str("\\\\");
        }
        if escapes_quote {
            out.push('\\');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_backslashes_keeps_latex_literal() {
        assert_eq!(escape_backslashes(r"$6.5^{\circ}C$"), r"$6.5^{\\circ}C$");
        assert_eq!(escape_backslashes(r"\frac{1}{2}"), r"\\frac{1}{2}");
        assert_eq!(escape_backslashes(r#"say \"hi\""#), r#"say \"hi\""#);
        assert_eq!(escape_backslashes("plain"), "plain");
        assert_eq!(escape_backslashes(r#""path C:\\""#), r#""path C:\\\\""#);
        assert_eq!(escape_backslashes(r#""a \\\" b""#), r#""a \\\\\" b""#);
    }

    #[test]
    fn parse_document_accepts_string_ending_in_escaped_backslash() {
        let input = r#"{"book_title": "T", "data": [{"chapter_title": "X", "questions": [{"question_text": "path C:\\", "options": ["(a) x"], "answer": "(a)"}]}]}"#;
        let document = parse_document(input).expect("document parses");

        let question = &document.book.chapters()[0].questions()[0];
        assert_eq!(question.question_text.as_deref(), Some(r"path C:\\"));
        assert_eq!(question.answer.as_deref(), Some("(a)"));
    }

    #[test]
    fn parse_document_keeps_raw_nulls_and_key_order() {
        let input = r#"{"book_title": "T", "zeta": 1, "data": [{"chapter_title": "UNMAPPED", "chapter_number": null, "questions": [{"question_number": null, "options": null, "answer": "(a)"}]}], "alpha": 2}"#;
        let document = parse_document(input).expect("document parses");

        let keys: Vec<&str> = document
            .raw
            .as_object()
            .map(|object| object.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["book_title", "zeta", "data", "alpha"]);
        assert!(document.raw["data"][0]["chapter_number"].is_null());
        assert!(document.raw["data"][0]["questions"][0]
            .as_object()
            .is_some_and(|question| question.contains_key("options")));
        assert!(document.book.chapters()[0].chapter_number.is_none());
    }

    #[test]
    fn parse_document_strips_bom_and_reads_latex() {
        let raw = "\u{feff}{\"book_title\": \"T\", \"data\": [{\"chapter_title\": \"X\", \"questions\": [{\"question_text\": \"at $5^{\\circ}$\"}]}]}";
        let book = parse_document(raw).expect("document parses").book;

        assert_eq!(book.declared_title(), Some("T"));
        let chapter = &book.chapters()[0];
        assert_eq!(
            chapter.questions()[0].question_text.as_deref(),
            Some(r"at $5^{\circ}$")
        );
    }

    #[test]
    fn parse_document_reports_invalid_json() {
        let err = parse_document("{\"book_title\": ").unwrap_err();
        assert!(err.to_string().contains("failed to parse question document"));
    }

    #[test]
    fn embedded_document_parses_with_expected_chapters() {
        let book = parse_document(EMBEDDED_DOCUMENT)
            .expect("embedded document parses")
            .book;

        assert_eq!(book.declared_title(), Some("MET_IC_Joshi_7 Edition"));
        let titles: Vec<&str> = book.chapters().iter().map(|chapter| chapter.title()).collect();
        assert_eq!(titles, vec!["MISCELLANEOUS QUESTIONS", "ADDITIONAL QUESTIONS - 1"]);
        assert_eq!(book.chapters()[0].questions().len(), 50);
        assert_eq!(book.chapters()[1].questions().len(), 1);

        let third = &book.chapters()[0].questions()[2];
        assert!(
            third
                .question_text
                .as_deref()
                .unwrap_or_default()
                .contains(r"^{\circ}C$")
        );
    }

    #[test]
    fn load_without_path_uses_embedded_document() {
        let loaded = load(None).expect("embedded source loads");
        assert_eq!(loaded.label, EMBEDDED_SOURCE_LABEL);
        assert_eq!(loaded.text, EMBEDDED_DOCUMENT);
    }
}
