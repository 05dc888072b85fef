use anyhow::{Context, Result};
use regex::Regex;
use thiserror::Error;

use crate::model::{PracticeQuestion, SourceQuestion};

const OPTION_LABELS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const DEFAULT_QUESTION_TYPE: &str = "MCQ";

pub fn option_label(index: usize) -> Option<char> {
    OPTION_LABELS.get(index).map(|byte| char::from(*byte))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    pub letter: char,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionRejection {
    #[error("question has no options")]
    NoOptions,
    #[error("question has {0} options, more than there are option letters")]
    TooManyOptions(usize),
}

#[derive(Debug, Clone)]
pub struct NormalizedQuestion {
    pub question: PracticeQuestion,
    /// False when the answer letter matched no option and the first option was used.
    pub answer_matched: bool,
}

pub struct QuestionNormalizer {
    option_marker: Regex,
}

impl QuestionNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            option_marker: Regex::new(r"^\(\s*([A-Za-z])\s*\)\s*[).:\-]*\s*")
                .context("failed to compile option marker regex")?,
        })
    }

    /// Splits a leading `(x)` marker off an option. Without a marker the
    /// letter comes from `fallback_index`, which must be below 26.
    pub fn parse_option(&self, raw: &str, fallback_index: usize) -> ParsedOption {
        let trimmed = raw.trim();
        let (letter, text) = match self.option_marker.captures(trimmed) {
            Some(captures) => {
                let marker_end = captures.get(0).map_or(0, |m| m.end());
                let letter = captures
                    .get(1)
                    .and_then(|m| m.as_str().chars().next())
                    .map(|ch| ch.to_ascii_lowercase())
                    .unwrap_or('a');
                (letter, trimmed[marker_end..].trim())
            }
            None => (option_label(fallback_index).unwrap_or('a'), trimmed),
        };

        let text = if text.is_empty() {
            format!("Option {}", letter.to_ascii_uppercase())
        } else {
            text.to_string()
        };

        ParsedOption { letter, text }
    }

    pub fn build_question(
        &self,
        chapter_slug: &str,
        question: &SourceQuestion,
        index: usize,
    ) -> Result<NormalizedQuestion, QuestionRejection> {
        let question_number = question
            .declared_number()
            .unwrap_or_else(|| format!("Q{}", index + 1));

        let raw_options = question.options();
        if raw_options.is_empty() {
            return Err(QuestionRejection::NoOptions);
        }
        if raw_options.len() > OPTION_LABELS.len() {
            return Err(QuestionRejection::TooManyOptions(raw_options.len()));
        }

        let parsed: Vec<ParsedOption> = raw_options
            .iter()
            .enumerate()
            .map(|(position, raw)| self.parse_option(raw, position))
            .collect();

        let answer_letter = extract_answer_letter(question.answer.as_deref().unwrap_or_default());
        let matched_index =
            answer_letter.and_then(|letter| parsed.iter().position(|opt| opt.letter == letter));
        let correct_index = matched_index.unwrap_or(0);

        let answer = option_label(correct_index).unwrap_or('a').to_string();
        let options: Vec<String> = parsed.into_iter().map(|opt| opt.text).collect();
        let solution = options[correct_index].clone();

        let question_type = match question.question_type.as_deref() {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => DEFAULT_QUESTION_TYPE.to_string(),
        };

        Ok(NormalizedQuestion {
            question: PracticeQuestion {
                id: format!("{chapter_slug}-{}", slugify(&question_number)),
                question_number,
                question: question
                    .question_text
                    .as_deref()
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                question_type,
                options,
                answer,
                solution,
                explanation: String::new(),
            },
            answer_matched: matched_index.is_some(),
        })
    }
}

/// First ASCII letter of the answer, lowercased.
pub fn extract_answer_letter(answer: &str) -> Option<char> {
    answer
        .chars()
        .find(char::is_ascii_alphabetic)
        .map(|ch| ch.to_ascii_lowercase())
}

pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_separator = false;

    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(ch);
        } else {
            pending_separator = true;
        }
    }

    if out.is_empty() {
        "item".to_string()
    } else {
        out
    }
}
