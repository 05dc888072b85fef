use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceBook {
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<SourceChapter>>,
}

impl SourceBook {
    /// Title only when it carries text; an empty title counts as absent.
    pub fn declared_title(&self) -> Option<&str> {
        self.book_title.as_deref().filter(|title| !title.is_empty())
    }

    pub fn chapters(&self) -> &[SourceChapter] {
        self.data.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceChapter {
    #[serde(default)]
    pub chapter_title: Option<String>,
    #[serde(default)]
    pub chapter_number: Option<Value>,
    #[serde(default)]
    pub questions: Option<Vec<SourceQuestion>>,
}

impl SourceChapter {
    pub fn title(&self) -> &str {
        self.chapter_title.as_deref().unwrap_or_default().trim()
    }

    pub fn questions(&self) -> &[SourceQuestion] {
        self.questions.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceQuestion {
    #[serde(default)]
    pub question_number: Option<Value>,
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl SourceQuestion {
    /// Declared question number rendered as text. Empty strings, zero, and
    /// non-scalar values count as undeclared.
    pub fn declared_number(&self) -> Option<String> {
        match self.question_number.as_ref()? {
            Value::String(value) if !value.is_empty() => Some(value.clone()),
            Value::Number(value) if value.as_f64() != Some(0.0) => Some(value.to_string()),
            _ => None,
        }
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeQuestion {
    pub id: String,
    pub question_number: String,
    pub question: String,
    pub question_type: String,
    pub options: Vec<String>,
    pub answer: String,
    pub solution: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterPayload {
    pub book_name: String,
    pub chapter_number: Option<Value>,
    pub chapter_title: String,
    pub chapter_slug: String,
    pub source: String,
    pub questions: Vec<PracticeQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFileEntry {
    pub chapter_slug: String,
    pub path: String,
    pub question_count: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source: String,
    pub source_sha256: String,
    pub book_title: Option<String>,
    pub consolidated_path: Option<String>,
    pub files: Vec<GeneratedFileEntry>,
    pub skipped_chapters: Vec<String>,
    pub warnings: Vec<String>,
}
