use tracing::warn;

use crate::chapters::{self, ChapterMeta};
use crate::model::{ChapterPayload, PracticeQuestion, SourceBook, SourceChapter};
use crate::normalize::QuestionNormalizer;

pub const SOURCE_TAG: &str = "ic-joshi";
pub const DEFAULT_BOOK_NAME: &str = "MET_IC_Joshi_7 Edition";

#[derive(Debug, Clone)]
pub struct ChapterOutput {
    pub meta: &'static ChapterMeta,
    pub payload: ChapterPayload,
}

impl ChapterOutput {
    pub fn question_count(&self) -> usize {
        self.payload.questions.len()
    }
}

#[derive(Debug, Default)]
pub struct TransformReport {
    pub chapters: Vec<ChapterOutput>,
    pub skipped_chapters: Vec<String>,
    pub skipped_questions: usize,
    pub unresolved_answers: usize,
    pub warnings: Vec<String>,
}

pub fn transform_book(book: &SourceBook, normalizer: &QuestionNormalizer) -> TransformReport {
    let mut report = TransformReport::default();
    let book_name = book.declared_title().unwrap_or(DEFAULT_BOOK_NAME);

    for chapter in book.chapters() {
        let title = chapter.title();
        let Some(meta) = chapters::resolve(title) else {
            warn!(chapter = %title, "no slug mapping for chapter, skipping");
            report
                .warnings
                .push(format!("no slug mapping for chapter: {title}"));
            report.skipped_chapters.push(title.to_string());
            continue;
        };

        let questions = normalize_chapter(meta, chapter, normalizer, &mut report);
        report.chapters.push(ChapterOutput {
            meta,
            payload: ChapterPayload {
                book_name: book_name.to_string(),
                chapter_number: chapter.chapter_number.clone(),
                chapter_title: meta.title.to_string(),
                chapter_slug: meta.slug.to_string(),
                source: SOURCE_TAG.to_string(),
                questions,
            },
        });
    }

    report
}

fn normalize_chapter(
    meta: &ChapterMeta,
    chapter: &SourceChapter,
    normalizer: &QuestionNormalizer,
    report: &mut TransformReport,
) -> Vec<PracticeQuestion> {
    let mut questions = Vec::with_capacity(chapter.questions().len());

    for (index, question) in chapter.questions().iter().enumerate() {
        let number = question.declared_number().unwrap_or_default();
        match normalizer.build_question(meta.slug, question, index) {
            Ok(normalized) => {
                if !normalized.answer_matched {
                    let answer = question.answer.as_deref().unwrap_or_default();
                    warn!(
                        id = %normalized.question.id,
                        answer = %answer,
                        "answer matches no option, using first option"
                    );
                    report.warnings.push(format!(
                        "answer '{answer}' matches no option in {}, using first option",
                        normalized.question.id
                    ));
                    report.unresolved_answers += 1;
                }
                questions.push(normalized.question);
            }
            Err(rejection) => {
                warn!(
                    chapter = %meta.source_title,
                    question = %number,
                    reason = %rejection,
                    "skipping malformed question"
                );
                report.warnings.push(format!(
                    "skipped malformed question {number} in chapter {}: {rejection}",
                    meta.source_title
                ));
                report.skipped_questions += 1;
            }
        }
    }

    questions
}
