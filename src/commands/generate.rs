use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::chapters::practice_file_name;
use crate::cli::{GenerateArgs, OutputPaths};
use crate::model::{GeneratedFileEntry, GenerationManifest};
use crate::normalize::QuestionNormalizer;
use crate::source::{self, LoadedSource, ParsedDocument};
use crate::transform::{TransformReport, transform_book};
use crate::util::{
    ensure_directory, now_utc_string, render_json_pretty, sha256_bytes, write_bytes,
    write_json_pretty,
};

const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Consolidated,
    Chapter {
        slug: &'static str,
        question_count: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub kind: ArtifactKind,
}

pub struct Generation {
    pub source: LoadedSource,
    pub document: ParsedDocument,
    pub report: TransformReport,
    pub artifacts: Vec<Artifact>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let practice_dir = args.paths.practice_dir();
    let generation = prepare(&args.paths, args.source_path.as_deref())?;

    info!(
        source = %generation.source.label,
        practice_dir = %practice_dir.display(),
        chapters = generation.document.book.chapters().len(),
        "loaded question document"
    );

    if args.dry_run {
        log_summary(&generation);
        info!("dry-run complete, no files written");
        return Ok(());
    }

    ensure_directory(&practice_dir)?;
    write_artifacts(&generation.artifacts)?;
    log_summary(&generation);

    if let Some(manifest_path) = args.manifest_path.as_deref() {
        let manifest = build_manifest(&generation);
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote generation manifest");
    }

    Ok(())
}

/// Loads, parses and transforms the document and renders every output file
/// in memory, without touching the output directories.
pub fn prepare(paths: &OutputPaths, source_path: Option<&Path>) -> Result<Generation> {
    let source = source::load(source_path)?;
    let document = source::parse_document(&source.text)
        .with_context(|| format!("failed to load question source: {}", source.label))?;
    let normalizer = QuestionNormalizer::new()?;
    let report = transform_book(&document.book, &normalizer);
    let artifacts = render_artifacts(&document, &report, paths)?;

    Ok(Generation {
        source,
        document,
        report,
        artifacts,
    })
}

pub fn render_artifacts(
    document: &ParsedDocument,
    report: &TransformReport,
    paths: &OutputPaths,
) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::with_capacity(report.chapters.len() + 1);

    if document.book.declared_title().is_some() {
        let path = paths.data_file();
        let bytes = render_json_pretty(&document.raw)
            .with_context(|| format!("failed to render {}", path.display()))?;
        artifacts.push(Artifact {
            path,
            bytes,
            kind: ArtifactKind::Consolidated,
        });
    }

    let practice_dir = paths.practice_dir();
    for chapter in &report.chapters {
        let path = practice_dir.join(practice_file_name(chapter.meta.slug));
        let bytes = render_json_pretty(&chapter.payload)
            .with_context(|| format!("failed to render {}", path.display()))?;
        artifacts.push(Artifact {
            path,
            bytes,
            kind: ArtifactKind::Chapter {
                slug: chapter.meta.slug,
                question_count: chapter.question_count(),
            },
        });
    }

    Ok(artifacts)
}

fn write_artifacts(artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        write_bytes(&artifact.path, &artifact.bytes)?;
        if artifact.kind == ArtifactKind::Consolidated {
            info!(path = %artifact.path.display(), "wrote consolidated document");
        }
    }
    Ok(())
}

fn log_summary(generation: &Generation) {
    let report = &generation.report;
    info!(
        files = report.chapters.len(),
        skipped_chapters = report.skipped_chapters.len(),
        skipped_questions = report.skipped_questions,
        unresolved_answers = report.unresolved_answers,
        "generated practice files"
    );
    for artifact in &generation.artifacts {
        if let ArtifactKind::Chapter {
            slug,
            question_count,
        } = artifact.kind
        {
            info!(slug = %slug, questions = question_count, path = %artifact.path.display(), "chapter");
        }
    }
}

fn build_manifest(generation: &Generation) -> GenerationManifest {
    let mut consolidated_path = None;
    let mut files = Vec::new();

    for artifact in &generation.artifacts {
        match artifact.kind {
            ArtifactKind::Consolidated => {
                consolidated_path = Some(artifact.path.display().to_string());
            }
            ArtifactKind::Chapter {
                slug,
                question_count,
            } => files.push(GeneratedFileEntry {
                chapter_slug: slug.to_string(),
                path: artifact.path.display().to_string(),
                question_count,
                sha256: sha256_bytes(&artifact.bytes),
            }),
        }
    }

    GenerationManifest {
        manifest_version: MANIFEST_VERSION,
        generated_at: now_utc_string(),
        source: generation.source.label.clone(),
        source_sha256: sha256_bytes(generation.source.text.as_bytes()),
        book_title: generation.document.book.book_title.clone(),
        consolidated_path,
        files,
        skipped_chapters: generation.report.skipped_chapters.clone(),
        warnings: generation.report.warnings.clone(),
    }
}
