use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::chapters::{CHAPTERS, PRACTICE_FILE_PREFIX, practice_file_name};
use crate::cli::{PRACTICE_DIR_NAME, StatusArgs};
use crate::model::ChapterPayload;

#[derive(Debug, Clone)]
pub struct PracticeFileStatus {
    pub path: PathBuf,
    pub payload: Option<ChapterPayload>,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let practice_dir = args
        .practice_dir
        .unwrap_or_else(|| args.base_dir.join(PRACTICE_DIR_NAME));

    info!(practice_dir = %practice_dir.display(), "status requested");

    if !practice_dir.exists() {
        warn!(path = %practice_dir.display(), "practice directory missing");
        return Ok(());
    }

    let files = scan_practice_dir(&practice_dir)?;
    for file in &files {
        match &file.payload {
            Some(payload) => info!(
                slug = %payload.chapter_slug,
                title = %payload.chapter_title,
                questions = payload.questions.len(),
                "practice file"
            ),
            None => warn!(path = %file.path.display(), "practice file does not parse"),
        }
    }

    for meta in CHAPTERS {
        let path = practice_dir.join(practice_file_name(meta.slug));
        if !path.exists() {
            warn!(slug = %meta.slug, path = %path.display(), "practice file missing");
        }
    }

    let total: usize = files
        .iter()
        .filter_map(|file| file.payload.as_ref())
        .map(|payload| payload.questions.len())
        .sum();
    info!(files = files.len(), questions = total, "status complete");

    Ok(())
}

pub fn scan_practice_dir(practice_dir: &Path) -> Result<Vec<PracticeFileStatus>> {
    let entries = fs::read_dir(practice_dir)
        .with_context(|| format!("failed to read directory {}", practice_dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", practice_dir.display()))?;
        let path = entry.path();
        let is_practice_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(PRACTICE_FILE_PREFIX) && name.ends_with(".json"));
        if is_practice_file && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let payload = serde_json::from_slice::<ChapterPayload>(&raw).ok();
        files.push(PracticeFileStatus { path, payload });
    }

    Ok(files)
}
