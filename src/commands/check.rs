use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::CheckArgs;
use crate::commands::generate::{self, Artifact};
use crate::util::{sha256_bytes, sha256_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactState {
    Current,
    Missing,
    Stale,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let generation = generate::prepare(&args.paths, args.source_path.as_deref())?;

    let mut outdated = 0_usize;
    for artifact in &generation.artifacts {
        match inspect(artifact)? {
            ArtifactState::Current => {}
            ArtifactState::Missing => {
                warn!(path = %artifact.path.display(), "generated file missing");
                outdated += 1;
            }
            ArtifactState::Stale => {
                warn!(path = %artifact.path.display(), "generated file differs from source");
                outdated += 1;
            }
        }
    }

    if outdated > 0 {
        bail!(
            "{outdated} of {} generated files are out of date; rerun generate",
            generation.artifacts.len()
        );
    }

    info!(
        files = generation.artifacts.len(),
        source = %generation.source.label,
        "generated files are current"
    );
    Ok(())
}

fn inspect(artifact: &Artifact) -> Result<ArtifactState> {
    if !artifact.path.exists() {
        return Ok(ArtifactState::Missing);
    }

    if sha256_file(&artifact.path)? == sha256_bytes(&artifact.bytes) {
        Ok(ArtifactState::Current)
    } else {
        Ok(ArtifactState::Stale)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::cli::{GenerateArgs, OutputPaths};

    fn scratch_dir(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!(
            "ic-joshi-practice-check-{label}-{}-{nanos}",
            std::process::id()
        ))
    }

    fn paths(base_dir: &Path) -> OutputPaths {
        OutputPaths {
            base_dir: base_dir.to_path_buf(),
            ..OutputPaths::default()
        }
    }

    #[test]
    fn check_passes_after_generate_and_fails_after_edit() {
        let base_dir = scratch_dir("edit");
        generate::run(GenerateArgs {
            paths: paths(&base_dir),
            ..GenerateArgs::default()
        })
        .expect("generation succeeds");

        let check_args = CheckArgs {
            paths: paths(&base_dir),
            source_path: None,
        };
        run(check_args.clone()).expect("fresh output is current");

        let chapter_path = base_dir
            .join("practice-questions")
            .join("ic-joshi-additional-questions-1.json");
        fs::write(&chapter_path, b"{}\n").expect("chapter overwritten");

        let err = run(check_args.clone()).unwrap_err();
        assert!(err.to_string().contains("1 of 3 generated files are out of date"));

        fs::remove_file(&chapter_path).expect("chapter removed");
        let generation = generate::prepare(&check_args.paths, None).expect("prepare succeeds");
        let states: Vec<ArtifactState> = generation
            .artifacts
            .iter()
            .map(|artifact| inspect(artifact).expect("inspect succeeds"))
            .collect();
        assert_eq!(
            states,
            vec![
                ArtifactState::Current,
                ArtifactState::Current,
                ArtifactState::Missing
            ]
        );

        fs::remove_dir_all(&base_dir).ok();
    }

    #[test]
    fn check_fails_when_nothing_was_generated() {
        let base_dir = scratch_dir("empty");
        let err = run(CheckArgs {
            paths: paths(&base_dir),
            source_path: None,
        })
        .unwrap_err();

        assert!(err.to_string().contains("3 of 3"));
    }
}
