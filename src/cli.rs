use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_BASE_DIR: &str = ".";
pub const PRACTICE_DIR_NAME: &str = "practice-questions";
pub const CONSOLIDATED_FILE: &str = "data/ic-joshi-meteorology-misc-questions.json";

#[derive(Parser, Debug)]
#[command(
    name = "ic-joshi-practice",
    version,
    about = "Generate IC Joshi meteorology practice-question files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Generate(GenerateArgs),
    Check(CheckArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OutputPaths {
    #[arg(long, default_value = DEFAULT_BASE_DIR)]
    pub base_dir: PathBuf,

    #[arg(long)]
    pub practice_dir: Option<PathBuf>,

    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            practice_dir: None,
            data_file: None,
        }
    }
}

impl OutputPaths {
    pub fn practice_dir(&self) -> PathBuf {
        self.practice_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join(PRACTICE_DIR_NAME))
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| self.base_dir.join(CONSOLIDATED_FILE))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub paths: OutputPaths,

    /// Read the question document from this file instead of the embedded copy.
    #[arg(long)]
    pub source_path: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub paths: OutputPaths,

    #[arg(long)]
    pub source_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = DEFAULT_BASE_DIR)]
    pub base_dir: PathBuf,

    #[arg(long)]
    pub practice_dir: Option<PathBuf>,
}
