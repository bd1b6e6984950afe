pub mod chat;
pub mod codec;
pub mod grade;
pub mod init;
pub mod performance;
pub mod stats;
pub mod students;
pub mod validate;

use std::path::PathBuf;

use quizforge_client::QuizforgeConfig;

/// Where a command should write its CSV export, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Skip,
    /// The `output_dir` from the loaded config.
    Configured,
    Dir(PathBuf),
}

impl ExportTarget {
    /// An explicit directory wins over the `--export` switch.
    pub fn new(export: bool, dir: Option<PathBuf>) -> Self {
        match (export, dir) {
            (_, Some(dir)) => ExportTarget::Dir(dir),
            (true, None) => ExportTarget::Configured,
            (false, None) => ExportTarget::Skip,
        }
    }

    pub fn resolve(self, config: &QuizforgeConfig) -> Option<PathBuf> {
        match self {
            ExportTarget::Skip => None,
            ExportTarget::Configured => Some(config.output_dir.clone()),
            ExportTarget::Dir(dir) => Some(dir),
        }
    }
}
