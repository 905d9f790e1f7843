use std::path::PathBuf;

/// Fatal errors raised while loading, ranking or writing contacts.
///
/// Unrecognized category values are never errors; they score 0.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read input file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to write output file {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl PipelineError {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::MissingFile { .. } | PipelineError::Read { .. } => crate::EXIT_INPUT,
            PipelineError::Parse { .. } => crate::EXIT_PARSE,
            PipelineError::Write { .. } => crate::EXIT_WRITE,
        }
    }
}
