use crate::evolution::GenomeId;

/// Every failure surfaced by the library.
///
/// Load errors (`Io`, `Csv`, `Json`, `ArtifactNotFound`) are never recovered
/// inside the crate. Evaluation errors (`InputSize`, `OutputSize`,
/// `MalformedGenome`, `MissingFitness`) abort the whole run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A dataset row could not be parsed. `row` is 1-based and counts data
    /// rows only (the header is row 0).
    #[error("dataset row {row}: {message}")]
    Csv { row: usize, message: String },

    /// JSON (de)serialization failed, e.g. an artifact written with an
    /// incompatible schema.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("network expects {expected} inputs, got {got}")]
    InputSize { expected: usize, got: usize },

    #[error("network produced {got} outputs, expected {expected}")]
    OutputSize { expected: usize, got: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed genome {genome}: {reason}")]
    MalformedGenome { genome: GenomeId, reason: String },

    /// The evaluation callback returned without assigning a fitness.
    #[error("genome {0} was not assigned a fitness")]
    MissingFitness(GenomeId),

    #[error("invalid artifact name '{0}'")]
    InvalidArtifactName(String),

    #[error("artifact '{0}' not found")]
    ArtifactNotFound(String),

    #[error("run harness has already been started")]
    HarnessNotIdle,

    #[error("no generations were run")]
    NoGenerations,
}

impl Error {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Error::Io { path: path.as_ref().display().to_string(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
