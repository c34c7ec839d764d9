use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The pattern matched no files, or one of the matched files is empty.
    #[error("no usable frames for pattern `{pattern}`")]
    EmptyAsset { pattern: String },

    /// Wildcards are only understood in the file-name part of a pattern.
    #[error("unsupported pattern `{pattern}`: `*` is only allowed in the file name, not in directories")]
    UnsupportedPattern { pattern: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The player asked to quit.
    #[error("interrupted by user")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
