use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (source kinds, format/columns mismatch).
    ConfigValidation(String),
    /// A configured source has no loaded roster, or no source of the
    /// required kind exists.
    UnknownSource(String),
    /// Missing required column in CSV input.
    MissingColumn { source: String, column: String },
    /// IO error (file read, CSV decode).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownSource(msg) => write!(f, "unknown source: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
