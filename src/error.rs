use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading data, persisting networks,
/// or selecting a model.
///
/// Variants map one-to-one onto the failure modes the CLI drivers report:
/// - `Io`              — network or dataset file missing/unreadable
/// - `DataFormat`      — training-data file does not parse
/// - `ModelFormat`     — persisted network file does not parse
/// - `DatasetTooSmall` — cannot form two non-empty halves for a split
/// - `NoViableModel`   — every model-selection trial failed; nothing saved
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    DataFormat(String),
    ModelFormat(String),
    DatasetTooSmall { len: usize },
    NoViableModel,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "{}", err),
            Error::DataFormat(msg) => write!(f, "bad training data: {}", msg),
            Error::ModelFormat(msg) => write!(f, "bad network file: {}", msg),
            Error::DatasetTooSmall { len } => write!(
                f,
                "dataset of {} sample(s) cannot be split into two non-empty halves",
                len
            ),
            Error::NoViableModel => {
                write!(f, "no trial produced a usable network; nothing was saved")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::ModelFormat(err.to_string())
    }
}
