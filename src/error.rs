use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("malformed puzzle: {0}")]
    Malformed(String),

    #[error("cell ({row}, {col}) belongs to no region")]
    MissingRegion { row: usize, col: usize },

    #[error("clue {value} at ({row}, {col}) is outside 1..={max} for its region")]
    ClueOutOfRange {
        row: usize,
        col: usize,
        value: u8,
        max: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<PuzzleError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<PuzzleError> for Error {
    fn from(inner: PuzzleError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        PuzzleError::from(err).into()
    }
}
