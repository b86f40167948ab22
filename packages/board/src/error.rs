use thiserror::Error;

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Unsupported board size {size}: expected 1 to {max}")]
    UnsupportedSize { size: usize, max: usize },

    #[error("Invalid point: {0:?}")]
    InvalidPoint(String),

    #[error("Point {point} is outside a {size}x{size} board")]
    PointOutOfRange { point: String, size: usize },

    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid position character {found:?} in row {row}")]
    InvalidPositionChar { row: usize, found: char },

    #[error("Invalid game record: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    pub fn dimension_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            what: what.into(),
            expected,
            found,
        }
    }
}
