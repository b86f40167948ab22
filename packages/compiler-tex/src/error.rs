use gotex_board::BoardError;
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while exporting a diagram
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Overlay grid is {found}x{found} but the board is {expected}x{expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Diagram state error: {0}")]
    BoardState(String),
}
