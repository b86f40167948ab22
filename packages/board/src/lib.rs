//! Board snapshot types shared by the gotex compilers.

pub mod board;
pub mod error;
pub mod overlay;
pub mod types;

pub use board::{BoardSnapshot, GameRecord, RecordOverlays};
pub use error::{BoardError, BoardResult};
pub use overlay::{Overlay, OverlayGrid};
pub use types::{Color, Move, Point, COLUMN_LETTERS, MAX_SIZE};
