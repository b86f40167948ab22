//! Export Go game records as psgo LaTeX diagrams.

mod annotation;
mod compiler;
mod context;
mod document;
mod error;
mod escape;

pub use annotation::{annotation_text, Annotation, AnnotationKind, ANNOTATION_SEPARATOR};
pub use compiler::{
    check_overlays, compile_marks, compile_move, compile_moves, compile_position, compile_setup,
    FirstPlacementIndex, SequenceMode,
};
pub use context::{coordinates, TexContext, BOARD_ENV};
pub use document::{
    export, export_game, export_position, export_to_path, write_document, DiagramKind,
    ExportOptions, ModeSelection,
};
pub use error::{CompileError, CompileResult};
pub use escape::{escape_text, TEXT_ESCAPES};
