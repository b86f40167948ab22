use crate::annotation::annotation_text;
use crate::compiler::{
    check_overlays, compile_marks, compile_moves, compile_position, compile_setup, SequenceMode,
};
use crate::context::TexContext;
use crate::error::CompileResult;
use crate::escape::escape_text;
use gotex_board::{BoardSnapshot, OverlayGrid};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Which sequence mode to use for a game diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeSelection {
    /// Annotated when any overlay is present, strict otherwise
    #[default]
    Auto,
    Strict,
    Annotated,
}

impl ModeSelection {
    pub fn resolve(self, has_overlays: bool) -> SequenceMode {
        match self {
            ModeSelection::Auto if has_overlays => SequenceMode::Annotated,
            ModeSelection::Auto | ModeSelection::Strict => SequenceMode::Strict,
            ModeSelection::Annotated => SequenceMode::Annotated,
        }
    }
}

/// Kind of diagram to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramKind {
    /// Setup stones plus the numbered move list
    #[default]
    Sequence,
    /// The current position without move numbers
    Position,
}

/// Options for exporting a document
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Section title, escaped before output
    pub title: Option<String>,
    /// Use psgo's `\pass` (psgo 0.14 and newer)
    pub use_pass: bool,
    pub mode: ModeSelection,
    pub kind: DiagramKind,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            use_pass: true,
            mode: ModeSelection::Auto,
            kind: DiagramKind::Sequence,
        }
    }
}

/// Export a board as a complete LaTeX document
pub fn export<B: BoardSnapshot + ?Sized>(
    board: &B,
    overlays: Option<&OverlayGrid>,
    options: &ExportOptions,
) -> CompileResult<String> {
    match options.kind {
        DiagramKind::Sequence => export_game(board, overlays, options),
        DiagramKind::Position => export_position(board, overlays, options),
    }
}

/// Export the setup stones and numbered moves of a game
#[instrument(skip_all, fields(size = board.size(), moves = board.moves().len()))]
pub fn export_game<B: BoardSnapshot + ?Sized>(
    board: &B,
    overlays: Option<&OverlayGrid>,
    options: &ExportOptions,
) -> CompileResult<String> {
    check_overlays(board.size(), overlays)?;
    let overlays = overlays.filter(|grid| !grid.is_empty());
    let mode = options.mode.resolve(overlays.is_some());
    debug!(?mode, "Exporting game diagram");

    let mut ctx = TexContext::new();
    compile_preamble(&mut ctx, options);

    ctx.begin(board.size())?;
    compile_setup(&mut ctx, board.setup_moves(), overlays);
    ctx.reset_move_counter();
    let annotations = compile_moves(&mut ctx, board.moves(), mode, options.use_pass);
    if let Some(grid) = overlays {
        let setup_points: HashSet<_> = board
            .setup_moves()
            .iter()
            .filter_map(|m| m.point)
            .collect();
        compile_marks(&mut ctx, board, grid, &setup_points);
    }
    ctx.end()?;

    let comment = annotation_text(&annotations, board.moves());
    if !comment.is_empty() {
        compile_centered(&mut ctx, &comment);
    }

    compile_postamble(&mut ctx);
    info!(annotations = annotations.len(), "Game diagram exported");
    Ok(ctx.into_output())
}

/// Export the current position with a note on who is to play
#[instrument(skip_all, fields(size = board.size()))]
pub fn export_position<B: BoardSnapshot + ?Sized>(
    board: &B,
    overlays: Option<&OverlayGrid>,
    options: &ExportOptions,
) -> CompileResult<String> {
    check_overlays(board.size(), overlays)?;

    let mut ctx = TexContext::new();
    compile_preamble(&mut ctx, options);

    ctx.begin(board.size())?;
    compile_position(&mut ctx, board, overlays);
    ctx.end()?;

    compile_centered(&mut ctx, &format!("{} to play.", board.to_move().title()));

    compile_postamble(&mut ctx);
    info!("Position diagram exported");
    Ok(ctx.into_output())
}

/// Export straight to a file
pub fn export_to_path<B: BoardSnapshot + ?Sized>(
    path: &Path,
    board: &B,
    overlays: Option<&OverlayGrid>,
    options: &ExportOptions,
) -> CompileResult<()> {
    let document = export(board, overlays, options)?;
    write_document(path, &document)
}

/// Write a document to `path`.
///
/// The file is flushed before returning and closed when this returns,
/// whether or not writing succeeded. Bytes already written on failure stay
/// in the file.
pub fn write_document(path: &Path, document: &str) -> CompileResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(document.as_bytes())?;
    out.flush()?;
    debug!(path = %path.display(), bytes = document.len(), "Document written");
    Ok(())
}

fn compile_preamble(ctx: &mut TexContext, options: &ExportOptions) {
    let version = if options.use_pass { "0.14" } else { "0.12" };
    ctx.add_line("\\documentclass{article}");
    ctx.add_line(&format!("\\usepackage{{psgo}} % version {} or newer", version));
    ctx.add_line("\\pagestyle{empty}");
    ctx.add_line("\\begin{document}");
    ctx.add("\n");

    if let Some(title) = options.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        ctx.add_line(&format!("\\section*{{{}}}", escape_text(title)));
        ctx.add("\n");
    }
}

fn compile_centered(ctx: &mut TexContext, text: &str) {
    ctx.add("\n");
    ctx.add_line("\\begin{center}");
    ctx.raw(text);
    ctx.add_line("\\end{center}");
}

fn compile_postamble(ctx: &mut TexContext) {
    ctx.add("\n");
    ctx.add_line("\\end{document}");
}
