use crate::annotation::{Annotation, AnnotationKind};
use crate::context::TexContext;
use crate::error::{CompileError, CompileResult};
use gotex_board::{BoardSnapshot, Color, Move, OverlayGrid, Point};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Move number of the first stone drawn on each point
pub type FirstPlacementIndex = HashMap<Point, usize>;

/// How the move list is turned into numbered stones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// Draw the moves up to the first pass, repeated point or out-of-turn
    /// color and drop the rest
    #[default]
    Strict,
    /// Draw every move that can be drawn and annotate the others
    Annotated,
}

/// Compile a move list into numbered moves.
///
/// Returns the annotations for moves that could not be drawn. Strict mode
/// never annotates.
pub fn compile_moves(
    ctx: &mut TexContext,
    moves: &[Move],
    mode: SequenceMode,
    use_pass: bool,
) -> Vec<Annotation> {
    match mode {
        SequenceMode::Strict => {
            let drawn = compile_strict(ctx, moves);
            debug!(drawn, total = moves.len(), "Compiled moves in strict mode");
            Vec::new()
        }
        SequenceMode::Annotated => compile_annotated(ctx, moves, use_pass),
    }
}

fn compile_strict(ctx: &mut TexContext, moves: &[Move]) -> usize {
    let mut drawn = HashSet::new();
    for (index, m) in moves.iter().enumerate() {
        let expected = if index % 2 == 0 {
            Color::Black
        } else {
            Color::White
        };
        let point = match m.point {
            Some(point) if m.color == expected && !drawn.contains(&point) => point,
            _ => {
                warn!(
                    move_number = index + 1,
                    omitted = moves.len() - index,
                    "Move cannot be drawn in strict mode, truncating diagram"
                );
                return index;
            }
        };
        ctx.numbered_move(point);
        drawn.insert(point);
    }
    moves.len()
}

fn compile_annotated(ctx: &mut TexContext, moves: &[Move], use_pass: bool) -> Vec<Annotation> {
    let mut first_placement = FirstPlacementIndex::new();
    let mut annotations = Vec::new();
    let mut expected = Color::Black;

    for (index, m) in moves.iter().enumerate() {
        let (next, annotation) =
            compile_move(ctx, index, m, expected, &mut first_placement, use_pass);
        expected = next;
        if let Some(annotation) = annotation {
            debug!(
                move_number = annotation.move_number,
                pass = annotation.is_pass(),
                "Annotating move"
            );
            annotations.push(annotation);
        }
    }

    annotations
}

/// Compile the move at `index`.
///
/// Returns the color expected for the following move, and an annotation
/// when the move is a pass or lands on an already drawn point.
pub fn compile_move(
    ctx: &mut TexContext,
    index: usize,
    m: &Move,
    expected: Color,
    first_placement: &mut FirstPlacementIndex,
    use_pass: bool,
) -> (Color, Option<Annotation>) {
    let move_number = index + 1;

    let point = match m.point {
        None => {
            if use_pass {
                ctx.pass_directive();
            } else {
                ctx.skip_move(Some("pass"));
            }
            let annotation = Annotation {
                move_number,
                color: m.color,
                kind: AnnotationKind::Pass,
            };
            return (expected.other(), Some(annotation));
        }
        Some(point) => point,
    };

    if let Some(&first_move) = first_placement.get(&point) {
        ctx.skip_move(None);
        let annotation = Annotation {
            move_number,
            color: m.color,
            kind: AnnotationKind::Overwrite { point, first_move },
        };
        return (expected.other(), Some(annotation));
    }

    if m.color != expected {
        ctx.toggle_expectation();
    }
    ctx.numbered_move(point);
    first_placement.insert(point, move_number);
    (m.color.other(), None)
}

/// Draw setup stones. These are never numbered.
pub fn compile_setup(ctx: &mut TexContext, setup: &[Move], overlays: Option<&OverlayGrid>) {
    for m in setup {
        if let Some(point) = m.point {
            let overlay = overlays.and_then(|grid| grid.markup_at(point));
            ctx.place_stone(m.color, point, overlay);
        }
    }
}

/// Mark every overlaid point not in `skip`, in point order
pub fn compile_marks<B: BoardSnapshot + ?Sized>(
    ctx: &mut TexContext,
    board: &B,
    overlays: &OverlayGrid,
    skip: &HashSet<Point>,
) {
    for point in board.points() {
        if skip.contains(&point) {
            continue;
        }
        if let Some(overlay) = overlays.markup_at(point) {
            ctx.mark_empty(point, overlay);
        }
    }
}

/// Draw the current position point by point
pub fn compile_position<B: BoardSnapshot + ?Sized>(
    ctx: &mut TexContext,
    board: &B,
    overlays: Option<&OverlayGrid>,
) {
    for point in board.points() {
        let overlay = overlays.and_then(|grid| grid.markup_at(point));
        match (board.color(point), overlay) {
            (Some(color), overlay) => ctx.place_stone(color, point, overlay),
            (None, Some(overlay)) => ctx.mark_empty(point, overlay),
            (None, None) => {}
        }
    }
}

/// Overlays must cover exactly the board
pub fn check_overlays(size: usize, overlays: Option<&OverlayGrid>) -> CompileResult<()> {
    match overlays {
        Some(grid) if grid.size() != size => Err(CompileError::DimensionMismatch {
            expected: size,
            found: grid.size(),
        }),
        _ => Ok(()),
    }
}
