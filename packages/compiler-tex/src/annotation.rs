use gotex_board::{Color, Move, Point};

/// Separator placed between annotation fragments
pub const ANNOTATION_SEPARATOR: &str = " \\enspace\n";

/// A move the diagram cannot show as a fresh numbered stone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    /// 1-based number of the annotated move
    pub move_number: usize,
    pub color: Color,
    pub kind: AnnotationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Pass,
    /// Played on `point`, which already shows stone `first_move`
    Overwrite { point: Point, first_move: usize },
}

impl Annotation {
    pub fn is_pass(&self) -> bool {
        matches!(self.kind, AnnotationKind::Pass)
    }

    /// Markup fragment for this annotation. `moves` is the full move list,
    /// used to look up the color of the referenced stone.
    pub fn fragment(&self, moves: &[Move]) -> String {
        let stone = stone_ref(self.move_number, self.color);
        match self.kind {
            AnnotationKind::Pass => format!("{} pass", stone),
            AnnotationKind::Overwrite { first_move, .. } => {
                let first_color = first_move
                    .checked_sub(1)
                    .and_then(|index| moves.get(index))
                    .map(|m| m.color)
                    .unwrap_or(self.color);
                format!("{} at {}", stone, stone_ref(first_move, first_color))
            }
        }
    }
}

fn stone_ref(number: usize, color: Color) -> String {
    format!("\\stone[{}]{{{}}}", number, color.name())
}

/// Join annotation fragments in move order. Empty when nothing needs
/// annotating.
pub fn annotation_text(annotations: &[Annotation], moves: &[Move]) -> String {
    annotations
        .iter()
        .map(|annotation| annotation.fragment(moves))
        .collect::<Vec<_>>()
        .join(ANNOTATION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_fragment() {
        let annotation = Annotation {
            move_number: 2,
            color: Color::Black,
            kind: AnnotationKind::Pass,
        };
        assert!(annotation.is_pass());
        assert_eq!(annotation.fragment(&[]), "\\stone[2]{black} pass");
    }

    #[test]
    fn test_overwrite_fragment_uses_first_stone_color() {
        let moves = vec![
            Move::play(Color::White, Point::new(0, 0)),
            Move::play(Color::Black, Point::new(1, 1)),
            Move::play(Color::Black, Point::new(0, 0)),
        ];
        let annotation = Annotation {
            move_number: 3,
            color: Color::Black,
            kind: AnnotationKind::Overwrite {
                point: Point::new(0, 0),
                first_move: 1,
            },
        };
        assert_eq!(
            annotation.fragment(&moves),
            "\\stone[3]{black} at \\stone[1]{white}"
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(annotation_text(&[], &[]), "");
    }

    #[test]
    fn test_join() {
        let annotations = [
            Annotation {
                move_number: 4,
                color: Color::White,
                kind: AnnotationKind::Pass,
            },
            Annotation {
                move_number: 5,
                color: Color::Black,
                kind: AnnotationKind::Pass,
            },
        ];
        assert_eq!(
            annotation_text(&annotations, &[]),
            "\\stone[4]{white} pass \\enspace\n\\stone[5]{black} pass"
        );
    }
}
