use crate::error::{BoardError, BoardResult};
use crate::types::Point;

/// Extra markup drawn on a single point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub label: Option<String>,
    pub square: bool,
    pub select: bool,
}

impl Overlay {
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            label: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn square() -> Self {
        Self {
            square: true,
            ..Default::default()
        }
    }

    pub fn select() -> Self {
        Self {
            select: true,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.as_deref().map_or(true, str::is_empty) && !self.square && !self.select
    }
}

/// Per-point overlays for a whole board.
///
/// Every point has an `Overlay`; points without markup hold an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayGrid {
    size: usize,
    cells: Vec<Overlay>,
}

impl OverlayGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Overlay::default(); size * size],
        }
    }

    /// Build a grid from column-major layers indexed `[x][y]`.
    ///
    /// Each layer is optional. A layer whose outer or inner length differs
    /// from `size` is rejected.
    pub fn from_layers(
        size: usize,
        labels: Option<&[Vec<Option<String>>]>,
        squares: Option<&[Vec<bool>]>,
        selects: Option<&[Vec<bool>]>,
    ) -> BoardResult<Self> {
        if let Some(layer) = labels {
            check_layer("labels", size, layer)?;
        }
        if let Some(layer) = squares {
            check_layer("squares", size, layer)?;
        }
        if let Some(layer) = selects {
            check_layer("selects", size, layer)?;
        }

        let mut grid = Self::new(size);
        for index in 0..size * size {
            let point = Point::from_index(index, size);
            let overlay = &mut grid.cells[index];
            if let Some(layer) = labels {
                overlay.label = layer[point.x][point.y].clone();
            }
            if let Some(layer) = squares {
                overlay.square = layer[point.x][point.y];
            }
            if let Some(layer) = selects {
                overlay.select = layer[point.x][point.y];
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, point: Point) -> Option<&Overlay> {
        if !point.is_on_board(self.size) {
            return None;
        }
        self.cells.get(point.index(self.size))
    }

    /// The overlay at `point`, or `None` when there is nothing to draw
    pub fn markup_at(&self, point: Point) -> Option<&Overlay> {
        self.get(point).filter(|overlay| !overlay.is_empty())
    }

    pub fn get_mut(&mut self, point: Point) -> BoardResult<&mut Overlay> {
        if !point.is_on_board(self.size) {
            return Err(BoardError::PointOutOfRange {
                point: point.to_string(),
                size: self.size,
            });
        }
        let size = self.size;
        Ok(&mut self.cells[point.index(size)])
    }

    pub fn set(&mut self, point: Point, overlay: Overlay) -> BoardResult<()> {
        *self.get_mut(point)? = overlay;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Overlay::is_empty)
    }
}

fn check_layer<T>(what: &str, size: usize, layer: &[Vec<T>]) -> BoardResult<()> {
    if layer.len() != size {
        return Err(BoardError::dimension_mismatch(what, size, layer.len()));
    }
    if let Some(column) = layer.iter().find(|column| column.len() != size) {
        return Err(BoardError::dimension_mismatch(what, size, column.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = OverlayGrid::new(9);
        assert!(grid.is_empty());
        assert!(grid.markup_at(Point::new(4, 4)).is_none());
        assert!(grid.get(Point::new(9, 0)).is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = OverlayGrid::new(9);
        grid.set(Point::new(2, 3), Overlay::label("A")).unwrap();
        assert!(!grid.is_empty());
        assert_eq!(
            grid.markup_at(Point::new(2, 3)).and_then(|o| o.label.as_deref()),
            Some("A")
        );
        assert!(grid.set(Point::new(9, 9), Overlay::square()).is_err());
    }

    #[test]
    fn test_empty_label_is_empty_overlay() {
        assert!(Overlay::label("").is_empty());
        assert!(!Overlay::select().is_empty());
    }

    #[test]
    fn test_from_layers() {
        let mut squares = vec![vec![false; 5]; 5];
        squares[1][2] = true;
        let mut labels = vec![vec![None; 5]; 5];
        labels[4][0] = Some("x".to_string());

        let grid = OverlayGrid::from_layers(5, Some(&labels[..]), Some(&squares[..]), None).unwrap();
        assert!(grid.markup_at(Point::new(1, 2)).unwrap().square);
        assert_eq!(
            grid.markup_at(Point::new(4, 0)).unwrap().label.as_deref(),
            Some("x")
        );
        assert!(grid.markup_at(Point::new(0, 0)).is_none());
    }

    #[test]
    fn test_from_layers_rejects_wrong_shape() {
        let squares = vec![vec![false; 5]; 4];
        let err = OverlayGrid::from_layers(5, None, Some(&squares[..]), None).unwrap_err();
        assert!(matches!(
            err,
            BoardError::DimensionMismatch { expected: 5, found: 4, .. }
        ));

        let mut selects = vec![vec![false; 5]; 5];
        selects[3] = vec![false; 7];
        let err = OverlayGrid::from_layers(5, None, None, Some(&selects[..])).unwrap_err();
        assert!(matches!(
            err,
            BoardError::DimensionMismatch { expected: 5, found: 7, .. }
        ));
    }
}
