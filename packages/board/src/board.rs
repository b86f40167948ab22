use crate::error::{BoardError, BoardResult};
use crate::overlay::{Overlay, OverlayGrid};
use crate::types::{Color, Move, Point, MAX_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only view of a board and its move history
pub trait BoardSnapshot {
    fn size(&self) -> usize;

    /// Stone at `point`, `None` when empty
    fn color(&self, point: Point) -> Option<Color>;

    /// Stones placed before numbering starts (handicap and edits)
    fn setup_moves(&self) -> &[Move];

    /// Played moves in order
    fn moves(&self) -> &[Move];

    fn to_move(&self) -> Color;

    /// All points in row-major point-index order
    fn points(&self) -> Vec<Point> {
        let size = self.size();
        (0..size * size)
            .map(|index| Point::from_index(index, size))
            .collect()
    }
}

/// Point-keyed overlays as written in a game record file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOverlays {
    #[serde(default)]
    pub labels: BTreeMap<Point, String>,

    #[serde(default)]
    pub squares: Vec<Point>,

    #[serde(default)]
    pub selected: Vec<Point>,
}

impl RecordOverlays {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.squares.is_empty() && self.selected.is_empty()
    }
}

/// A game record loaded from JSON.
///
/// ```json
/// {
///   "size": 9,
///   "title": "Teaching game",
///   "setup": [{ "color": "black", "point": "C3" }],
///   "moves": [{ "color": "white", "point": "G7" }, { "color": "black" }],
///   "overlays": { "labels": { "E5": "a" }, "squares": ["G7"] }
/// }
/// ```
///
/// `position` holds the static board as rows of `X`, `O` and `.`, top row
/// first. Without it the position is replayed from the setup stones and
/// moves, later stones replacing earlier ones. Captures are not computed.
///
/// Deserializing always validates, and the position is read from the
/// current fields on every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGameRecord")]
pub struct GameRecord {
    pub size: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_move: Option<Color>,

    pub setup: Vec<Move>,

    pub moves: Vec<Move>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec<String>>,

    #[serde(skip_serializing_if = "RecordOverlays::is_empty")]
    pub overlays: RecordOverlays,
}

/// Unchecked form of [`GameRecord`] as it appears in JSON
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameRecord {
    size: usize,

    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    to_move: Option<Color>,

    #[serde(default)]
    setup: Vec<Move>,

    #[serde(default)]
    moves: Vec<Move>,

    #[serde(default)]
    position: Option<Vec<String>>,

    #[serde(default)]
    overlays: RecordOverlays,
}

impl TryFrom<RawGameRecord> for GameRecord {
    type Error = BoardError;

    fn try_from(raw: RawGameRecord) -> BoardResult<Self> {
        let record = Self {
            size: raw.size,
            title: raw.title,
            to_move: raw.to_move,
            setup: raw.setup,
            moves: raw.moves,
            position: raw.position,
            overlays: raw.overlays,
        };
        record.validate()?;
        Ok(record)
    }
}

impl GameRecord {
    pub fn new(size: usize) -> BoardResult<Self> {
        let record = Self {
            size,
            title: None,
            to_move: None,
            setup: Vec::new(),
            moves: Vec::new(),
            position: None,
            overlays: RecordOverlays::default(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Parse and validate a record. Bad points and shapes come back as
    /// their own [`BoardError`] variants rather than as JSON errors.
    pub fn from_json(source: &str) -> BoardResult<Self> {
        let raw: RawGameRecord = serde_json::from_str(source)?;
        Self::try_from(raw)
    }

    pub fn with_setup(mut self, setup: Vec<Move>) -> BoardResult<Self> {
        self.setup = setup;
        self.validate()?;
        Ok(self)
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> BoardResult<Self> {
        self.moves = moves;
        self.validate()?;
        Ok(self)
    }

    pub fn with_position(mut self, rows: &[&str]) -> BoardResult<Self> {
        self.position = Some(rows.iter().map(|row| row.to_string()).collect());
        self.validate()?;
        Ok(self)
    }

    /// Check the size, every point and the shape of `position`
    pub fn validate(&self) -> BoardResult<()> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(BoardError::UnsupportedSize {
                size: self.size,
                max: MAX_SIZE,
            });
        }

        let overlay_points = self
            .overlays
            .labels
            .keys()
            .chain(&self.overlays.squares)
            .chain(&self.overlays.selected);
        let move_points = self.setup.iter().chain(&self.moves).filter_map(|m| m.point.as_ref());
        for point in move_points.chain(overlay_points) {
            self.check_point(*point)?;
        }

        if let Some(rows) = &self.position {
            check_position(self.size, rows)?;
        }
        Ok(())
    }

    /// Overlays from the record file as a full grid
    pub fn overlay_grid(&self) -> BoardResult<OverlayGrid> {
        let mut grid = OverlayGrid::new(self.size);
        for (point, label) in &self.overlays.labels {
            grid.get_mut(*point)?.label = Some(label.clone());
        }
        for point in &self.overlays.squares {
            grid.get_mut(*point)?.square = true;
        }
        for point in &self.overlays.selected {
            grid.get_mut(*point)?.select = true;
        }
        Ok(grid)
    }

    pub fn set_overlay(&mut self, point: Point, overlay: Overlay) -> BoardResult<()> {
        self.check_point(point)?;
        match overlay.label {
            Some(label) => self.overlays.labels.insert(point, label),
            None => self.overlays.labels.remove(&point),
        };
        self.overlays.squares.retain(|p| *p != point);
        self.overlays.selected.retain(|p| *p != point);
        if overlay.square {
            self.overlays.squares.push(point);
        }
        if overlay.select {
            self.overlays.selected.push(point);
        }
        Ok(())
    }

    fn check_point(&self, point: Point) -> BoardResult<()> {
        if point.is_on_board(self.size) {
            Ok(())
        } else {
            Err(BoardError::PointOutOfRange {
                point: point.to_string(),
                size: self.size,
            })
        }
    }

    /// Last stone placed on `point` by the setup or the moves
    fn replayed_color(&self, point: Point) -> Option<Color> {
        self.setup
            .iter()
            .chain(&self.moves)
            .rev()
            .find(|m| m.point == Some(point))
            .map(|m| m.color)
    }
}

fn row_cells(row: &str) -> impl Iterator<Item = char> + '_ {
    row.chars().filter(|c| !c.is_whitespace())
}

/// `Some(stone)` for a known position character, `None` otherwise
fn cell_color(cell: char) -> Option<Option<Color>> {
    match cell {
        'X' | 'x' | '#' => Some(Some(Color::Black)),
        'O' | 'o' => Some(Some(Color::White)),
        '.' | '+' => Some(None),
        _ => None,
    }
}

fn check_position(size: usize, rows: &[String]) -> BoardResult<()> {
    if rows.len() != size {
        return Err(BoardError::dimension_mismatch("position rows", size, rows.len()));
    }

    for (row_index, row) in rows.iter().enumerate() {
        let columns = row_cells(row).count();
        if columns != size {
            return Err(BoardError::dimension_mismatch("position columns", size, columns));
        }
        if let Some(found) = row_cells(row).find(|c| cell_color(*c).is_none()) {
            return Err(BoardError::InvalidPositionChar {
                row: row_index + 1,
                found,
            });
        }
    }
    Ok(())
}

/// Stone at `point` in position rows, top row first
fn position_color(size: usize, rows: &[String], point: Point) -> Option<Color> {
    let row = rows.get(size - 1 - point.y)?;
    row_cells(row).nth(point.x).and_then(cell_color).flatten()
}

impl BoardSnapshot for GameRecord {
    fn size(&self) -> usize {
        self.size
    }

    fn color(&self, point: Point) -> Option<Color> {
        if !point.is_on_board(self.size) {
            return None;
        }
        match &self.position {
            Some(rows) => position_color(self.size, rows, point),
            None => self.replayed_color(point),
        }
    }

    fn setup_moves(&self) -> &[Move] {
        &self.setup
    }

    fn moves(&self) -> &[Move] {
        &self.moves
    }

    fn to_move(&self) -> Color {
        self.to_move.unwrap_or_else(|| {
            self.moves
                .last()
                .map(|m| m.color.other())
                .unwrap_or(Color::Black)
        })
    }
}
