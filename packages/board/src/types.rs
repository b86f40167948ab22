use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column letters in board order. `I` is skipped by convention.
pub const COLUMN_LETTERS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Largest board the column alphabet can name.
pub const MAX_SIZE: usize = 25;

/// Stone color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Lowercase name, as used in markup arguments
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }

    /// Capitalized name, as used in prose
    pub fn title(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A board intersection.
///
/// `x` counts columns from the left edge and `y` counts rows from the
/// bottom edge, both 0-based. The string form is the conventional column
/// letter followed by the 1-based row number, so `(3, 3)` is `D4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// Index of this point in row-major order
    pub fn index(&self, size: usize) -> usize {
        self.y * size + self.x
    }

    /// Point at `index` in row-major order
    pub fn from_index(index: usize, size: usize) -> Self {
        Self::new(index % size, index / size)
    }

    /// Go column letter. Only defined for `x < MAX_SIZE`.
    pub fn column_letter(&self) -> char {
        debug_assert!(self.x < MAX_SIZE, "column {} has no letter", self.x);
        COLUMN_LETTERS
            .as_bytes()
            .get(self.x)
            .map_or('?', |letter| *letter as char)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.y + 1)
    }
}

impl FromStr for Point {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidPoint(s.to_string());
        let mut chars = s.trim().chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let x = COLUMN_LETTERS.find(letter).ok_or_else(invalid)?;
        let digits = chars.as_str();
        // Digits only, no sign and no leading zero, so the text is canonical
        if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: usize = digits.parse().map_err(|_| invalid())?;
        Ok(Point::new(x, row - 1))
    }
}

impl TryFrom<String> for Point {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Point> for String {
    fn from(point: Point) -> Self {
        point.to_string()
    }
}

/// A played move. A move without a point is a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
}

impl Move {
    pub fn play(color: Color, point: Point) -> Self {
        Self {
            color,
            point: Some(point),
        }
    }

    pub fn pass(color: Color) -> Self {
        Self { color, point: None }
    }

    pub fn is_pass(&self) -> bool {
        self.point.is_none()
    }
}
