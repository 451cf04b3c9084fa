//! Core domain types for checkers.

use crate::error::{CoordParseError, OutOfRangeError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const BOARD_SIZE: i32 = 8;

/// Side of the game. Light moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Color {
    /// Starts on rows 5-7 and moves toward row 0.
    Light,
    /// Starts on rows 0-2 and moves toward row 7.
    Dark,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Vertical step a man of this color takes when moving forward.
    pub fn forward(self) -> i32 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// Row on which a man of this color is promoted.
    pub fn promotion_row(self) -> i32 {
        match self {
            Color::Light => 0,
            Color::Dark => BOARD_SIZE - 1,
        }
    }
}

/// Rank of a piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Rank {
    /// Moves and captures forward only.
    Man,
    /// Moves and captures in all four diagonal directions.
    King,
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Owning side.
    pub color: Color,
    /// Man or king.
    pub rank: Rank,
}

impl Piece {
    /// Creates a man of the given color.
    pub fn man(color: Color) -> Self {
        Self {
            color,
            rank: Rank::Man,
        }
    }

    /// Creates a king of the given color.
    pub fn king(color: Color) -> Self {
        Self {
            color,
            rank: Rank::King,
        }
    }

    /// Returns true if this piece is a king.
    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Returns the crowned version of this piece.
    pub fn crowned(self) -> Self {
        Self::king(self.color)
    }

    /// One-letter symbol: `l`/`d` for men, `L`/`D` for kings.
    pub fn symbol(self) -> char {
        match (self.color, self.rank) {
            (Color::Light, Rank::Man) => 'l',
            (Color::Light, Rank::King) => 'L',
            (Color::Dark, Rank::Man) => 'd',
            (Color::Dark, Rank::King) => 'D',
        }
    }
}

/// Contents of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// Cell holds a piece.
    Occupied(Piece),
}

impl Cell {
    /// Returns the piece in this cell, if any.
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(piece) => Some(piece),
        }
    }

    /// Returns true if the cell holds no piece.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A validated board coordinate: column `x` and row `y`, both in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    /// Creates a coordinate, failing if either axis is outside `0..8`.
    pub fn new(x: i32, y: i32) -> Result<Self, OutOfRangeError> {
        if !(0..BOARD_SIZE).contains(&x) || !(0..BOARD_SIZE).contains(&y) {
            return Err(OutOfRangeError { x, y });
        }
        Ok(Self {
            x: x as u8,
            y: y as u8,
        })
    }

    /// Column, 0 = `A`.
    pub fn x(self) -> i32 {
        i32::from(self.x)
    }

    /// Row, 0 = `1`.
    pub fn y(self) -> i32 {
        i32::from(self.y)
    }

    /// Dark cells are the only ones pieces may occupy.
    pub fn is_dark(self) -> bool {
        (self.x() + self.y()) % 2 == 1
    }

    /// Returns the coordinate shifted by `(dx, dy)`, or `None` off the board.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Self::new(self.x() + dx, self.y() + dy).ok()
    }

    /// Iterates over all 64 coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE as u8).flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Coord { x, y }))
    }
}

impl TryFrom<(i32, i32)> for Coord {
    type Error = OutOfRangeError;

    fn try_from((x, y): (i32, i32)) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl From<Coord> for (i32, i32) {
    fn from(coord: Coord) -> Self {
        (coord.x(), coord.y())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    /// Parses the chat form `<A-H><1-8>`, case-insensitive.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoordParseError::new(s);
        let mut chars = s.trim().chars();
        let (Some(column), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let column = column.to_ascii_uppercase();
        if !('A'..='H').contains(&column) || !('1'..='8').contains(&row) {
            return Err(invalid());
        }

        let x = column as i32 - 'A' as i32;
        let y = row as i32 - '1' as i32;
        Self::new(x, y).map_err(|_| invalid())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'A' + self.x) as char, self.y + 1)
    }
}

/// Pieces on the board, split by color and rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceCounts {
    /// Light men.
    pub light_men: u32,
    /// Light kings.
    pub light_kings: u32,
    /// Dark men.
    pub dark_men: u32,
    /// Dark kings.
    pub dark_kings: u32,
}

impl PieceCounts {
    /// Adds one piece to the tally.
    pub fn record(&mut self, piece: Piece) {
        let slot = match (piece.color, piece.rank) {
            (Color::Light, Rank::Man) => &mut self.light_men,
            (Color::Light, Rank::King) => &mut self.light_kings,
            (Color::Dark, Rank::Man) => &mut self.dark_men,
            (Color::Dark, Rank::King) => &mut self.dark_kings,
        };
        *slot += 1;
    }

    /// Men plus kings of one color.
    pub fn of(&self, color: Color) -> u32 {
        match color {
            Color::Light => self.light_men + self.light_kings,
            Color::Dark => self.dark_men + self.dark_kings,
        }
    }

    /// All pieces on the board.
    pub fn total(&self) -> u32 {
        self.of(Color::Light) + self.of(Color::Dark)
    }
}
