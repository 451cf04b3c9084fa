//! The 8x8 checkers board.

use crate::error::OutOfRangeError;
use crate::types::{BOARD_SIZE, Cell, Color, Coord, Piece, PieceCounts};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of rows each side fills at the start of a game.
const STARTING_ROWS: i32 = 3;

/// 8x8 checkers board.
///
/// Cells are stored row-major and addressed by column `x` and row `y`.
/// The board performs no legality checks of its own; see
/// [`crate::rules::check_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Creates the opening position: Dark men on the dark cells of rows 0-2,
    /// Light men on the dark cells of rows 5-7.
    #[instrument]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for coord in Coord::all().filter(|c| c.is_dark()) {
            let color = if coord.y() < STARTING_ROWS {
                Some(Color::Dark)
            } else if coord.y() >= BOARD_SIZE - STARTING_ROWS {
                Some(Color::Light)
            } else {
                None
            };
            if let Some(color) = color {
                board.place(coord, Cell::Occupied(Piece::man(color)));
            }
        }
        board
    }

    /// Gets the cell at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<Cell, OutOfRangeError> {
        Ok(self.cell(Coord::new(x, y)?))
    }

    /// Sets the cell at `(x, y)`. No legality checks are made.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), OutOfRangeError> {
        self.place(Coord::new(x, y)?, cell);
        Ok(())
    }

    /// Gets the cell at an already validated coordinate.
    pub fn cell(&self, at: Coord) -> Cell {
        self.cells[at.y() as usize][at.x() as usize]
    }

    /// Sets the cell at an already validated coordinate.
    pub fn place(&mut self, at: Coord, cell: Cell) {
        self.cells[at.y() as usize][at.x() as usize] = cell;
    }

    /// Gets the piece at `at`, if any.
    pub fn piece(&self, at: Coord) -> Option<Piece> {
        self.cell(at).piece()
    }

    /// Iterates over every piece of `color` with its position.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |at| {
            self.piece(at)
                .filter(|piece| piece.color == color)
                .map(|piece| (at, piece))
        })
    }

    /// Counts pieces per color and rank.
    #[instrument(skip(self))]
    pub fn count_pieces(&self) -> PieceCounts {
        let mut counts = PieceCounts::default();
        for piece in self.cells.iter().flatten().filter_map(|cell| cell.piece()) {
            counts.record(piece);
        }
        counts
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Plain text grid, row 1 at the top, for logs and diagnostics.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  A B C D E F G H")?;
        for y in 0..BOARD_SIZE {
            write!(f, "{}", y + 1)?;
            for x in 0..BOARD_SIZE {
                let symbol = match Coord::new(x, y) {
                    Ok(at) => match self.cell(at) {
                        Cell::Occupied(piece) => piece.symbol(),
                        Cell::Empty if at.is_dark() => '_',
                        Cell::Empty => '.',
                    },
                    Err(_) => '?',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f, " {}", y + 1)?;
        }
        write!(f, "  A B C D E F G H")
    }
}
