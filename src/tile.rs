//! Leaf types describing the grid: tile kinds, positions and trap identifiers.

use std::fmt;

/// Input symbol for a solid tile.
pub const SOLID_SYMBOL: char = 'X';
/// Input symbol for a ladder tile.
pub const LADDER_SYMBOL: char = '=';
/// Input symbol for an air tile.
pub const AIR_SYMBOL: char = ' ';
/// Input symbol for a trapdoor.
pub const TRAPDOOR_SYMBOL: char = 'T';
/// Input symbol for a drawbridge.
pub const DRAWBRIDGE_SYMBOL: char = 'D';
/// Input symbol for the goal.
pub const GOAL_SYMBOL: char = 'G';
/// Input symbol for the player start.
pub const PLAYER_SYMBOL: char = 'P';
/// Input symbols accepted as levers.
pub const LEVER_SYMBOLS: [char; 3] = ['A', 'B', 'C'];

/// The two kinds of togglable obstacle.
///
/// The kind only matters for rendering; both behave identically under the
/// movement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapKind {
    Trapdoor,
    Drawbridge,
}

impl TrapKind {
    /// Maps a trap icon from the world description to its kind.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            TRAPDOOR_SYMBOL => Some(TrapKind::Trapdoor),
            DRAWBRIDGE_SYMBOL => Some(TrapKind::Drawbridge),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            TrapKind::Trapdoor => TRAPDOOR_SYMBOL,
            TrapKind::Drawbridge => DRAWBRIDGE_SYMBOL,
        }
    }
}

/// Kind of a single grid cell.
///
/// `TrapSlot` is what the static map stores for a trap position. Movement
/// rules never look at it directly: they resolve it to `Solid` or `Air`
/// against the trap vector of a [`GameState`](crate::GameState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Solid,
    Ladder,
    Air,
    TrapSlot(TrapKind),
    Goal,
}

impl Tile {
    /// Whether the tile blocks the agent from entering it.
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Solid)
    }

    /// Whether the agent may walk while standing on top of this tile.
    pub fn is_ground(self) -> bool {
        matches!(self, Tile::Solid | Tile::Ladder)
    }

    /// Symbol used when drawing the tile.
    pub fn symbol(self) -> char {
        match self {
            Tile::Solid => SOLID_SYMBOL,
            Tile::Ladder => LADDER_SYMBOL,
            Tile::Air => AIR_SYMBOL,
            Tile::TrapSlot(kind) => kind.symbol(),
            Tile::Goal => GOAL_SYMBOL,
        }
    }
}

/// A grid coordinate. Rows grow downward, columns grow rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// One cell up, or `None` past the top edge.
    pub fn up(self) -> Option<Self> {
        self.row.checked_sub(1).map(|row| Self::new(row, self.col))
    }

    /// One cell down, or `None` if the row index would overflow.
    pub fn down(self) -> Option<Self> {
        self.row.checked_add(1).map(|row| Self::new(row, self.col))
    }

    /// One cell left, or `None` past the left edge.
    pub fn left(self) -> Option<Self> {
        self.col.checked_sub(1).map(|col| Self::new(self.row, col))
    }

    /// One cell right, or `None` if the column index would overflow.
    pub fn right(self) -> Option<Self> {
        self.col.checked_add(1).map(|col| Self::new(self.row, col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Index of a trap slot in the load-time trap ordering.
///
/// Kept distinct from row and column indices so the two cannot be mixed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrapId(pub usize);

impl TrapId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TrapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trap#{}", self.0)
    }
}
