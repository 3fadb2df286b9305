//! Cardinal sides of a tile and their cyclic ordering

use std::fmt;
use std::str::FromStr;

/// One of the four sides of a square tile
///
/// The ordering is cyclic and clockwise: top, right, bottom, left. Rotating a
/// tile clockwise by 90° moves the label on side `s` to side `s + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Upper edge, facing row - 1
    Top,
    /// Right edge, facing column + 1
    Right,
    /// Lower edge, facing row + 1
    Bottom,
    /// Left edge, facing column - 1
    Left,
}

impl Side {
    /// All sides in index order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position of this side in the cyclic ordering (0 = top)
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Side at the given index, wrapping modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Top,
            1 => Self::Right,
            2 => Self::Bottom,
            _ => Self::Left,
        }
    }

    /// The side facing this one across a shared edge
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The side this one ends up on after `quarter_turns` clockwise rotations
    pub const fn rotated(self, quarter_turns: usize) -> Self {
        Self::from_index(self.index() + quarter_turns % 4)
    }

    /// Row and column step toward the neighbour on this side
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::Top => [-1, 0],
            Self::Right => [0, 1],
            Self::Bottom => [1, 0],
            Self::Left => [0, -1],
        }
    }

    /// Lowercase name as used in tile set files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognised side name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSideError(pub String);

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown side '{}'", self.0)
    }
}

impl std::error::Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}
