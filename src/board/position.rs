// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use strum_macros::EnumIter;
use thiserror::Error;

/// Rows (and columns) of a chess board. Human coordinates only make
/// sense on a board of this size.
pub const CHESS_SIZE: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Expecting a column 'a'..'h' followed by a row 1..8, got {0:?}")]
    Malformed(String),
    #[error("Position {0} has no chess coordinates")]
    OffBoard(Position),
}

/// Zero-based (row, column) coordinates. Row 0 is the top of the board
/// as printed, which is rank 8 in chess notation.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    column: usize,
}

impl Position {
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, column): (usize, usize)) -> Self {
        Self::new(row, column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub rows: isize,
    pub columns: isize,
}

impl Offset {
    pub const fn new(rows: isize, columns: isize) -> Self {
        Self { rows, columns }
    }
}

// Only the lower bound is checked here; the upper bound belongs to
// whichever board the position is used with.
impl Add<Offset> for Position {
    type Output = Option<Position>;
    fn add(self, rhs: Offset) -> Self::Output {
        let row = self.row.checked_add_signed(rhs.rows)?;
        let column = self.column.checked_add_signed(rhs.columns)?;
        Some(Position::new(row, column))
    }
}

impl Add<Direction> for Position {
    type Output = Option<Position>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

impl Direction {
    pub fn horizontals() -> impl Iterator<Item = Self> {
        [Up, Left, Right, Down].into_iter()
    }
    pub fn diagonals() -> impl Iterator<Item = Self> {
        [UpLeft, UpRight, DownLeft, DownRight].into_iter()
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(-1, -1),
            Up => Self::new(-1, 0),
            UpRight => Self::new(-1, 1),
            Left => Self::new(0, -1),
            Right => Self::new(0, 1),
            DownLeft => Self::new(1, -1),
            Down => Self::new(1, 0),
            DownRight => Self::new(1, 1),
        }
    }
}

/// Human coordinates on an 8x8 board: a column letter `a`..`h` and a
/// row number `1`..`8`, e.g. `e1`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ChessPosition {
    column: char,
    row: u8,
}

impl ChessPosition {
    pub fn new(column: char, row: u8) -> Result<Self, PositionError> {
        let column = column.to_ascii_lowercase();
        if !('a'..='h').contains(&column) || !(1..=8).contains(&row) {
            return Err(PositionError::Malformed(format!("{column}{row}")));
        }
        Ok(Self { column, row })
    }
    #[inline]
    pub fn column(&self) -> char {
        self.column
    }
    #[inline]
    pub fn row(&self) -> u8 {
        self.row
    }
    #[inline]
    pub fn to_position(&self) -> Position {
        Position::new(
            CHESS_SIZE - self.row as usize,
            (self.column as usize) - ('a' as usize),
        )
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for ChessPosition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PositionError::Malformed(s.to_string());
        let mut chars = s.trim().chars();
        let column = chars.next().ok_or_else(malformed)?;
        let row: u8 = chars.as_str().parse().map_err(|_| malformed())?;
        Self::new(column, row).map_err(|_| malformed().into())
    }
}

impl TryFrom<String> for ChessPosition {
    type Error = anyhow::Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChessPosition> for String {
    fn from(value: ChessPosition) -> Self {
        value.to_string()
    }
}

impl From<ChessPosition> for Position {
    fn from(value: ChessPosition) -> Self {
        value.to_position()
    }
}

impl TryFrom<Position> for ChessPosition {
    type Error = PositionError;
    fn try_from(value: Position) -> Result<Self, Self::Error> {
        if value.row >= CHESS_SIZE || value.column >= CHESS_SIZE {
            return Err(PositionError::OffBoard(value));
        }
        let column = (b'a' + value.column as u8) as char;
        let row = (CHESS_SIZE - value.row) as u8;
        Self::new(column, row)
    }
}
