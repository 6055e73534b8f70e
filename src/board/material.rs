// Copyright 2026 Tobin Edwards
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
use std::ops::Not;
use strum_macros::Display;
use strum_macros::EnumIter;

use super::grid::Mask;
use super::position::Position;
use super::Board;

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Kind {
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    pub fn is_king(&self) -> bool {
        matches!(*self, Kind::King)
    }
    pub fn symbol(&self) -> char {
        match self {
            Kind::Knight => 'N',
            Kind::Bishop => 'B',
            Kind::Rook => 'R',
            Kind::Queen => 'Q',
            Kind::King => 'K',
        }
    }
}

/// Handle to a piece owned by a [`Board`]. Handles are only minted by
/// the board and stay valid for its whole lifetime, captured or not.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(usize);

impl PieceId {
    #[inline]
    pub(super) const fn new(index: usize) -> Self {
        Self(index)
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece of a given color and kind.
///
/// `position` mirrors the cell the piece occupies on its board. Only
/// [`Board::place_piece`] and [`Board::remove_piece`] write it, in the
/// same step that writes the cell, so the two never disagree. A piece
/// that is not on the board (newly created or captured) has no position.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    color: Color,
    kind: Kind,
    position: Option<Position>,
    move_count: u32,
}

impl Piece {
    pub(super) fn new(id: PieceId, color: Color, kind: Kind) -> Self {
        Self {
            id,
            color,
            kind,
            position: None,
            move_count: 0,
        }
    }
    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.position
    }
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }
    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind.is_king()
    }

    #[inline]
    pub(super) fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
    #[inline]
    pub(super) fn increase_move_count(&mut self) {
        self.move_count += 1;
    }
    #[inline]
    pub(super) fn decrease_move_count(&mut self) {
        debug_assert!(self.move_count > 0);
        self.move_count = self.move_count.saturating_sub(1);
    }

    /// Cells this piece may move to on `board`. A piece that is not on
    /// the board has nowhere to go.
    pub fn legal_moves(&self, board: &Board) -> Mask {
        match self.position {
            Some(from) => self.kind.legal_moves(board, from, self.color),
            None => Mask::empty(board.rows(), board.columns()),
        }
    }

    pub fn possible_move(&self, board: &Board, target: Position) -> bool {
        self.legal_moves(board).contains(target)
    }

    pub fn is_there_any_possible_move(&self, board: &Board) -> bool {
        !self.legal_moves(board).is_empty()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.color {
            White => self.kind.symbol(),
            Black => self.kind.symbol().to_ascii_lowercase(),
        };
        write!(f, "{}", symbol)
    }
}
