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

//! Board and pieces
//!
//! A _board_ is a fixed-size grid of cells, each holding at most one
//! piece. It has no notion of turns, check or captures; those belong to
//! a [`Match`](crate::Match). Some of the key abstractions include:
//!
//! * A `Position` is a zero-based (row, column) pair. Row 0 is printed
//!   at the top. `ChessPosition` translates human coordinates such as
//!   `e1` into positions on an 8-by-8 board and back.
//!
//! * A `Grid` is the plain array-backed container underneath the board.
//!   A `Mask` is a grid of flags used as a legality matrix: the cells a
//!   piece may move to are set.
//!
//! * A `Piece` has a `Color`, a `Kind` and a position. The board owns
//!   every piece it ever created and hands out `PieceId`s. Captured
//!   pieces stay owned by the board with no position.
//!
//! * `Kind` is a closed set of movement rules (`King`, `Queen`, `Rook`,
//!   `Bishop`, `Knight`), each producing a `Mask` for a given board.
//!

use serde::{Deserialize, Serialize};
use std::ops::Index;
use thiserror::Error;

mod grid;
mod material;
mod position;
mod rules;

pub use grid::*;
pub use material::*;
pub use position::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("A board needs at least one row and one column, got {rows}x{columns}")]
    Structural { rows: usize, columns: usize },
    #[error("Position {0} is out of range")]
    OutOfRange(Position),
    #[error("There is already a piece at {0}")]
    OccupiedCell(Position),
    #[error("Piece {0} does not belong to this board")]
    UnknownPiece(PieceId),
    #[error("Piece {0} is already on the board")]
    AlreadyPlaced(PieceId),
}

use BoardError::*;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Grid<Option<PieceId>>,
    pieces: Vec<Piece>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        if rows < 1 || columns < 1 {
            return Err(Structural { rows, columns });
        }
        Ok(Self {
            cells: Grid::new(rows, columns, None),
            pieces: Vec::new(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.cells.columns()
    }

    /// Creates a piece owned by this board but not yet placed on it.
    pub fn create_piece(&mut self, color: Color, kind: Kind) -> PieceId {
        let id = PieceId::new(self.pieces.len());
        self.pieces.push(Piece::new(id, color, kind));
        id
    }

    #[inline]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.to_index())
    }

    /// Every piece this board ever created, placed or not.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn piece(&self, position: Position) -> Result<Option<&Piece>, BoardError> {
        Ok(self.piece_id(position)?.map(|id| &self[id]))
    }

    pub fn piece_id(&self, position: Position) -> Result<Option<PieceId>, BoardError> {
        self.cells
            .get(position)
            .copied()
            .ok_or(OutOfRange(position))
    }

    // Lenient lookup for callers that already checked the bounds
    #[inline]
    pub(crate) fn occupant(&self, position: Position) -> Option<&Piece> {
        self.cells
            .get(position)
            .copied()
            .flatten()
            .map(|id| &self[id])
    }

    /// Puts a detached piece on an empty cell and records the cell in
    /// the piece itself.
    pub fn place_piece(&mut self, id: PieceId, position: Position) -> Result<(), BoardError> {
        let placed = self.get(id).ok_or(UnknownPiece(id))?.position();
        if placed.is_some() {
            return Err(AlreadyPlaced(id));
        }
        if self.there_is_a_piece(position)? {
            return Err(OccupiedCell(position));
        }
        self.cells[position] = Some(id);
        self.pieces[id.to_index()].set_position(Some(position));
        Ok(())
    }

    /// Clears the cell and detaches its piece, if any. An empty cell is
    /// not an error.
    pub fn remove_piece(&mut self, position: Position) -> Result<Option<PieceId>, BoardError> {
        if !self.position_exists(position) {
            return Err(OutOfRange(position));
        }
        let removed = self.cells.take(position).flatten();
        if let Some(id) = removed {
            self.pieces[id.to_index()].set_position(None);
        }
        Ok(removed)
    }

    #[inline]
    pub fn position_exists(&self, position: Position) -> bool {
        self.cells.contains(position)
    }

    pub fn there_is_a_piece(&self, position: Position) -> Result<bool, BoardError> {
        Ok(self.piece_id(position)?.is_some())
    }

    pub(crate) fn increase_move_count(&mut self, id: PieceId) {
        if let Some(piece) = self.pieces.get_mut(id.to_index()) {
            piece.increase_move_count();
        }
    }

    pub(crate) fn decrease_move_count(&mut self, id: PieceId) {
        if let Some(piece) = self.pieces.get_mut(id.to_index()) {
            piece.decrease_move_count();
        }
    }

    /// Copy of every cell's occupant, sized like the board.
    pub fn snapshot(&self) -> Grid<Option<Piece>> {
        let mut grid = Grid::new(self.rows(), self.columns(), None);
        for (position, id) in self.cells.iter() {
            grid[position] = id.map(|id| self[id]);
        }
        grid
    }
}

impl Index<PieceId> for Board {
    type Output = Piece;
    fn index(&self, id: PieceId) -> &Self::Output {
        &self.pieces[id.to_index()]
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use proptest::prelude::*;

    #[test]
    fn test_board_needs_rows_and_columns() {
        assert_eq!(
            Board::new(0, 8),
            Err(BoardError::Structural {
                rows: 0,
                columns: 8
            })
        );
        assert!(Board::new(8, 0).is_err());
        assert!(Board::new(1, 1).is_ok());
    }
    #[test]
    fn test_piece_out_of_range() {
        let board = Board::new(8, 8).unwrap();
        let outside = Position::new(8, 0);
        assert_eq!(board.piece(outside), Err(BoardError::OutOfRange(outside)));
        assert_eq!(
            board.there_is_a_piece(outside),
            Err(BoardError::OutOfRange(outside))
        );
    }
    #[test]
    fn test_place_piece_sets_position() {
        let mut board = Board::new(8, 8).unwrap();
        let id = board.create_piece(Color::White, Kind::King);
        assert_eq!(board[id].position(), None);
        let at = Position::new(7, 4);
        board.place_piece(id, at).unwrap();
        assert_eq!(board.piece(at).unwrap().map(|p| p.id()), Some(id));
        assert_eq!(board[id].position(), Some(at));
        assert!(board.there_is_a_piece(at).unwrap());
    }
    #[test]
    fn test_place_piece_on_occupied_cell() {
        let mut board = Board::new(8, 8).unwrap();
        let at = Position::new(3, 3);
        let first = board.create_piece(Color::White, Kind::Rook);
        let second = board.create_piece(Color::Black, Kind::Rook);
        board.place_piece(first, at).unwrap();
        let before = board.clone();
        assert_eq!(
            board.place_piece(second, at),
            Err(BoardError::OccupiedCell(at))
        );
        assert_eq!(board, before);
        assert_eq!(board[second].position(), None);
    }
    #[test]
    fn test_place_piece_twice() {
        let mut board = Board::new(8, 8).unwrap();
        let id = board.create_piece(Color::White, Kind::Rook);
        board.place_piece(id, Position::new(0, 0)).unwrap();
        assert_eq!(
            board.place_piece(id, Position::new(1, 1)),
            Err(BoardError::AlreadyPlaced(id))
        );
    }
    #[test]
    fn test_place_piece_out_of_range() {
        let mut board = Board::new(8, 8).unwrap();
        let id = board.create_piece(Color::White, Kind::Rook);
        let outside = Position::new(0, 8);
        assert_eq!(
            board.place_piece(id, outside),
            Err(BoardError::OutOfRange(outside))
        );
        assert_eq!(board[id].position(), None);
    }
    #[test]
    fn test_unknown_piece() {
        let mut other = Board::new(8, 8).unwrap();
        other.create_piece(Color::White, Kind::Rook);
        let foreign = other.create_piece(Color::White, Kind::Rook);
        let mut board = Board::new(8, 8).unwrap();
        assert_eq!(
            board.place_piece(foreign, Position::new(0, 0)),
            Err(BoardError::UnknownPiece(foreign))
        );
    }
    #[test]
    fn test_remove_piece_detaches() {
        let mut board = Board::new(8, 8).unwrap();
        let id = board.create_piece(Color::Black, Kind::Knight);
        let at = Position::new(2, 6);
        board.place_piece(id, at).unwrap();
        assert_eq!(board.remove_piece(at), Ok(Some(id)));
        assert_eq!(board[id].position(), None);
        assert!(!board.there_is_a_piece(at).unwrap());
        // the piece can be placed again once detached
        board.place_piece(id, Position::new(5, 5)).unwrap();
        assert_eq!(board[id].position(), Some(Position::new(5, 5)));
    }
    #[test]
    fn test_remove_piece_from_empty_cell() {
        let mut board = Board::new(8, 8).unwrap();
        assert_eq!(board.remove_piece(Position::new(4, 4)), Ok(None));
        let outside = Position::new(8, 8);
        assert_eq!(
            board.remove_piece(outside),
            Err(BoardError::OutOfRange(outside))
        );
    }
    #[test]
    fn test_snapshot_matches_cells() {
        let mut board = Board::new(3, 2).unwrap();
        let id = board.create_piece(Color::White, Kind::Bishop);
        board.place_piece(id, Position::new(2, 1)).unwrap();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.rows(), 3);
        assert_eq!(snapshot.columns(), 2);
        assert_eq!(snapshot[Position::new(2, 1)], Some(board[id]));
        assert_eq!(snapshot.iter().filter(|(_, p)| p.is_some()).count(), 1);
    }

    proptest! {
        #[test]
        fn position_exists_iff_in_bounds(
            rows in 1usize..16,
            columns in 1usize..16,
            row in 0usize..20,
            column in 0usize..20
        ) {
            let board = Board::new(rows, columns).unwrap();
            let position = Position::new(row, column);
            let inside = row < rows && column < columns;
            prop_assert_eq!(board.position_exists(position), inside);
            prop_assert_eq!(board.there_is_a_piece(position).is_ok(), inside);
        }

        #[test]
        fn placed_piece_is_found_where_placed(row in 0usize..8, column in 0usize..8) {
            let mut board = Board::new(8, 8).unwrap();
            let id = board.create_piece(Color::Black, Kind::Queen);
            let at = Position::new(row, column);
            board.place_piece(id, at).unwrap();
            prop_assert_eq!(board.piece(at).unwrap().map(|p| p.id()), Some(id));
            prop_assert_eq!(board[id].position(), Some(at));
        }
    }
}
