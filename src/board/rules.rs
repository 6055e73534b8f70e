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

//! Movement rules for each kind of piece.
//!
//! Every rule answers the same question: given a board, a starting cell
//! and the mover's color, which cells can be reached in one move? The
//! answer is a [`Mask`]. Rules know nothing about check; a king may be
//! offered a cell that is attacked, and it is up to the match to reject
//! moves that leave the mover's own king exposed.

use strum::IntoEnumIterator;

use super::grid::Mask;
use super::material::{Color, Kind};
use super::position::{Direction, Offset, Position};
use super::Board;

const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(2, -1),
    Offset::new(2, 1),
    Offset::new(-1, -2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(1, 2),
];

impl Kind {
    pub fn legal_moves(&self, board: &Board, from: Position, color: Color) -> Mask {
        let rules = Rules { board, from, color };
        match self {
            Kind::King => rules.steps(Direction::iter().map(Offset::from)),
            Kind::Knight => rules.steps(KNIGHT_OFFSETS.into_iter()),
            Kind::Rook => rules.slides(Direction::horizontals()),
            Kind::Bishop => rules.slides(Direction::diagonals()),
            Kind::Queen => rules.slides(Direction::iter()),
        }
    }
}

struct Rules<'a> {
    board: &'a Board,
    from: Position,
    color: Color,
}

impl Rules<'_> {
    fn empty(&self) -> Mask {
        Mask::empty(self.board.rows(), self.board.columns())
    }

    // `None` when the cell is off the board or holds one of our own pieces
    fn reachable(&self, to: Position) -> Option<Reach> {
        if !self.board.position_exists(to) {
            return None;
        }
        match self.board.occupant(to) {
            None => Some(Reach::Vacant),
            Some(piece) if piece.color() != self.color => Some(Reach::Capture),
            Some(_) => None,
        }
    }

    fn steps<I>(&self, offsets: I) -> Mask
    where
        I: Iterator<Item = Offset>,
    {
        let mut mask = self.empty();
        for to in offsets.filter_map(|offset| self.from + offset) {
            if self.reachable(to).is_some() {
                mask.set(to);
            }
        }
        mask
    }

    fn slides<I>(&self, directions: I) -> Mask
    where
        I: Iterator<Item = Direction>,
    {
        let mut mask = self.empty();
        for dir in directions {
            let mut next = self.from + dir;
            while let Some(to) = next {
                match self.reachable(to) {
                    Some(Reach::Vacant) => mask.set(to),
                    Some(Reach::Capture) => {
                        mask.set(to);
                        break;
                    }
                    None => break,
                }
                next = to + dir;
            }
        }
        mask
    }
}

enum Reach {
    Vacant,
    Capture,
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn place(board: &mut Board, color: Color, kind: Kind, row: usize, column: usize) -> PieceId {
        let id = board.create_piece(color, kind);
        board.place_piece(id, Position::new(row, column)).unwrap();
        id
    }

    fn destinations(board: &Board, id: PieceId) -> Mask {
        board[id].legal_moves(board)
    }

    #[test]
    fn test_king_moves_one_square() {
        let mut board = Board::new(8, 8).unwrap();
        let king = place(&mut board, Color::White, Kind::King, 4, 4);
        let mask = destinations(&board, king);
        assert_eq!(mask.len(), 8);
        assert!(mask.contains(Position::new(3, 3)));
        assert!(mask.contains(Position::new(5, 5)));
        assert!(!mask.contains(Position::new(2, 4)));
        assert!(!mask.contains(Position::new(4, 4)));
    }
    #[test]
    fn test_king_in_corner() {
        let mut board = Board::new(8, 8).unwrap();
        let king = place(&mut board, Color::Black, Kind::King, 0, 0);
        assert_eq!(destinations(&board, king).len(), 3);
    }
    #[test]
    fn test_king_blocked_by_own_piece() {
        let mut board = Board::new(8, 8).unwrap();
        let king = place(&mut board, Color::White, Kind::King, 7, 4);
        place(&mut board, Color::White, Kind::Rook, 7, 3);
        place(&mut board, Color::Black, Kind::Rook, 7, 5);
        let mask = destinations(&board, king);
        assert!(!mask.contains(Position::new(7, 3)));
        assert!(mask.contains(Position::new(7, 5)));
        assert_eq!(mask.len(), 4);
    }
    #[test]
    fn test_rook_destinations() {
        let mut board = Board::new(8, 8).unwrap();
        let rook = place(&mut board, Color::White, Kind::Rook, 3, 3);
        let mask = destinations(&board, rook);
        assert_eq!(mask.len(), 14);
        assert!(mask.contains(Position::new(0, 3)));
        assert!(mask.contains(Position::new(7, 3)));
        assert!(mask.contains(Position::new(3, 0)));
        assert!(mask.contains(Position::new(3, 7)));
        assert!(!mask.contains(Position::new(4, 4)));
    }
    #[test]
    fn test_rook_blocked() {
        let mut board = Board::new(8, 8).unwrap();
        let rook = place(&mut board, Color::White, Kind::Rook, 3, 3);
        place(&mut board, Color::White, Kind::Knight, 3, 5);
        place(&mut board, Color::Black, Kind::Knight, 1, 3);
        let mask = destinations(&board, rook);
        assert!(mask.contains(Position::new(3, 4)));
        assert!(!mask.contains(Position::new(3, 5)));
        assert!(!mask.contains(Position::new(3, 6)));
        assert!(mask.contains(Position::new(2, 3)));
        assert!(mask.contains(Position::new(1, 3)));
        assert!(!mask.contains(Position::new(0, 3)));
    }
    #[test]
    fn test_bishop_destinations() {
        let mut board = Board::new(8, 8).unwrap();
        let bishop = place(&mut board, Color::Black, Kind::Bishop, 7, 2);
        place(&mut board, Color::White, Kind::Rook, 4, 5);
        let mask = destinations(&board, bishop);
        assert!(mask.contains(Position::new(6, 1)));
        assert!(mask.contains(Position::new(5, 0)));
        assert!(mask.contains(Position::new(5, 4)));
        assert!(mask.contains(Position::new(4, 5)));
        assert!(!mask.contains(Position::new(3, 6)));
        assert_eq!(mask.len(), 5);
    }
    #[test]
    fn test_queen_destinations() {
        let mut board = Board::new(8, 8).unwrap();
        let queen = place(&mut board, Color::White, Kind::Queen, 0, 0);
        assert_eq!(destinations(&board, queen).len(), 21);
    }
    #[test]
    fn test_knight_destinations() {
        let mut board = Board::new(8, 8).unwrap();
        let knight = place(&mut board, Color::White, Kind::Knight, 7, 1);
        place(&mut board, Color::White, Kind::King, 6, 3);
        let mask = destinations(&board, knight);
        assert!(mask.contains(Position::new(5, 0)));
        assert!(mask.contains(Position::new(5, 2)));
        assert!(!mask.contains(Position::new(6, 3)));
        assert_eq!(mask.len(), 2);
    }
    #[test]
    fn test_rules_respect_board_size() {
        let mut board = Board::new(3, 4).unwrap();
        let rook = place(&mut board, Color::White, Kind::Rook, 0, 0);
        let mask = destinations(&board, rook);
        assert_eq!(mask.rows(), 3);
        assert_eq!(mask.columns(), 4);
        assert_eq!(mask.len(), 5);
    }
}
