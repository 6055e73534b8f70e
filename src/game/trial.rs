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

use crate::board::{BoardError, PieceId, Position};

use super::{Match, MatchError};

/// A move applied to the board, with everything needed to take it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub piece: PieceId,
    pub source: Position,
    pub target: Position,
    pub captured: Option<Capture>,
}

/// A captured piece and the slot it held in the on-board list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub piece: PieceId,
    pub index: usize,
}

impl Match {
    /// Moves the piece at `source` to `target`, capturing whatever is
    /// there. Only the board and the piece lists change; turn and flags
    /// are left alone.
    pub(super) fn make_move(
        &mut self,
        source: Position,
        target: Position,
    ) -> Result<Trial, MatchError> {
        // Bounds are checked before anything is touched
        let captured = self.board.piece_id(target)?;
        let piece = self
            .board
            .remove_piece(source)?
            .ok_or(MatchError::NoPieceAtSource(source))?;
        self.board.remove_piece(target)?;
        self.board.place_piece(piece, target)?;
        self.board.increase_move_count(piece);

        let captured = match captured {
            Some(captured) => {
                let index = self
                    .pieces_on_board
                    .iter()
                    .position(|&id| id == captured)
                    .ok_or(BoardError::UnknownPiece(captured))?;
                self.pieces_on_board.remove(index);
                self.captured_pieces.push(captured);
                Some(Capture {
                    piece: captured,
                    index,
                })
            }
            None => None,
        };

        Ok(Trial {
            piece,
            source,
            target,
            captured,
        })
    }

    /// Exact inverse of [`Match::make_move`]: the captured piece goes
    /// back to its cell and to the same slot in the on-board list.
    pub(super) fn undo_move(&mut self, trial: Trial) -> Result<(), MatchError> {
        let Trial {
            piece,
            source,
            target,
            captured,
        } = trial;
        self.board.remove_piece(target)?;
        self.board.place_piece(piece, source)?;
        self.board.decrease_move_count(piece);

        if let Some(Capture { piece, index }) = captured {
            self.board.place_piece(piece, target)?;
            // a trial is always undone before the next one is made, so
            // the capture is the last entry
            debug_assert_eq!(self.captured_pieces.last(), Some(&piece));
            self.captured_pieces.pop();
            self.pieces_on_board.insert(index, piece);
        }
        Ok(())
    }
}
