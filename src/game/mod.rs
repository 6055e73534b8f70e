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

//! A match between two players
//!
//! A `Match` owns its board and drives every move through the same
//! steps: validate the source and target, apply the move, make sure the
//! mover's king is not left attacked (undoing the move if it is), then
//! update the check and checkmate flags and hand the turn over.
//!
//! Matches carry no global state, so any number of them can live side
//! by side. A match is not meant to be shared between threads while a
//! move is in flight; wrap it in a single lock if it must be.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::board::{
    Board, BoardError, Color, Grid, Kind, Mask, Piece, PieceId, Position, CHESS_SIZE,
};

mod config;
mod trial;

pub use config::*;
pub use trial::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("There is no piece at {0}")]
    NoPieceAtSource(Position),
    #[error("The piece at {0} belongs to the other player")]
    WrongOwner(Position),
    #[error("The piece at {0} has no possible moves")]
    NoLegalMoves(Position),
    #[error("The piece at {0} cannot move to {1}")]
    IllegalTarget(Position, Position),
    #[error("A move cannot leave your own king in check")]
    IllegalSelfCheck,
    #[error("Expecting exactly one {0} king on the board")]
    MissingKing(Color),
    #[error("The {0} king is attacked while its opponent is to move")]
    ExposedKing(Color),
    #[error("The match is over")]
    Finished,
    #[error(transparent)]
    Board(#[from] BoardError),
}

use MatchError::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult {
    CheckMate(Color),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    board: Board,
    turn: u32,
    current_player: Color,
    check: bool,
    check_mate: bool,
    pieces_on_board: Vec<PieceId>,
    captured_pieces: Vec<PieceId>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// A match with the default layout, White to move.
    pub fn new() -> Self {
        // Safety: the default layout has one king per side on distinct cells
        Self::with_config(&MatchConfig::default())
            .expect("Match::new: invalid default layout")
    }

    /// An 8x8 match with no pieces. Place pieces with
    /// [`Match::place_new_piece`] before moving.
    pub fn empty() -> Self {
        // Safety: a chess board has a non-zero size
        let board =
            Board::new(CHESS_SIZE, CHESS_SIZE).expect("Match::empty: invalid board size");
        Self {
            board,
            turn: 1,
            current_player: Color::White,
            check: false,
            check_mate: false,
            pieces_on_board: Vec::new(),
            captured_pieces: Vec::new(),
        }
    }

    /// A match laid out from `config`, White to move. The layout needs
    /// exactly one king per color, and Black's king must not already be
    /// attacked.
    pub fn with_config(config: &MatchConfig) -> Result<Self, MatchError> {
        let mut game = Self::empty();
        for placement in config.layout() {
            game.place_new_piece(placement.color, placement.kind, placement.at)?;
        }
        for color in Color::iter() {
            let kings = game
                .own_pieces(color)
                .filter(|&id| game.board[id].is_king())
                .count();
            if kings != 1 {
                return Err(MissingKing(color));
            }
        }
        let waiting = !game.current_player;
        if game.test_check(waiting)? {
            return Err(ExposedKing(waiting));
        }
        game.check = game.test_check(game.current_player)?;
        Ok(game)
    }

    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn is_check_mate(&self) -> bool {
        self.check_mate
    }

    pub fn result(&self) -> Option<MatchResult> {
        // the mover keeps the turn when mate is found
        self.check_mate
            .then_some(MatchResult::CheckMate(self.current_player))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// What sits on every cell, row by row.
    pub fn pieces(&self) -> Grid<Option<Piece>> {
        self.board.snapshot()
    }

    pub fn pieces_on_board(&self) -> impl Iterator<Item = &Piece> {
        self.pieces_on_board.iter().map(|&id| &self.board[id])
    }

    pub fn captured_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.captured_pieces.iter().map(|&id| &self.board[id])
    }

    /// Puts a brand new piece on the board and registers it as in play.
    pub fn place_new_piece(
        &mut self,
        color: Color,
        kind: Kind,
        at: impl Into<Position>,
    ) -> Result<PieceId, MatchError> {
        let at = at.into();
        if self.board.there_is_a_piece(at)? {
            return Err(BoardError::OccupiedCell(at).into());
        }
        let id = self.board.create_piece(color, kind);
        self.board.place_piece(id, at)?;
        self.pieces_on_board.push(id);
        Ok(id)
    }

    /// Legality matrix for the piece at `source`. Fails if the cell is
    /// empty, holds an opposing piece or the piece cannot move at all.
    pub fn possible_moves(&self, source: impl Into<Position>) -> Result<Mask, MatchError> {
        let source = source.into();
        self.validate_source_position(source)?;
        let piece = self.board.piece(source)?.ok_or(NoPieceAtSource(source))?;
        Ok(piece.legal_moves(&self.board))
    }

    /// Plays a move for the current player and returns the captured
    /// piece, if any. A rejected move leaves the match exactly as it was.
    pub fn execute_move(
        &mut self,
        source: impl Into<Position>,
        target: impl Into<Position>,
    ) -> Result<Option<Piece>, MatchError> {
        self.perform_move(source.into(), target.into())
    }

    #[instrument(
        level = "trace",
        skip(self),
        fields(turn = self.turn, player = %self.current_player),
        err
    )]
    fn perform_move(
        &mut self,
        source: Position,
        target: Position,
    ) -> Result<Option<Piece>, MatchError> {
        if self.check_mate {
            return Err(Finished);
        }
        self.validate_source_position(source)?;
        self.validate_target_position(source, target)?;

        let trial = self.make_move(source, target)?;
        match self.test_check(self.current_player) {
            Ok(false) => {}
            Ok(true) => {
                self.undo_move(trial)?;
                debug!(%source, %target, "move rolled back, king left in check");
                return Err(IllegalSelfCheck);
            }
            Err(err) => {
                self.undo_move(trial)?;
                return Err(err);
            }
        }

        let opponent = !self.current_player;
        let (check, check_mate) = match self.status(opponent) {
            Ok(status) => status,
            Err(err) => {
                self.undo_move(trial)?;
                return Err(err);
            }
        };
        self.check = check;
        if check_mate {
            self.check_mate = true;
            info!(winner = %self.current_player, turn = self.turn, "checkmate");
        } else {
            self.next_turn();
        }
        debug!(%source, %target, check = self.check, "move committed");

        Ok(trial.captured.map(|capture| self.board[capture.piece]))
    }

    fn validate_source_position(&self, position: Position) -> Result<(), MatchError> {
        let piece = self.board.piece(position)?.ok_or(NoPieceAtSource(position))?;
        if piece.color() != self.current_player {
            return Err(WrongOwner(position));
        }
        if !piece.is_there_any_possible_move(&self.board) {
            return Err(NoLegalMoves(position));
        }
        Ok(())
    }

    fn validate_target_position(
        &self,
        source: Position,
        target: Position,
    ) -> Result<(), MatchError> {
        if !self.board.position_exists(target) {
            return Err(BoardError::OutOfRange(target).into());
        }
        let piece = self.board.piece(source)?.ok_or(NoPieceAtSource(source))?;
        if !piece.possible_move(&self.board, target) {
            return Err(IllegalTarget(source, target));
        }
        Ok(())
    }

    // Check and checkmate flags for `color`, evaluated on the current board
    fn status(&mut self, color: Color) -> Result<(bool, bool), MatchError> {
        Ok((self.test_check(color)?, self.test_check_mate(color)?))
    }

    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = !self.current_player;
    }

    fn own_pieces(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces_on_board
            .iter()
            .copied()
            .filter(move |&id| self.board[id].color() == color)
    }

    fn king(&self, color: Color) -> Result<&Piece, MatchError> {
        self.own_pieces(color)
            .map(|id| &self.board[id])
            .find(|piece| piece.is_king())
            .ok_or(MissingKing(color))
    }

    /// Whether any opposing piece can currently reach `color`'s king.
    pub fn test_check(&self, color: Color) -> Result<bool, MatchError> {
        let king = self.king(color)?;
        let position = king.position().ok_or(MissingKing(color))?;
        Ok(self
            .own_pieces(!color)
            .any(|id| self.board[id].possible_move(&self.board, position)))
    }

    /// Whether `color` is in check and no single move of theirs gets
    /// out of it. Every candidate is tried on the board and undone.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub fn test_check_mate(&mut self, color: Color) -> Result<bool, MatchError> {
        if !self.test_check(color)? {
            return Ok(false);
        }
        let candidates: Vec<PieceId> = self.own_pieces(color).collect();
        for id in candidates {
            let piece = self.board[id];
            let Some(source) = piece.position() else {
                continue;
            };
            let moves = piece.legal_moves(&self.board);
            for target in moves.iter() {
                let trial = self.make_move(source, target)?;
                let still_check = self.test_check(color);
                self.undo_move(trial)?;
                if !still_check? {
                    debug!(%source, %target, "check can be escaped");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}
