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

//! Turn-based chess match engine
//!
//! [`Board`] holds pieces on a grid and enforces placement rules.
//! [`Match`] drives a game on top of it: move validation, execution
//! with rollback, and check/checkmate detection.
//!
//! ```
//! use riff_match::{ChessPosition, Color, Match};
//!
//! let mut game = Match::new();
//! let from: ChessPosition = "h7".parse().unwrap();
//! let to: ChessPosition = "a7".parse().unwrap();
//! game.execute_move(from, to).unwrap();
//! assert!(game.is_check());
//! assert_eq!(game.current_player(), Color::Black);
//! ```

mod board;
mod game;

pub use board::*;
pub use game::*;
