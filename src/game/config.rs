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

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::board::{ChessPosition, Color, Kind};

use Color::*;
use Kind::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub color: Color,
    pub kind: Kind,
    pub at: ChessPosition,
}

impl Placement {
    pub fn new(color: Color, kind: Kind, at: ChessPosition) -> Self {
        Self { color, kind, at }
    }
}

/// Starting layout of a match, e.g. in RON:
///
/// ```text
/// (layout: [
///     (color: White, kind: King, at: "e1"),
///     (color: Black, kind: King, at: "e8"),
/// ])
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    layout: Vec<Placement>,
}

impl MatchConfig {
    pub fn new(layout: Vec<Placement>) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &[Placement] {
        &self.layout
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text)
            .context("failed to parse match configuration")
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::to_string(self)
            .context("failed to write match configuration")
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

static DEFAULT_CONFIG: Lazy<MatchConfig> = Lazy::new(|| {
    const LAYOUT: [(Color, Kind, char, u8); 5] = [
        (White, Rook, 'h', 7),
        (White, Rook, 'd', 1),
        (White, King, 'e', 1),
        (Black, Rook, 'b', 8),
        (Black, King, 'a', 8),
    ];
    let layout = LAYOUT
        .into_iter()
        .filter_map(|(color, kind, column, row)| {
            let at = ChessPosition::new(column, row).ok()?;
            Some(Placement::new(color, kind, at))
        })
        .collect();
    MatchConfig::new(layout)
});
