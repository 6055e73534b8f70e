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
use std::ops::{Index, IndexMut};

use super::position::Position;

/// Fixed-size, row-major 2D container. It knows its bounds and nothing
/// about the game.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(rows: usize, columns: usize, value: T) -> Self {
        Self {
            rows,
            columns,
            cells: vec![value; rows * columns],
        }
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.column() < self.columns
    }
    #[inline]
    fn offset(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row() * self.columns + position.column())
    }
    #[inline]
    pub fn get(&self, position: Position) -> Option<&T> {
        self.offset(position).map(|i| &self.cells[i])
    }
    #[inline]
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        let i = self.offset(position)?;
        Some(&mut self.cells[i])
    }
    /// Stores `value` and returns the previous content, or hands `value`
    /// back in `Err` when the position is out of bounds.
    pub fn set(&mut self, position: Position, value: T) -> Result<T, T> {
        match self.get_mut(position) {
            Some(cell) => Ok(std::mem::replace(cell, value)),
            None => Err(value),
        }
    }
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.rows * columns).map(move |i| Position::new(i / columns, i % columns))
    }
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions().zip(self.cells.iter())
    }
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }
}

impl<T: Default> Grid<T> {
    pub fn take(&mut self, position: Position) -> Option<T> {
        self.get_mut(position).map(std::mem::take)
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;
    fn index(&self, position: Position) -> &Self::Output {
        self.get(position)
            .unwrap_or_else(|| panic!("Grid::index: {position} out of bounds"))
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        self.get_mut(position)
            .unwrap_or_else(|| panic!("Grid::index_mut: {position} out of bounds"))
    }
}

/// Legality matrix: one flag per cell, set where a piece may move.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Mask(Grid<bool>);

impl Mask {
    #[inline]
    pub fn empty(rows: usize, columns: usize) -> Self {
        Self(Grid::new(rows, columns, false))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.0.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.0.columns()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.0.cells.iter().any(|&cell| cell)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.cells.iter().filter(|&&cell| cell).count()
    }

    /// Positions outside the mask are never set.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.0.get(position).copied().unwrap_or(false)
    }

    #[inline]
    pub fn set(&mut self, position: Position) {
        if let Some(cell) = self.0.get_mut(position) {
            *cell = true;
        }
    }

    #[inline]
    pub fn reset(&mut self, position: Position) {
        if let Some(cell) = self.0.get_mut(position) {
            *cell = false;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.0
            .iter()
            .filter_map(|(position, &cell)| cell.then_some(position))
    }
}

impl Index<Position> for Mask {
    type Output = bool;
    fn index(&self, position: Position) -> &Self::Output {
        self.0.get(position).unwrap_or(&false)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for &cell in self.0.row(row) {
                write!(f, "{}", if cell { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(3, 5, 0u8);
        assert!(grid.contains(Position::new(2, 4)));
        assert!(!grid.contains(Position::new(3, 0)));
        assert!(!grid.contains(Position::new(0, 5)));
        assert_eq!(grid.get(Position::new(3, 0)), None);
    }
    #[test]
    fn test_grid_set_returns_previous() {
        let mut grid = Grid::new(2, 2, None);
        assert_eq!(grid.set(Position::new(1, 0), Some('x')), Ok(None));
        assert_eq!(grid.set(Position::new(1, 0), Some('y')), Ok(Some('x')));
        assert_eq!(grid.set(Position::new(2, 0), Some('z')), Err(Some('z')));
        assert_eq!(grid.take(Position::new(1, 0)), Some(Some('y')));
        assert_eq!(grid[Position::new(1, 0)], None);
    }
    #[test]
    fn test_grid_is_row_major() {
        let mut grid = Grid::new(2, 3, 0);
        grid[Position::new(1, 2)] = 7;
        let (last, value) = grid.iter().last().unwrap();
        assert_eq!(last, Position::new(1, 2));
        assert_eq!(*value, 7);
        assert_eq!(grid.row(1), &[0, 0, 7]);
    }
    #[test]
    fn test_mask_iter() {
        let mut mask = Mask::empty(8, 8);
        assert!(mask.is_empty());
        mask.set(Position::new(4, 4));
        mask.set(Position::new(0, 7));
        mask.set(Position::new(9, 9));
        assert_eq!(mask.len(), 2);
        let marked: Vec<_> = mask.iter().collect();
        assert_eq!(marked, vec![Position::new(0, 7), Position::new(4, 4)]);
        assert!(mask[Position::new(4, 4)]);
        assert!(!mask.contains(Position::new(9, 9)));
        mask.reset(Position::new(4, 4));
        assert_eq!(mask.len(), 1);
    }
}
