// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size 2D grid of optional cell payloads

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, Direction};

/// A `width` x `height` grid where every position holds either a payload or nothing.
///
/// Positions are addressed with signed coordinates so that neighbor lookups may step
/// outside the grid: any lookup outside the bounds returns `None`, exactly like a
/// lookup at an empty position.
///
/// # Examples
/// ```
/// use voxctl_structures::{Direction, Grid};
///
/// let mut grid: Grid<u8> = Grid::new(2, 1);
/// grid.set(0, 0, Some(7)).unwrap();
///
/// assert_eq!(grid.get(0, 0), Some(&7));
/// assert_eq!(grid.get(1, 0), None);
/// assert_eq!(grid.neighbor(0, 0, Direction::West), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
}

/// Unchecked serialized form of a [`Grid`].
#[derive(Deserialize)]
struct RawGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = ConfigurationError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        let expected = raw.width.checked_mul(raw.height).unwrap_or(usize::MAX);
        if raw.cells.len() != expected {
            return Err(ConfigurationError::dimension_mismatch(
                format!("{}x{} grid cells", raw.width, raw.height),
                expected,
                raw.cells.len(),
            ));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl<T> Grid<T> {
    /// Create an empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        cells.resize_with(width * height, || None);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Create a grid by evaluating `f` at every position.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(i32, i32) -> Option<T>,
    {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x as i32, y as i32));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` if `other` has the same width and height.
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fail with [`ConfigurationError::GridShapeMismatch`] unless `other` has this grid's shape.
    pub fn check_same_shape<U>(
        &self,
        other: &Grid<U>,
        what: &str,
    ) -> Result<(), ConfigurationError> {
        if self.same_shape(other) {
            return Ok(());
        }
        Err(ConfigurationError::GridShapeMismatch {
            what: what.to_string(),
            expected_width: self.width,
            expected_height: self.height,
            actual_width: other.width,
            actual_height: other.height,
        })
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Payload at `(x, y)`; `None` when out of bounds or empty.
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        match self.index(x, y) {
            Some(i) => self.cells[i].as_mut(),
            None => None,
        }
    }

    /// Payload of the neighbor of `(x, y)` in direction `dir`.
    pub fn neighbor(&self, x: i32, y: i32, dir: Direction) -> Option<&T> {
        let (nx, ny) = dir.neighbor_of(x, y);
        self.get(nx, ny)
    }

    /// Store `value` at `(x, y)`, returning the previous payload.
    pub fn set(&mut self, x: i32, y: i32, value: Option<T>) -> Result<Option<T>, ConfigurationError> {
        let index = self.index(x, y).ok_or(ConfigurationError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    /// Number of non-empty positions.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every position in row-major order, with its payload if any.
    pub fn entries(&self) -> impl Iterator<Item = (i32, i32, Option<&T>)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| ((i % width) as i32, (i / width) as i32, c.as_ref()))
    }

    /// Non-empty positions in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, &T)> + '_ {
        self.entries()
            .filter_map(|(x, y, value)| value.map(|v| (x, y, v)))
    }

    /// Mutable access to every payload, in row-major order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.cells.iter_mut().filter_map(|c| c.as_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    /// New grid of the same shape with `f` applied to every payload; empty positions stay empty.
    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(i32, i32, &T) -> U,
    {
        self.filter_map(|x, y, v| Some(f(x, y, v)))
    }

    /// Like [`Grid::map`], but `f` may also leave an occupied position empty.
    pub fn filter_map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(i32, i32, &T) -> Option<U>,
    {
        let width = self.width;
        Grid {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    c.as_ref()
                        .and_then(|v| f((i % width) as i32, (i / width) as i32, v))
                })
                .collect(),
        }
    }
}
