//! Generic grid for per-cell data

use crate::core::types::Position;

/// Generic 2D grid stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: Clone> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a grid by evaluating `f` at every position, row-major
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Same shape, new contents
    pub fn map<U: Clone>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if self.in_bounds(x, y) {
            Some(&self.data[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if self.in_bounds(x, y) {
            Some(&mut self.data[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if self.in_bounds(x, y) {
            self.data[y * self.width + x] = value;
        }
    }

    #[inline]
    pub fn at(&self, pos: Position) -> Option<&T> {
        self.get(pos.x, pos.y)
    }

    #[inline]
    pub fn at_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.get_mut(pos.x, pos.y)
    }

    /// Positions in row-major order (y outer, x inner)
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Orthogonal neighbors in the order left, right, up, down
    pub fn neighbors4(&self, x: usize, y: usize) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        if !self.in_bounds(x, y) {
            return neighbors;
        }
        if x > 0 {
            neighbors.push(Position::new(x - 1, y));
        }
        if x + 1 < self.width {
            neighbors.push(Position::new(x + 1, y));
        }
        if y > 0 {
            neighbors.push(Position::new(x, y - 1));
        }
        if y + 1 < self.height {
            neighbors.push(Position::new(x, y + 1));
        }
        neighbors
    }

    /// Surrounding ring of up to 8 positions, row-major
    pub fn neighbors8(&self, x: usize, y: usize) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(8);
        if !self.in_bounds(x, y) {
            return neighbors;
        }
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx >= 0 && ny >= 0 && self.in_bounds(nx as usize, ny as usize) {
                    neighbors.push(Position::new(nx as usize, ny as usize));
                }
            }
        }
        neighbors
    }
}
