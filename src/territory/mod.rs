//! Territory: the grid of cells and its starting layouts

pub mod cell;
pub mod grid;
pub mod partition;

pub use cell::Cell;
pub use grid::Grid;
pub use partition::{initial_owner, partition};
