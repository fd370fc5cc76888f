//! Table and column reconstruction from fragment coordinates.
//!
//! This module provides the geometric building blocks used by the table
//! accumulators, also usable on their own:
//! - 1-D clustering and boundary classifiers
//! - Row/column table builder with collision lists
//! - Nearest-header column builder
//! - Debug rendering of reconstructed tables

pub mod clustering;
pub mod columns_parser;
pub mod render;
pub mod table_parser;

// Re-export main types
pub use clustering::{
    floor_boundary, nearest_anchor, ColumnClassifier, FloorClassifier, MaxClassifier,
};
pub use columns_parser::{Column, ColumnsParser};
pub use render::{
    detect_collisions, render_items, render_matrix, render_rows, render_table, Collision,
};
pub use table_parser::{clean_matrix, Cell, Matrix, TableParser, TableRow};
