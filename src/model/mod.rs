// File: ./src/model/mod.rs
pub mod item;
pub mod matcher;

pub use item::{Category, Event, ParseCategoryError};
pub use matcher::{FilterState, Visibility, compute_visibility, matches};
