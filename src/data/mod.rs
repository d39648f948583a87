//! Data structures and loading for the Stroop dataset

pub mod loader;
pub mod types;

pub use loader::DataLoader;
pub use types::{Column, StroopDataset, StroopRecord};
