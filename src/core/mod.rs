pub mod chart;
pub mod fretboard;
pub mod render;
pub mod resolver;

pub use crate::domain::model::{Matrix, ModeSelection, Note, OpenString, PitchClass};
pub use crate::domain::ports::{ChartConfig, Storage};
pub use crate::utils::error::Result;
