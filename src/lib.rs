pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{chart::ChartEngine, fretboard::Fretboard};
pub use domain::model::{
    Matrix, ModeSelection, Note, OpenString, OutputFormat, PitchClass, RenderOptions, Spelling,
};
pub use utils::error::{FretboardError, Result};
