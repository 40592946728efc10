pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{
    normalize_note_name, ModeSelection, OpenString, OutputFormat, RenderOptions, Spelling,
};
#[cfg(feature = "cli")]
use crate::domain::ports::ChartConfig;
#[cfg(feature = "cli")]
use crate::domain::tables;
#[cfg(feature = "cli")]
use crate::utils::error::{FretboardError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_PRESET: &str = "standard";

/// Upper bound accepted from flags and chart files.
pub const MAX_FRETS: usize = 48;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fretboard")]
#[command(about = "Print the notes of a stringed instrument's fretboard, optionally within a mode")]
pub struct CliConfig {
    /// Open strings, lowest first, e.g. E2,A2,D3,G3,B3,E4
    #[arg(long, value_delimiter = ',', conflicts_with = "preset")]
    pub tuning: Vec<String>,

    /// Named tuning used when --tuning is not given
    #[arg(long)]
    pub preset: Option<String>,

    #[arg(long, default_value = "12")]
    pub frets: usize,

    /// Root note of the mode to highlight
    #[arg(long)]
    pub root: Option<String>,

    /// Named mode, e.g. aeolian
    #[arg(long, conflicts_with = "intervals")]
    pub mode: Option<String>,

    /// Semitone intervals from the root, e.g. 0,2,4,5,7,9,11
    #[arg(long, value_delimiter = ',')]
    pub intervals: Vec<u8>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Use flat spellings in the table
    #[arg(long)]
    pub flats: bool,

    /// Hide notes outside the mode in the table
    #[arg(long)]
    pub scale_only: bool,

    /// Write the chart to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, help = "List supported note names and exit")]
    pub list_notes: bool,

    #[arg(long, help = "List supported modes and exit")]
    pub list_modes: bool,

    #[arg(long, help = "List tuning presets and exit")]
    pub list_presets: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Text for whichever `--list-*` flag was given, if any.
    pub fn listing(&self) -> Option<String> {
        if self.list_notes {
            Some(tables::supported_notes().join(", "))
        } else if self.list_modes {
            Some(tables::supported_modes().join(", "))
        } else if self.list_presets {
            Some(
                tables::supported_presets()
                    .into_iter()
                    .filter_map(|name| {
                        tables::preset(name).map(|strings| {
                            let tuning: Vec<String> =
                                strings.iter().map(ToString::to_string).collect();
                            format!("{}: {}", name, tuning.join(","))
                        })
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        } else {
            None
        }
    }
}

#[cfg(feature = "cli")]
impl ChartConfig for CliConfig {
    fn open_strings(&self) -> Result<Vec<OpenString>> {
        if !self.tuning.is_empty() {
            return self.tuning.iter().map(|token| token.parse::<OpenString>()).collect();
        }

        let name = self.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        tables::preset(name).ok_or_else(|| FretboardError::UnknownPreset {
            preset: name.to_string(),
            supported: tables::supported_presets(),
        })
    }

    fn frets(&self) -> Result<usize> {
        Ok(self.frets)
    }

    fn mode(&self) -> Result<Option<ModeSelection>> {
        let Some(root) = self.root.as_deref() else {
            if self.mode.is_some() || !self.intervals.is_empty() {
                return Err(FretboardError::MissingConfig {
                    field: "root".to_string(),
                });
            }
            return Ok(None);
        };

        let root = normalize_note_name(root.trim());
        if !self.intervals.is_empty() {
            return Ok(Some(ModeSelection {
                root,
                intervals: self.intervals.clone(),
                name: None,
            }));
        }

        let name = self.mode.as_deref().ok_or_else(|| FretboardError::MissingConfig {
            field: "mode or intervals".to_string(),
        })?;
        let intervals = tables::mode_intervals(name).ok_or_else(|| {
            FretboardError::UnsupportedMode {
                mode: name.to_string(),
                supported: tables::supported_modes(),
            }
        })?;

        Ok(Some(ModeSelection {
            root,
            intervals: intervals.to_vec(),
            name: Some(name.to_ascii_lowercase()),
        }))
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            spelling: if self.flats {
                Spelling::Flat
            } else {
                Spelling::Sharp
            },
            scale_only: self.scale_only,
        }
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("frets", self.frets, 1, MAX_FRETS)?;
        if let Some(path) = &self.output {
            validation::validate_path("output", path)?;
        }
        if let Some(root) = &self.root {
            validation::validate_non_empty_string("root", root)?;
        }
        for interval in &self.intervals {
            validation::validate_range("intervals", *interval, 0, 11)?;
        }
        Ok(())
    }
}
