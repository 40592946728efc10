use thiserror::Error;

#[derive(Error, Debug)]
pub enum FretboardError {
    #[error("No strings provided")]
    EmptyTuning,

    #[error("Invalid number of frets: {0} (must be a positive integer)")]
    InvalidFretCount(String),

    #[error("Unsupported note: {note}. Supported notes: {}", .supported.join(", "))]
    UnsupportedNote {
        note: String,
        supported: Vec<&'static str>,
    },

    #[error("Unsupported mode: {mode}. Supported modes: {}", .supported.join(", "))]
    UnsupportedMode {
        mode: String,
        supported: Vec<&'static str>,
    },

    #[error("Octave {octave} of open string {note} leaves no room for {frets} frets")]
    OctaveOutOfRange {
        note: String,
        octave: i32,
        frets: usize,
    },

    #[error("Invalid mode intervals: at least one interval is required")]
    InvalidIntervals,

    #[error("Fretboard has not been built yet")]
    NotBuilt,

    #[error("Unknown tuning preset: {preset}. Supported presets: {}", .supported.join(", "))]
    UnknownPreset {
        preset: String,
        supported: Vec<&'static str>,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad tuning, fret count, note or mode supplied by the caller
    Input,
    /// Unreadable or inconsistent configuration
    Configuration,
    /// Rendering or writing the chart failed
    Output,
}

impl FretboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FretboardError::EmptyTuning
            | FretboardError::InvalidFretCount(_)
            | FretboardError::UnsupportedNote { .. }
            | FretboardError::UnsupportedMode { .. }
            | FretboardError::OctaveOutOfRange { .. }
            | FretboardError::InvalidIntervals
            | FretboardError::NotBuilt => ErrorCategory::Input,
            FretboardError::UnknownPreset { .. }
            | FretboardError::ConfigParse { .. }
            | FretboardError::InvalidConfigValue { .. }
            | FretboardError::MissingConfig { .. } => ErrorCategory::Configuration,
            FretboardError::Io(_)
            | FretboardError::Serialization(_)
            | FretboardError::Csv(_) => ErrorCategory::Output,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Output => format!("Could not produce the chart: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FretboardError::EmptyTuning => "Pass at least one open string, e.g. --tuning E2,A2,D3",
            FretboardError::InvalidFretCount(_) => "Use a fret count of 1 or more",
            FretboardError::UnsupportedNote { .. } => {
                "Use one of the listed note names (see --list-notes)"
            }
            FretboardError::UnsupportedMode { .. } => {
                "Use one of the listed modes (see --list-modes) or pass --intervals"
            }
            FretboardError::OctaveOutOfRange { .. } => "Use a realistic octave for the open string",
            FretboardError::InvalidIntervals => "Provide a non-empty interval list, e.g. 0,2,4,5,7,9,11",
            FretboardError::NotBuilt => "Build the fretboard before applying a mode",
            FretboardError::UnknownPreset { .. } => "Use one of the listed presets (see --list-presets)",
            FretboardError::ConfigParse { .. } => "Check that the file is valid TOML",
            FretboardError::InvalidConfigValue { .. } | FretboardError::MissingConfig { .. } => {
                "Fix the reported configuration field and try again"
            }
            FretboardError::Io(_) => "Check that the output path exists and is writable",
            FretboardError::Serialization(_) | FretboardError::Csv(_) => {
                "Try a different output format"
            }
        }
    }

    /// Process exit code used by the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::Output => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, FretboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_drive_exit_codes() {
        assert_eq!(FretboardError::EmptyTuning.category(), ErrorCategory::Input);
        assert_eq!(FretboardError::EmptyTuning.exit_code(), 2);

        let err = FretboardError::MissingConfig {
            field: "instrument.frets".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 3);

        let io = FretboardError::from(std::io::Error::other("disk full"));
        assert_eq!(io.category(), ErrorCategory::Output);
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_user_friendly_message_wraps_display() {
        let err = FretboardError::InvalidFretCount("0".to_string());
        assert_eq!(
            err.user_friendly_message(),
            "Invalid input: Invalid number of frets: 0 (must be a positive integer)"
        );
    }

    #[test]
    fn test_supported_lists_are_joined_only_for_display() {
        let err = FretboardError::UnsupportedMode {
            mode: "blues".to_string(),
            supported: vec!["ionian", "dorian"],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported mode: blues. Supported modes: ionian, dorian"
        );
    }
}
