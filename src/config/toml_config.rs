use crate::config::{DEFAULT_PRESET, MAX_FRETS};
use crate::domain::model::{
    normalize_note_name, ModeSelection, OpenString, OutputFormat, RenderOptions, Spelling,
};
use crate::domain::ports::ChartConfig;
use crate::domain::tables;
use crate::utils::error::{FretboardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub instrument: InstrumentConfig,
    pub mode: Option<ModeConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub name: Option<String>,
    pub frets: i64,
    pub preset: Option<String>,
    pub strings: Option<Vec<OpenString>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeConfig {
    pub root: String,
    pub name: Option<String>,
    pub intervals: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub spelling: Option<Spelling>,
    pub scale_only: Option<bool>,
    pub path: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_vars(content, |name| std::env::var(name).ok())?;

        toml::from_str(&processed_content).map_err(|e| FretboardError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with `lookup(VAR)`; unknown variables are left as-is.
    fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FretboardError::ConfigParse {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_positive_number("instrument.frets", self.instrument.frets, 1)?;
        validation::validate_range(
            "instrument.frets",
            self.instrument.frets,
            1,
            MAX_FRETS as i64,
        )?;

        if let Some(name) = &self.instrument.name {
            validation::validate_non_empty_string("instrument.name", name)?;
        }

        match (&self.instrument.strings, &self.instrument.preset) {
            (Some(_), Some(preset)) => {
                return Err(FretboardError::InvalidConfigValue {
                    field: "instrument.preset".to_string(),
                    value: preset.clone(),
                    reason: "Set either instrument.strings or instrument.preset, not both"
                        .to_string(),
                });
            }
            (Some(strings), None) if strings.is_empty() => {
                return Err(FretboardError::EmptyTuning);
            }
            (None, Some(preset)) => {
                let supported = tables::supported_presets();
                validation::validate_one_of(
                    "instrument.preset",
                    &preset.trim().to_ascii_lowercase(),
                    &supported,
                )?;
            }
            _ => {}
        }

        if let Some(mode) = &self.mode {
            validation::validate_non_empty_string("mode.root", &mode.root)?;
            match (&mode.name, &mode.intervals) {
                (Some(_), Some(_)) => {
                    return Err(FretboardError::InvalidConfigValue {
                        field: "mode".to_string(),
                        value: mode.root.clone(),
                        reason: "Set either mode.name or mode.intervals, not both".to_string(),
                    });
                }
                (None, None) => {
                    return Err(FretboardError::MissingConfig {
                        field: "mode.name or mode.intervals".to_string(),
                    });
                }
                (_, Some(intervals)) => {
                    for interval in intervals {
                        validation::validate_range("mode.intervals", *interval, 0, 11)?;
                    }
                }
                (Some(_), None) => {}
            }
        }

        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_deref()) {
            validation::validate_path("output.path", path)?;
        }

        Ok(())
    }

    pub fn instrument_name(&self) -> &str {
        self.instrument.name.as_deref().unwrap_or("instrument")
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.output.get_or_insert_with(OutputConfig::default).format = Some(format);
    }
}

impl ChartConfig for TomlConfig {
    fn open_strings(&self) -> Result<Vec<OpenString>> {
        if let Some(strings) = &self.instrument.strings {
            return Ok(strings
                .iter()
                .map(|string| {
                    OpenString::new(normalize_note_name(string.note.trim()), string.octave)
                })
                .collect());
        }

        let name = self.instrument.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        tables::preset(name).ok_or_else(|| FretboardError::UnknownPreset {
            preset: name.to_string(),
            supported: tables::supported_presets(),
        })
    }

    fn frets(&self) -> Result<usize> {
        usize::try_from(self.instrument.frets)
            .ok()
            .filter(|frets| *frets > 0)
            .ok_or_else(|| FretboardError::InvalidFretCount(self.instrument.frets.to_string()))
    }

    fn mode(&self) -> Result<Option<ModeSelection>> {
        let Some(mode) = &self.mode else {
            return Ok(None);
        };
        let root = normalize_note_name(mode.root.trim());

        if let Some(intervals) = &mode.intervals {
            return Ok(Some(ModeSelection {
                root,
                intervals: intervals.clone(),
                name: None,
            }));
        }

        let name = validation::validate_required_field("mode.name", &mode.name)?;
        let intervals = tables::mode_intervals(name).ok_or_else(|| {
            FretboardError::UnsupportedMode {
                mode: name.clone(),
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
        let output = self.output.clone().unwrap_or_default();
        RenderOptions {
            format: output.format.unwrap_or_default(),
            spelling: output.spelling.unwrap_or_default(),
            scale_only: output.scale_only.unwrap_or(false),
        }
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[instrument]
name = "bass"
frets = 5
strings = [{ note = "E", octave = 1 }, { note = "A" }]

[mode]
root = "E"
name = "phrygian"

[output]
format = "csv"
spelling = "flat"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.instrument_name(), "bass");
        assert_eq!(config.frets().unwrap(), 5);
        assert_eq!(
            config.open_strings().unwrap(),
            vec![OpenString::new("E", Some(1)), OpenString::new("A", None)]
        );

        let mode = config.mode().unwrap().unwrap();
        assert_eq!(mode.intervals, vec![0, 1, 3, 5, 7, 8, 10]);

        let options = config.render_options();
        assert_eq!(options.format, OutputFormat::Csv);
        assert_eq!(options.spelling, Spelling::Flat);
        assert!(!options.scale_only);
        assert_eq!(config.output_path(), None);
    }

    #[test]
    fn test_preset_and_defaults() {
        let toml_content = r#"
[instrument]
frets = 12
preset = "drop-d"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.open_strings().unwrap()[0], OpenString::new("D", Some(2)));
        assert_eq!(config.mode().unwrap(), None);
        assert_eq!(config.render_options(), RenderOptions::default());
        assert_eq!(config.instrument_name(), "instrument");
    }

    #[test]
    fn test_var_substitution() {
        let toml_content = r#"
[instrument]
frets = 3
strings = [{ note = "A" }]

[mode]
root = "${CHART_ROOT}"
intervals = [0, 4, 7]

[output]
path = "${CHART_DIR}/a.csv"
"#;

        let processed = TomlConfig::substitute_vars(toml_content, |name| {
            (name == "CHART_ROOT").then(|| "C#".to_string())
        })
        .unwrap();
        let config: TomlConfig = toml::from_str(&processed).unwrap();

        assert_eq!(config.mode().unwrap().unwrap().root, "C#");
        assert_eq!(config.output_path(), Some("${CHART_DIR}/a.csv"));
    }

    #[test]
    fn test_validate_bounds_fret_count() {
        let too_many = r#"
[instrument]
frets = 4096
strings = [{ note = "A" }]
"#;
        let config = TomlConfig::from_toml_str(too_many).unwrap();
        assert!(matches!(
            config.validate(),
            Err(FretboardError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let negative_frets = r#"
[instrument]
frets = -2
strings = [{ note = "A" }]
"#;
        let config = TomlConfig::from_toml_str(negative_frets).unwrap();
        assert!(config.validate().is_err());
        assert!(matches!(
            config.frets(),
            Err(FretboardError::InvalidFretCount(_))
        ));

        let both_sources = r#"
[instrument]
frets = 12
preset = "standard"
strings = [{ note = "A" }]
"#;
        let config = TomlConfig::from_toml_str(both_sources).unwrap();
        assert!(config.validate().is_err());

        let mode_without_intervals = r#"
[instrument]
frets = 12

[mode]
root = "A"
"#;
        let config = TomlConfig::from_toml_str(mode_without_intervals).unwrap();
        assert!(matches!(
            config.validate(),
            Err(FretboardError::MissingConfig { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = TomlConfig::from_toml_str("[instrument\nfrets = 12");
        assert!(matches!(result, Err(FretboardError::ConfigParse { .. })));
    }

    #[test]
    fn test_from_file_and_format_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[instrument]
frets = 7
strings = [{{ note = "G", octave = 3 }}]
"#
        )
        .unwrap();

        let mut config = TomlConfig::from_file(file.path()).unwrap();
        config.set_format(OutputFormat::Json);

        assert_eq!(config.frets().unwrap(), 7);
        assert_eq!(config.render_options().format, OutputFormat::Json);
    }
}
