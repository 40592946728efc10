use crate::domain::tables::{CHROMATIC_NOTE_COUNT, NEW_OCTAVE_CLASS};
use crate::utils::error::FretboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the twelve chromatic tones, numbered 1 (A) through 12 (G#/A♭).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(NEW_OCTAVE_CLASS);

    pub fn new(value: u8) -> Option<Self> {
        (1..=CHROMATIC_NOTE_COUNT)
            .contains(&value)
            .then_some(PitchClass(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based position, for indexing the name tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// The class `semitones` above this one, wrapped back into 1..=12.
    pub fn offset(self, semitones: usize) -> Self {
        let count = usize::from(CHROMATIC_NOTE_COUNT);
        let wrapped = (self.index() + semitones % count) % count;
        PitchClass(wrapped as u8 + 1)
    }

    pub fn all() -> impl Iterator<Item = PitchClass> {
        (1..=CHROMATIC_NOTE_COUNT).map(PitchClass)
    }
}

/// Open note of a single string, with an optional octave to track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenString {
    pub note: String,
    #[serde(default)]
    pub octave: Option<i32>,
}

impl OpenString {
    pub fn new(note: impl Into<String>, octave: Option<i32>) -> Self {
        Self {
            note: note.into(),
            octave,
        }
    }
}

impl fmt::Display for OpenString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.octave {
            Some(octave) => write!(f, "{}{}", self.note, octave),
            None => write!(f, "{}", self.note),
        }
    }
}

/// Parses command-line tokens such as `E`, `E2`, `B♭3`, `Bb3` or `C-1`.
///
/// An ASCII `b` after the letter is read as a flat. The note name itself is
/// checked later, when the fretboard is built.
impl FromStr for OpenString {
    type Err = FretboardError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let split = token
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .unwrap_or(token.len());
        let (name, octave) = token.split_at(split);

        if name.is_empty() {
            return Err(FretboardError::InvalidConfigValue {
                field: "tuning".to_string(),
                value: token.to_string(),
                reason: "Missing note name".to_string(),
            });
        }

        let octave = if octave.is_empty() {
            None
        } else {
            Some(
                octave
                    .parse::<i32>()
                    .map_err(|e| FretboardError::InvalidConfigValue {
                        field: "tuning".to_string(),
                        value: token.to_string(),
                        reason: format!("Invalid octave: {}", e),
                    })?,
            )
        };

        Ok(OpenString::new(normalize_note_name(name), octave))
    }
}

/// Upper-cases the letter and turns an ASCII `b` accidental into `♭`.
pub fn normalize_note_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(letter) => {
            let rest: String = chars.collect();
            let accidental = if rest == "b" { "♭".to_string() } else { rest };
            format!("{}{}", letter.to_ascii_uppercase(), accidental)
        }
        None => String::new(),
    }
}

/// A single fretboard cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub pitch_class: PitchClass,
    pub sharp_name: &'static str,
    pub flat_name: &'static str,
    pub octave: Option<i32>,
    pub scale_position: Option<u8>,
}

impl Note {
    /// Same cell, carrying the given scale position instead of its current one.
    pub fn with_scale_position(&self, scale_position: Option<u8>) -> Note {
        Note {
            scale_position,
            ..self.clone()
        }
    }

    pub fn name(&self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharp => self.sharp_name,
            Spelling::Flat => self.flat_name,
        }
    }

    pub fn in_scale(&self) -> bool {
        self.scale_position.is_some()
    }
}

/// Notes for every string (outer) and fret (inner, fret 0 first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Matrix {
    strings: Vec<Vec<Note>>,
}

impl Matrix {
    pub(crate) fn new(strings: Vec<Vec<Note>>) -> Self {
        Self { strings }
    }

    pub fn strings(&self) -> &[Vec<Note>] {
        &self.strings
    }

    pub fn string(&self, string: usize) -> Option<&[Note]> {
        self.strings.get(string).map(Vec::as_slice)
    }

    pub fn note(&self, string: usize, fret: usize) -> Option<&Note> {
        self.strings.get(string).and_then(|notes| notes.get(fret))
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Cells per string, open string included.
    pub fn fret_positions(&self) -> usize {
        self.strings.first().map(Vec::len).unwrap_or(0)
    }

    /// `(string, fret, note)` for every cell, string by string.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Note)> {
        self.strings.iter().enumerate().flat_map(|(string, notes)| {
            notes
                .iter()
                .enumerate()
                .map(move |(fret, note)| (string, fret, note))
        })
    }

    pub(crate) fn map_notes<F>(&self, f: F) -> Matrix
    where
        F: Fn(&Note) -> Note,
    {
        Matrix::new(
            self.strings
                .iter()
                .map(|notes| notes.iter().map(&f).collect())
                .collect(),
        )
    }
}

/// Root note and semitone intervals of the mode to annotate with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSelection {
    pub root: String,
    pub intervals: Vec<u8>,
    /// Set when the intervals came from the named-mode table.
    #[serde(default)]
    pub name: Option<String>,
}

impl fmt::Display for ModeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", self.root, name),
            None => write!(f, "{} {:?}", self.root, self.intervals),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["table", "csv", "tsv", "json"];
}

impl FromStr for OutputFormat {
    type Err = FretboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(FretboardError::InvalidConfigValue {
                field: "output.format".to_string(),
                value: value.to_string(),
                reason: format!("Supported formats: {}", OutputFormat::NAMES.join(", ")),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharp,
    Flat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub spelling: Spelling,
    /// Blank out cells outside the applied mode (table only).
    pub scale_only: bool,
}
