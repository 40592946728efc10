use crate::core::resolver;
use crate::domain::model::{Matrix, Note, OpenString, PitchClass};
use crate::domain::tables;
use crate::utils::error::{FretboardError, Result};

/// Owns the note matrix of one instrument neck.
///
/// Starts unbuilt (`Fretboard::default()`) or built (`Fretboard::new`).
/// `build` and `apply_mode` validate everything before touching the stored
/// matrix, and each successful call replaces it wholesale. Instances are not
/// meant to be shared; use one per fretboard.
#[derive(Debug, Clone, Default)]
pub struct Fretboard {
    matrix: Option<Matrix>,
}

impl Fretboard {
    pub fn new(strings: &[OpenString], frets: usize) -> Result<Self> {
        let mut fretboard = Self::default();
        fretboard.build(strings, frets)?;
        Ok(fretboard)
    }

    pub fn is_built(&self) -> bool {
        self.matrix.is_some()
    }

    pub fn matrix(&self) -> Option<&Matrix> {
        self.matrix.as_ref()
    }

    /// Builds `frets + 1` cells per string: the open string plus every fret.
    pub fn build(&mut self, strings: &[OpenString], frets: usize) -> Result<&Matrix> {
        if strings.is_empty() {
            return Err(FretboardError::EmptyTuning);
        }

        if frets == 0 {
            return Err(FretboardError::InvalidFretCount(frets.to_string()));
        }
        let positions = frets
            .checked_add(1)
            .ok_or_else(|| FretboardError::InvalidFretCount(frets.to_string()))?;

        let open_classes = strings
            .iter()
            .map(|string| class_of(&string.note))
            .collect::<Result<Vec<_>>>()?;

        for string in strings {
            check_octave_headroom(string, frets)?;
        }

        let rows = strings
            .iter()
            .zip(open_classes)
            .map(|(string, open_class)| string_notes(open_class, string.octave, positions))
            .collect();

        tracing::debug!(
            "Built fretboard with {} strings and {} frets",
            strings.len(),
            frets
        );

        Ok(&*self.matrix.insert(Matrix::new(rows)))
    }

    /// Annotates every cell with its position in the mode rooted at `root`.
    ///
    /// Positions depend only on each cell's pitch class, so any earlier
    /// annotation is discarded rather than built upon.
    pub fn apply_mode(&mut self, root: &str, intervals: &[u8]) -> Result<&Matrix> {
        let current = self.matrix.as_ref().ok_or(FretboardError::NotBuilt)?;
        let root_class = class_of(root)?;

        if intervals.is_empty() {
            return Err(FretboardError::InvalidIntervals);
        }

        let annotated = current.map_notes(|note| {
            note.with_scale_position(scale_position(note.pitch_class, root_class, intervals))
        });

        tracing::debug!("Applied mode rooted at {} with intervals {:?}", root, intervals);

        Ok(&*self.matrix.insert(annotated))
    }

    pub fn apply_named_mode(&mut self, root: &str, mode: &str) -> Result<&Matrix> {
        let intervals =
            tables::mode_intervals(mode).ok_or_else(|| FretboardError::UnsupportedMode {
                mode: mode.to_string(),
                supported: tables::supported_modes(),
            })?;
        self.apply_mode(root, intervals)
    }

    /// Drops every scale position.
    pub fn clear_mode(&mut self) -> Result<&Matrix> {
        let current = self.matrix.as_ref().ok_or(FretboardError::NotBuilt)?;
        let cleared = current.map_notes(|note| note.with_scale_position(None));
        Ok(&*self.matrix.insert(cleared))
    }
}

fn class_of(note: &str) -> Result<PitchClass> {
    tables::note_to_class(note).ok_or_else(|| FretboardError::UnsupportedNote {
        note: note.to_string(),
        supported: tables::supported_notes(),
    })
}

/// A string crosses C at most once per twelve frets, plus once more for the
/// partial octave.
fn check_octave_headroom(string: &OpenString, frets: usize) -> Result<()> {
    let Some(octave) = string.octave else {
        return Ok(());
    };

    i32::try_from(frets / usize::from(tables::CHROMATIC_NOTE_COUNT) + 1)
        .ok()
        .and_then(|crossings| octave.checked_add(crossings))
        .map(|_| ())
        .ok_or_else(|| FretboardError::OctaveOutOfRange {
            note: string.note.clone(),
            octave,
            frets,
        })
}

fn string_notes(open_class: PitchClass, open_octave: Option<i32>, positions: usize) -> Vec<Note> {
    let mut octave = open_octave;
    let mut notes = Vec::with_capacity(positions);
    notes.push(resolver::resolve(open_class, octave));

    for fret in 1..positions {
        let class = open_class.offset(fret);
        if class == PitchClass::C {
            if let Some(current) = octave.as_mut() {
                *current += 1;
            }
        }
        notes.push(resolver::resolve(class, octave));
    }

    notes
}

/// 1 for the root, otherwise the 1-based index of the first matching interval.
fn scale_position(class: PitchClass, root: PitchClass, intervals: &[u8]) -> Option<u8> {
    if class == root {
        return Some(1);
    }

    intervals
        .iter()
        .position(|&interval| root.offset(usize::from(interval)) == class)
        .and_then(|index| u8::try_from(index + 1).ok())
}
