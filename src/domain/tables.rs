//! Static lookup data: note spellings, pitch-class names, named modes and
//! tuning presets. Nothing here is computed at runtime.

use crate::domain::model::{OpenString, PitchClass};

pub const CHROMATIC_NOTE_COUNT: u8 = 12;

/// Pitch class at which a new octave starts (C).
pub const NEW_OCTAVE_CLASS: u8 = 4;

/// Every accepted spelling, in listing order. Enharmonic spellings share a class.
pub static NOTE_TO_CLASS: [(&str, u8); 17] = [
    ("A", 1),
    ("A#", 2),
    ("B♭", 2),
    ("B", 3),
    ("C", 4),
    ("C#", 5),
    ("D♭", 5),
    ("D", 6),
    ("D#", 7),
    ("E♭", 7),
    ("E", 8),
    ("F", 9),
    ("F#", 10),
    ("G♭", 10),
    ("G", 11),
    ("G#", 12),
    ("A♭", 12),
];

/// Indexed by `class - 1`.
pub static SHARP_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Indexed by `class - 1`.
pub static FLAT_NAMES: [&str; 12] = [
    "A", "B♭", "B", "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭",
];

pub static MODES: [(&str, [u8; 7]); 7] = [
    ("ionian", [0, 2, 4, 5, 7, 9, 11]),
    ("dorian", [0, 2, 3, 5, 7, 9, 10]),
    ("phrygian", [0, 1, 3, 5, 7, 8, 10]),
    ("lydian", [0, 2, 4, 6, 7, 9, 11]),
    ("mixolydian", [0, 2, 4, 5, 7, 9, 10]),
    ("aeolian", [0, 2, 3, 5, 7, 8, 10]),
    ("locrian", [0, 1, 3, 5, 6, 8, 10]),
];

/// Open strings listed from the lowest-pitched string up.
pub static TUNING_PRESETS: [(&str, &[(&str, i32)]); 4] = [
    (
        "standard",
        &[("E", 2), ("A", 2), ("D", 3), ("G", 3), ("B", 3), ("E", 4)],
    ),
    (
        "drop-d",
        &[("D", 2), ("A", 2), ("D", 3), ("G", 3), ("B", 3), ("E", 4)],
    ),
    ("bass", &[("E", 1), ("A", 1), ("D", 2), ("G", 2)]),
    ("ukulele", &[("G", 4), ("C", 4), ("E", 4), ("A", 4)]),
];

pub fn note_to_class(name: &str) -> Option<PitchClass> {
    NOTE_TO_CLASS
        .iter()
        .find(|(spelling, _)| *spelling == name)
        .and_then(|(_, class)| PitchClass::new(*class))
}

pub fn sharp_name(class: PitchClass) -> &'static str {
    SHARP_NAMES[class.index()]
}

pub fn flat_name(class: PitchClass) -> &'static str {
    FLAT_NAMES[class.index()]
}

pub fn supported_notes() -> Vec<&'static str> {
    NOTE_TO_CLASS.iter().map(|(name, _)| *name).collect()
}

pub fn mode_intervals(name: &str) -> Option<&'static [u8]> {
    let wanted = name.trim().to_ascii_lowercase();
    MODES
        .iter()
        .find(|(mode, _)| *mode == wanted)
        .map(|(_, intervals)| intervals.as_slice())
}

pub fn supported_modes() -> Vec<&'static str> {
    MODES.iter().map(|(name, _)| *name).collect()
}

pub fn preset(name: &str) -> Option<Vec<OpenString>> {
    let wanted = name.trim().to_ascii_lowercase();
    TUNING_PRESETS
        .iter()
        .find(|(preset, _)| *preset == wanted)
        .map(|(_, strings)| {
            strings
                .iter()
                .map(|(note, octave)| OpenString::new(*note, Some(*octave)))
                .collect()
        })
}

pub fn supported_presets() -> Vec<&'static str> {
    TUNING_PRESETS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enharmonic_spellings_share_a_class() {
        assert_eq!(note_to_class("A#"), PitchClass::new(2));
        assert_eq!(note_to_class("B♭"), PitchClass::new(2));
        assert_eq!(note_to_class("G♭"), note_to_class("F#"));
        assert_eq!(note_to_class("H"), None);
        assert_eq!(note_to_class("a"), None);
    }

    #[test]
    fn test_supported_notes_cover_every_class() {
        let notes = supported_notes();
        assert_eq!(notes.len(), 17);

        let mut classes: Vec<u8> = NOTE_TO_CLASS.iter().map(|(_, class)| *class).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_name_tables_agree_with_note_map() {
        for class in PitchClass::all() {
            assert_eq!(note_to_class(sharp_name(class)), Some(class));
            assert_eq!(note_to_class(flat_name(class)), Some(class));
        }
    }

    #[test]
    fn test_mode_lookup_is_case_insensitive() {
        assert_eq!(mode_intervals("Aeolian"), Some(&[0, 2, 3, 5, 7, 8, 10][..]));
        assert_eq!(mode_intervals("blues"), None);
        assert_eq!(supported_modes().len(), 7);
        for (_, intervals) in MODES.iter() {
            assert_eq!(intervals[0], 0);
        }
    }

    #[test]
    fn test_standard_preset() {
        let strings = preset("standard").unwrap();
        assert_eq!(strings.len(), 6);
        assert_eq!(strings[0], OpenString::new("E", Some(2)));
        assert_eq!(strings[5], OpenString::new("E", Some(4)));
        assert!(preset("banjo").is_none());
    }
}
