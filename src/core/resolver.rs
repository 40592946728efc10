use crate::domain::model::{Note, PitchClass};
use crate::domain::tables;

/// Materializes the cell for `pitch_class`, without a scale position.
pub fn resolve(pitch_class: PitchClass, octave: Option<i32>) -> Note {
    Note {
        pitch_class,
        sharp_name: tables::sharp_name(pitch_class),
        flat_name: tables::flat_name(pitch_class),
        octave,
        scale_position: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fills_both_spellings() {
        let note = resolve(PitchClass::new(2).unwrap(), Some(3));
        assert_eq!(note.sharp_name, "A#");
        assert_eq!(note.flat_name, "B♭");
        assert_eq!(note.octave, Some(3));
        assert_eq!(note.scale_position, None);
    }

    #[test]
    fn test_resolve_natural_note() {
        let note = resolve(PitchClass::C, None);
        assert_eq!(note.pitch_class.value(), 4);
        assert_eq!(note.sharp_name, "C");
        assert_eq!(note.flat_name, "C");
        assert_eq!(note.octave, None);
    }
}
