use std::fmt;

/// The twelve pitch classes of one octave, in keyboard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    Db,
    D,
    Eb,
    E,
    F,
    Gb,
    G,
    Ab,
    A,
    Bb,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Db,
        PitchClass::D,
        PitchClass::Eb,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Gb,
        PitchClass::G,
        PitchClass::Ab,
        PitchClass::A,
        PitchClass::Bb,
        PitchClass::B,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Db => "Db",
            PitchClass::D => "D",
            PitchClass::Eb => "Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Gb => "Gb",
            PitchClass::G => "G",
            PitchClass::Ab => "Ab",
            PitchClass::A => "A",
            PitchClass::Bb => "Bb",
            PitchClass::B => "B",
        }
    }

    /// Semitones above C
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_black(self) -> bool {
        matches!(
            self,
            PitchClass::Db | PitchClass::Eb | PitchClass::Gb | PitchClass::Ab | PitchClass::Bb
        )
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a tone currently sounding on a `ToneOutput`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToneId(pub u64);

/// One playable key of the piano
#[derive(Debug, Clone)]
pub struct NoteDefinition {
    pub pitch_class: PitchClass,
    /// Physical key code, e.g. "KeyZ"
    pub trigger_key: &'static str,
    pub frequency_hz: f32,
    pub is_active: bool,
    pub live_tone: Option<ToneId>,
}

impl NoteDefinition {
    pub fn new(pitch_class: PitchClass, trigger_key: &'static str, frequency_hz: f32) -> Self {
        Self {
            pitch_class,
            trigger_key,
            frequency_hz,
            is_active: false,
            live_tone: None,
        }
    }

    /// Key label shown on screen ("Z" for "KeyZ")
    pub fn key_label(&self) -> &'static str {
        self.trigger_key
            .strip_prefix("Key")
            .unwrap_or(self.trigger_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_follows_semitone_order() {
        for (i, pitch) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(pitch.index(), i);
        }
    }

    #[test]
    fn five_black_keys_per_octave() {
        let black: Vec<_> = PitchClass::ALL.iter().filter(|p| p.is_black()).collect();
        assert_eq!(black.len(), 5);
        assert!(!PitchClass::C.is_black());
        assert!(PitchClass::Gb.is_black());
    }

    #[test]
    fn key_label_strips_code_prefix() {
        let note = NoteDefinition::new(PitchClass::A, "KeyN", 440.0);
        assert_eq!(note.key_label(), "N");
        assert!(!note.is_active);
        assert!(note.live_tone.is_none());
    }

    #[test]
    fn display_uses_symbolic_name() {
        assert_eq!(PitchClass::Bb.to_string(), "Bb");
    }
}
