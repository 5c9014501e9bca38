use crate::core::note::{NoteDefinition, PitchClass};

/// One octave starting at middle C, bound to the bottom two letter rows
const NOTE_TABLE: [(PitchClass, &str, f32); 12] = [
    (PitchClass::C, "KeyZ", 261.626),
    (PitchClass::Db, "KeyS", 277.183),
    (PitchClass::D, "KeyX", 293.665),
    (PitchClass::Eb, "KeyD", 311.127),
    (PitchClass::E, "KeyC", 329.628),
    (PitchClass::F, "KeyV", 349.228),
    (PitchClass::Gb, "KeyG", 369.994),
    (PitchClass::G, "KeyB", 391.995),
    (PitchClass::Ab, "KeyH", 415.305),
    (PitchClass::A, "KeyN", 440.0),
    (PitchClass::Bb, "KeyJ", 466.164),
    (PitchClass::B, "KeyM", 493.883),
];

/// Fixed table of note definitions, kept in pitch order
pub struct NoteRegistry {
    notes: Vec<NoteDefinition>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        let notes = NOTE_TABLE
            .iter()
            .map(|&(pitch, key, frequency)| NoteDefinition::new(pitch, key, frequency))
            .collect();

        NoteRegistry { notes }
    }

    /// Find the note bound to a physical key code
    pub fn lookup(&self, input_key: &str) -> Option<&NoteDefinition> {
        self.notes.iter().find(|n| n.trigger_key == input_key)
    }

    pub fn get(&self, pitch_class: PitchClass) -> Option<&NoteDefinition> {
        self.position(pitch_class).map(|i| &self.notes[i])
    }

    /// Set the held flag of a note. Returns false for a pitch not in the table.
    pub fn set_active(&mut self, pitch_class: PitchClass, active: bool) -> bool {
        match self.position(pitch_class) {
            Some(i) => {
                self.notes[i].is_active = active;
                true
            }
            None => false,
        }
    }

    fn position(&self, pitch_class: PitchClass) -> Option<usize> {
        self.notes.iter().position(|n| n.pitch_class == pitch_class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteDefinition> {
        self.notes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut NoteDefinition> {
        self.notes.iter_mut()
    }

    pub fn active_notes(&self) -> impl Iterator<Item = &NoteDefinition> {
        self.notes.iter().filter(|n| n.is_active)
    }
}

impl Default for NoteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
