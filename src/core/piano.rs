use crate::core::note::{PitchClass, ToneId};
use crate::core::registry::NoteRegistry;

/// Something that can sound sine tones
pub trait ToneOutput {
    /// Start a tone and return a handle for stopping it later
    fn start_tone(&mut self, frequency_hz: f32, gain: f32) -> ToneId;

    /// Stop a tone and release its resources
    fn stop_tone(&mut self, tone: ToneId);
}

/// Something that shows which keys are held
pub trait HighlightView {
    fn set_highlighted(&mut self, pitch_class: PitchClass, highlighted: bool);
}

/// Key listener and playback engine over a single note table
pub struct Piano<O: ToneOutput, V: HighlightView> {
    registry: NoteRegistry,
    output: O,
    view: V,
}

impl<O: ToneOutput, V: HighlightView> Piano<O, V> {
    pub fn new(registry: NoteRegistry, output: O, view: V) -> Self {
        Piano {
            registry,
            output,
            view,
        }
    }

    /// Handle a key press. Returns true when the key is bound to a note.
    pub fn on_key_down(&mut self, input_key: &str, is_repeat: bool) -> bool {
        if is_repeat {
            return false;
        }

        let Some(pitch_class) = self.registry.lookup(input_key).map(|n| n.pitch_class) else {
            return false;
        };

        log::debug!("Key down {} -> {}", input_key, pitch_class);
        self.registry.set_active(pitch_class, true);
        self.recompute_playback();
        true
    }

    /// Handle a key release. Returns true when the key is bound to a note.
    pub fn on_key_up(&mut self, input_key: &str) -> bool {
        let Some(pitch_class) = self.registry.lookup(input_key).map(|n| n.pitch_class) else {
            return false;
        };

        log::debug!("Key up {} -> {}", input_key, pitch_class);
        self.registry.set_active(pitch_class, false);
        self.recompute_playback();
        true
    }

    /// Stop every tone, then restart one tone per active note at equal gain.
    pub fn recompute_playback(&mut self) {
        for note in self.registry.iter_mut() {
            self.view.set_highlighted(note.pitch_class, note.is_active);
            if let Some(tone) = note.live_tone.take() {
                self.output.stop_tone(tone);
            }
        }

        let active = self.registry.active_notes().count();
        if active == 0 {
            log::trace!("No active notes");
            return;
        }

        let gain = 1.0 / active as f32;
        for note in self.registry.iter_mut().filter(|n| n.is_active) {
            note.live_tone = Some(self.output.start_tone(note.frequency_hz, gain));
        }
        log::trace!("Playing {} notes at gain {:.3}", active, gain);
    }

    pub fn registry(&self) -> &NoteRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
