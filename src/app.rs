use eframe::egui;
use crate::core::audio::{self, AudioOutput};
use crate::core::{HighlightView, NoteRegistry, Piano, ToneOutput};
use crate::messaging::ToneBus;
use crate::settings::AppSettings;
use crate::ui::KeyboardView;

// Main app state
pub struct PianoApp {
    piano: Piano<ToneBus, KeyboardView>,
    audio: Option<AudioOutput>,
}

impl eframe::App for PianoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_key_events(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Keyboard Piano");
                ui.label("🎹");
            });

            ui.add_space(8.0);
            self.piano.view().show(ui, self.piano.registry());
            ui.add_space(8.0);
            ui.separator();

            let playing: Vec<&str> = self
                .piano
                .registry()
                .active_notes()
                .map(|n| n.pitch_class.name())
                .collect();

            if playing.is_empty() {
                ui.label("Press Z S X D C V G B H N J M to play");
            } else {
                ui.label(format!("Playing: {}", playing.join(" ")));
            }

            match &self.audio {
                Some(output) => ui.small(format!(
                    "Output: {} @ {} Hz",
                    output.device_name, output.sample_rate
                )),
                None => ui.small("No audio output, keys will only light up"),
            };
        });
    }
}

impl PianoApp {
    pub fn new(settings: AppSettings) -> Self {
        let (bus, receiver) = ToneBus::new();

        let audio = match audio::start_output(&settings, receiver) {
            Ok(output) => Some(output),
            Err(e) => {
                log::error!("Failed to start audio output: {:#}", e);
                None
            }
        };

        let view = KeyboardView::new(settings.show_key_labels);
        let mut piano = Piano::new(NoteRegistry::new(), bus, view);
        piano.recompute_playback();

        log::info!("PianoApp created");
        PianoApp { piano, audio }
    }

    fn process_key_events(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        dispatch_key_events(&events, &mut self.piano);
    }
}

/// Feed egui key events to the piano, preferring the physical key
pub fn dispatch_key_events<O: ToneOutput, V: HighlightView>(
    events: &[egui::Event],
    piano: &mut Piano<O, V>,
) {
    for event in events {
        if let egui::Event::Key {
            key,
            physical_key,
            pressed,
            repeat,
            ..
        } = event
        {
            let code = key_code(physical_key.unwrap_or(*key));
            if *pressed {
                piano.on_key_down(&code, *repeat);
            } else {
                piano.on_key_up(&code);
            }
        }
    }
}

/// Translate an egui key to a physical key code ("KeyZ", "Space", ...)
pub fn key_code(key: egui::Key) -> String {
    let name = key.name();
    if name.len() == 1 && name.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("Key{}", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PitchClass;

    #[test]
    fn letters_map_to_key_codes() {
        assert_eq!(key_code(egui::Key::Z), "KeyZ");
        assert_eq!(key_code(egui::Key::M), "KeyM");
    }

    #[test]
    fn other_keys_keep_their_names() {
        assert_eq!(key_code(egui::Key::Space), "Space");
        assert_eq!(key_code(egui::Key::Num1), "1");
    }

    #[test]
    fn every_bound_key_is_reachable() {
        let registry = NoteRegistry::new();
        let letters = [
            egui::Key::Z,
            egui::Key::S,
            egui::Key::X,
            egui::Key::D,
            egui::Key::C,
            egui::Key::V,
            egui::Key::G,
            egui::Key::B,
            egui::Key::H,
            egui::Key::N,
            egui::Key::J,
            egui::Key::M,
        ];

        for (note, key) in registry.iter().zip(letters) {
            assert_eq!(registry.lookup(&key_code(key)).map(|n| n.pitch_class), Some(note.pitch_class));
        }
        assert!(registry.lookup(&key_code(egui::Key::Space)).is_none());
    }

    fn key_event(key: egui::Key, physical_key: Option<egui::Key>, pressed: bool, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key,
            pressed,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn piano() -> Piano<ToneBus, KeyboardView> {
        let (bus, _receiver) = ToneBus::new();
        Piano::new(NoteRegistry::new(), bus, KeyboardView::new(true))
    }

    fn held(piano: &Piano<ToneBus, KeyboardView>) -> Vec<PitchClass> {
        piano.registry().active_notes().map(|n| n.pitch_class).collect()
    }

    #[test]
    fn physical_key_wins_over_logical_key() {
        let mut piano = piano();
        // Layout where the Z position types an A
        dispatch_key_events(&[key_event(egui::Key::A, Some(egui::Key::Z), true, false)], &mut piano);

        assert_eq!(held(&piano), vec![PitchClass::C]);
        assert!(piano.view().is_highlighted(PitchClass::C));
    }

    #[test]
    fn logical_key_used_without_physical_key() {
        let mut piano = piano();
        dispatch_key_events(&[key_event(egui::Key::N, None, true, false)], &mut piano);
        assert_eq!(held(&piano), vec![PitchClass::A]);
    }

    #[test]
    fn repeat_events_are_ignored() {
        let mut piano = piano();
        dispatch_key_events(&[key_event(egui::Key::Z, Some(egui::Key::Z), true, true)], &mut piano);

        assert!(held(&piano).is_empty());
        assert!(!piano.view().is_highlighted(PitchClass::C));
    }

    #[test]
    fn release_event_clears_the_note() {
        let mut piano = piano();
        let events = [
            key_event(egui::Key::Z, Some(egui::Key::Z), true, false),
            key_event(egui::Key::C, Some(egui::Key::C), true, false),
            key_event(egui::Key::Z, Some(egui::Key::Z), false, false),
        ];
        dispatch_key_events(&events, &mut piano);

        assert_eq!(held(&piano), vec![PitchClass::E]);
        assert!(!piano.view().is_highlighted(PitchClass::C));
        assert!(piano.view().is_highlighted(PitchClass::E));
    }

    #[test]
    fn non_key_events_and_unbound_keys_are_ignored() {
        let mut piano = piano();
        let events = [
            egui::Event::Text("z".to_string()),
            key_event(egui::Key::Space, Some(egui::Key::Space), true, false),
        ];
        dispatch_key_events(&events, &mut piano);
        assert!(held(&piano).is_empty());
    }
}
