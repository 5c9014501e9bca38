use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, StrokeKind, Ui, Vec2};
use crate::core::{HighlightView, NoteRegistry, PitchClass};

const WHITE_KEY_WIDTH: f32 = 64.0;
const WHITE_KEY_HEIGHT: f32 = 220.0;
const BLACK_KEY_WIDTH: f32 = 38.0;
const BLACK_KEY_HEIGHT: f32 = 135.0;
const WHITE_KEYS: usize = 7;

const HIGHLIGHT: Color32 = Color32::from_rgb(0, 188, 212);
const HIGHLIGHT_DARK: Color32 = Color32::from_rgb(0, 131, 148);

/// On-screen keyboard for one octave
pub struct KeyboardView {
    highlighted: [bool; 12],
    show_labels: bool,
}

impl KeyboardView {
    pub fn new(show_labels: bool) -> Self {
        Self {
            highlighted: [false; 12],
            show_labels,
        }
    }

    pub fn is_highlighted(&self, pitch_class: PitchClass) -> bool {
        self.highlighted[pitch_class.index()]
    }

    pub fn show(&self, ui: &mut Ui, registry: &NoteRegistry) -> Response {
        let desired_size = Vec2::new(WHITE_KEY_WIDTH * WHITE_KEYS as f32, WHITE_KEY_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::hover());

        if !ui.is_rect_visible(rect) {
            return response;
        }

        // White keys first so black keys are drawn over them
        let (black, white): (Vec<PitchClass>, Vec<PitchClass>) =
            PitchClass::ALL.iter().copied().partition(|p| p.is_black());

        for pitch in white.into_iter().chain(black) {
            let Some(note) = registry.get(pitch) else {
                continue;
            };
            let key_rect = key_rect(rect.min, pitch);
            let lit = self.is_highlighted(pitch);

            let (fill, text_color) = match (pitch.is_black(), lit) {
                (false, false) => (Color32::from_gray(240), Color32::from_gray(40)),
                (false, true) => (HIGHLIGHT, Color32::WHITE),
                (true, false) => (Color32::from_gray(30), Color32::from_gray(200)),
                (true, true) => (HIGHLIGHT_DARK, Color32::WHITE),
            };

            let painter = ui.painter();
            painter.rect_filled(key_rect, 3.0, fill);
            painter.rect_stroke(
                key_rect,
                3.0,
                Stroke::new(1.0, Color32::from_gray(100)),
                StrokeKind::Inside,
            );

            let bottom = key_rect.center_bottom() - Vec2::new(0.0, 8.0);
            painter.text(
                bottom,
                Align2::CENTER_BOTTOM,
                pitch.name(),
                FontId::proportional(15.0),
                text_color,
            );
            if self.show_labels {
                painter.text(
                    bottom - Vec2::new(0.0, 20.0),
                    Align2::CENTER_BOTTOM,
                    note.key_label(),
                    FontId::monospace(12.0),
                    text_color,
                );
            }
        }

        response
    }
}

impl HighlightView for KeyboardView {
    fn set_highlighted(&mut self, pitch_class: PitchClass, highlighted: bool) {
        self.highlighted[pitch_class.index()] = highlighted;
    }
}

/// Horizontal position in white-key widths. Black keys sit on the
/// boundary to the left of the slot.
fn key_slot(pitch_class: PitchClass) -> usize {
    match pitch_class {
        PitchClass::C => 0,
        PitchClass::Db | PitchClass::D => 1,
        PitchClass::Eb | PitchClass::E => 2,
        PitchClass::F => 3,
        PitchClass::Gb | PitchClass::G => 4,
        PitchClass::Ab | PitchClass::A => 5,
        PitchClass::Bb | PitchClass::B => 6,
    }
}

fn key_rect(origin: Pos2, pitch_class: PitchClass) -> Rect {
    let x = origin.x + key_slot(pitch_class) as f32 * WHITE_KEY_WIDTH;

    if pitch_class.is_black() {
        Rect::from_min_size(
            Pos2::new(x - BLACK_KEY_WIDTH / 2.0, origin.y),
            Vec2::new(BLACK_KEY_WIDTH, BLACK_KEY_HEIGHT),
        )
    } else {
        Rect::from_min_size(
            Pos2::new(x, origin.y),
            Vec2::new(WHITE_KEY_WIDTH, WHITE_KEY_HEIGHT),
        )
    }
}
