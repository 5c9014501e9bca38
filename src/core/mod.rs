pub mod audio;
pub mod note;
pub mod piano;
pub mod registry;

pub use note::{PitchClass, ToneId};
pub use piano::{HighlightView, Piano, ToneOutput};
pub use registry::NoteRegistry;
