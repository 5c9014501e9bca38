use crate::core::ToneId;

/// Commands sent from the UI thread to the audio callback
#[derive(Debug, Clone, PartialEq)]
pub enum ToneMessage {
    Start {
        id: ToneId,
        frequency_hz: f32,
        gain: f32,
    },
    Stop(ToneId),
}
