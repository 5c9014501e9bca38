use crossbeam_channel::{unbounded, Receiver, Sender};
use crate::core::{ToneId, ToneOutput};
use super::ToneMessage;

/// ToneBus forwards tone commands from the piano to the audio engine
pub struct ToneBus {
    sender: Sender<ToneMessage>,
    next_id: u64,
}

impl ToneBus {
    /// Create a bus together with the receiver the audio callback drains
    pub fn new() -> (Self, Receiver<ToneMessage>) {
        let (sender, receiver) = unbounded();

        let bus = ToneBus {
            sender,
            next_id: 0,
        };
        (bus, receiver)
    }

    fn send(&self, msg: ToneMessage) {
        // Without a running stream the command is simply dropped
        if self.sender.send(msg).is_err() {
            log::trace!("Tone message dropped, no audio receiver");
        }
    }
}

impl ToneOutput for ToneBus {
    fn start_tone(&mut self, frequency_hz: f32, gain: f32) -> ToneId {
        let id = ToneId(self.next_id);
        self.next_id += 1;

        self.send(ToneMessage::Start {
            id,
            frequency_hz,
            gain,
        });
        id
    }

    fn stop_tone(&mut self, tone: ToneId) {
        self.send(ToneMessage::Stop(tone));
    }
}
