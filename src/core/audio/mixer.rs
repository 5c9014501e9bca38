use std::f32::consts::PI;
use crossbeam_channel::Receiver;
use crate::core::ToneId;
use crate::messaging::ToneMessage;

/// A single sine oscillator
#[derive(Debug, Clone)]
struct Tone {
    id: ToneId,
    phase: f32,
    phase_increment: f32,
    gain: f32,
}

impl Tone {
    fn next_sample(&mut self) -> f32 {
        let value = (2.0 * PI * self.phase).sin() * self.gain;
        self.phase = (self.phase + self.phase_increment) % 1.0;
        value
    }
}

/// Sums the live tones on the audio thread
pub struct ToneMixer {
    sample_rate: f32,
    volume: f32,
    tones: Vec<Tone>,
    receiver: Receiver<ToneMessage>,
}

impl ToneMixer {
    pub fn new(sample_rate: f32, volume: f32, receiver: Receiver<ToneMessage>) -> Self {
        ToneMixer {
            sample_rate,
            volume: volume.clamp(0.0, 1.0),
            tones: Vec::new(),
            receiver,
        }
    }

    /// Apply every pending tone command
    pub fn process_messages(&mut self) {
        while let Ok(msg) = self.receiver.try_recv() {
            self.handle_message(msg);
        }
    }

    fn handle_message(&mut self, msg: ToneMessage) {
        match msg {
            ToneMessage::Start {
                id,
                frequency_hz,
                gain,
            } => {
                self.tones.push(Tone {
                    id,
                    phase: 0.0,
                    phase_increment: frequency_hz / self.sample_rate,
                    gain,
                });
            }
            ToneMessage::Stop(id) => {
                self.tones.retain(|t| t.id != id);
            }
        }
    }

    /// Generate one mono sample
    pub fn next_sample(&mut self) -> f32 {
        let sum: f32 = self.tones.iter_mut().map(Tone::next_sample).sum();
        sum * self.volume
    }

    /// Fill an interleaved buffer, writing the same value to every channel
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        self.process_messages();

        for frame in data.chunks_mut(channels.max(1)) {
            let value = self.next_sample();
            for sample in frame.iter_mut() {
                *sample = value;
            }
        }
    }

    #[cfg(test)]
    pub fn tone_count(&self) -> usize {
        self.tones.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn start(id: u64, frequency_hz: f32, gain: f32) -> ToneMessage {
        ToneMessage::Start {
            id: ToneId(id),
            frequency_hz,
            gain,
        }
    }

    #[test]
    fn silent_without_tones() {
        let (_sender, receiver) = unbounded();
        let mut mixer = ToneMixer::new(48000.0, 1.0, receiver);
        let mut buffer = [1.0f32; 64];
        mixer.render(&mut buffer, 2);
        assert!(buffer.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn start_and_stop_messages() {
        let (sender, receiver) = unbounded();
        let mut mixer = ToneMixer::new(48000.0, 1.0, receiver);

        sender.send(start(1, 440.0, 0.5)).ok();
        sender.send(start(2, 330.0, 0.5)).ok();
        mixer.process_messages();
        assert_eq!(mixer.tone_count(), 2);

        sender.send(ToneMessage::Stop(ToneId(1))).ok();
        sender.send(ToneMessage::Stop(ToneId(99))).ok();
        mixer.process_messages();
        assert_eq!(mixer.tone_count(), 1);
    }

    #[test]
    fn sine_follows_frequency_and_gain() {
        let (sender, receiver) = unbounded();
        // Quarter period per sample
        let mut mixer = ToneMixer::new(4.0, 1.0, receiver);
        sender.send(start(0, 1.0, 0.5)).ok();
        mixer.process_messages();

        let samples: Vec<f32> = (0..4).map(|_| mixer.next_sample()).collect();
        let expected = [0.0, 0.5, 0.0, -0.5];
        for (got, want) in samples.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "{} != {}", got, want);
        }
    }

    #[test]
    fn equal_gains_never_clip() {
        let (sender, receiver) = unbounded();
        let mut mixer = ToneMixer::new(44100.0, 1.0, receiver);
        let freqs = [261.626, 329.628, 391.995];
        for (i, f) in freqs.iter().enumerate() {
            sender.send(start(i as u64, *f, 1.0 / freqs.len() as f32)).ok();
        }

        let mut buffer = vec![0.0f32; 4096];
        mixer.render(&mut buffer, 1);
        assert!(buffer.iter().all(|s| s.abs() <= 1.0 + 1e-5));
        assert!(buffer.iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn render_duplicates_frame_across_channels() {
        let (sender, receiver) = unbounded();
        let mut mixer = ToneMixer::new(8000.0, 0.5, receiver);
        sender.send(start(0, 440.0, 1.0)).ok();

        let mut buffer = vec![0.0f32; 32];
        mixer.render(&mut buffer, 2);
        for frame in buffer.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(buffer.iter().all(|s| s.abs() <= 0.5 + 1e-5));
    }
}
