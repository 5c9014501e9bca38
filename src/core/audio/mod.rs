//! cpal output stream driving the tone mixer

mod mixer;

pub use mixer::ToneMixer;

use anyhow::{anyhow, bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, Stream};
use crossbeam_channel::Receiver;
use crate::messaging::ToneMessage;
use crate::settings::AppSettings;

/// A running output stream. Dropping it stops playback.
pub struct AudioOutput {
    _stream: Stream,
    pub device_name: String,
    pub sample_rate: f32,
}

/// Open the configured (or default) output device and start streaming
pub fn start_output(settings: &AppSettings, receiver: Receiver<ToneMessage>) -> Result<AudioOutput> {
    let host = cpal::default_host();
    log::info!("Using audio host: {}", host.id().name());

    let device = select_output_device(&host, settings.output_device.as_deref())?;
    let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
    log::info!("Using output device: {}", device_name);

    let config = device
        .default_output_config()
        .context("No default output config")?;
    log::debug!("Device config: {:?}", config);

    let sample_format = config.sample_format();
    let config = cpal::StreamConfig::from(config);
    let sample_rate = config.sample_rate.0 as f32;

    let mixer = ToneMixer::new(sample_rate, settings.master_volume, receiver);

    let stream = match sample_format {
        SampleFormat::F32 => create_stream::<f32>(&device, &config, mixer),
        SampleFormat::I16 => create_stream::<i16>(&device, &config, mixer),
        SampleFormat::U16 => create_stream::<u16>(&device, &config, mixer),
        other => bail!("Unsupported sample format {:?}", other),
    }?;

    stream.play()?;
    log::info!("Audio stream started at {} Hz", sample_rate);

    Ok(AudioOutput {
        _stream: stream,
        device_name,
        sample_rate,
    })
}

fn select_output_device(host: &cpal::Host, wanted: Option<&str>) -> Result<cpal::Device> {
    if let Some(query) = wanted {
        let query = query.to_lowercase();
        let found = host.output_devices()?.find(|d| {
            d.name()
                .map(|n| n.to_lowercase().contains(&query))
                .unwrap_or(false)
        });

        match found {
            Some(device) => return Ok(device),
            None => log::warn!("No output device matching '{}', using default", query),
        }
    }

    host.default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))
}

fn create_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut mixer: ToneMixer,
) -> Result<Stream>
where
    T: Sample + Send + 'static + cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;
    let err_fn = |err| log::error!("An error occurred on the audio stream: {}", err);
    let mut scratch: Vec<f32> = Vec::new();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            scratch.resize(data.len(), 0.0);
            mixer.render(&mut scratch, channels);

            for (out, value) in data.iter_mut().zip(scratch.iter()) {
                *out = T::from_sample(*value);
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
