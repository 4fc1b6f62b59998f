//! Sound effect engine
//!
//! Owns the cpal output stream and a software voice mixer. The stream is
//! opened lazily on the first user gesture (platform output devices are
//! not reliably available before one), then kept for the life of the
//! process. Effects schedule pre-rendered note buffers at absolute frame
//! offsets against the mixer clock; once scheduled they play out
//! deterministically, with no tracking and no cancellation.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use parking_lot::Mutex;

use super::reverb::{Convolver, ReverbImpulse};
use super::synth::{render_tone, ToneSpec};

/// Reverb impulse duration in seconds
const REVERB_DURATION_SECS: f32 = 2.0;
/// Reverb impulse decay exponent
const REVERB_DECAY: f32 = 2.5;
/// Dry path level when a note routes through reverb
const DRY_LEVEL: f32 = 0.7;
/// Wet path level when a note routes through reverb
const WET_LEVEL: f32 = 0.3;

/// Error type for opening the output stream
#[derive(Debug)]
pub enum AudioError {
    NoDevice,
    Config(cpal::DefaultStreamConfigError),
    UnsupportedFormat(cpal::SampleFormat),
    Build(cpal::BuildStreamError),
    Play(cpal::PlayStreamError),
}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(e: cpal::DefaultStreamConfigError) -> Self {
        AudioError::Config(e)
    }
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(e: cpal::BuildStreamError) -> Self {
        AudioError::Build(e)
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(e: cpal::PlayStreamError) -> Self {
        AudioError::Play(e)
    }
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoDevice => write!(f, "no output device"),
            AudioError::Config(e) => write!(f, "no output config: {}", e),
            AudioError::UnsupportedFormat(format) => {
                write!(f, "unsupported sample format: {:?}", format)
            }
            AudioError::Build(e) => write!(f, "stream build failed: {}", e),
            AudioError::Play(e) => write!(f, "stream start failed: {}", e),
        }
    }
}

/// A scheduled stereo buffer, audible from `start_frame` on the mixer clock
struct Voice {
    start_frame: u64,
    left: Vec<f32>,
    right: Vec<f32>,
}

/// State shared with the output callback
struct SharedOutput {
    voices: Mutex<Vec<Voice>>,
    /// Frames rendered since the stream started
    clock: AtomicU64,
    /// Master gain as f32 bits, applied in the callback
    master_gain: AtomicU32,
}

impl SharedOutput {
    fn new() -> Self {
        Self {
            voices: Mutex::new(Vec::new()),
            clock: AtomicU64::new(0),
            master_gain: AtomicU32::new(1.0f32.to_bits()),
        }
    }
}

/// Sum active voices into an interleaved output buffer, advance the
/// clock, and retire voices that have fully played out
fn mix_into<T>(shared: &SharedOutput, data: &mut [T], channels: usize)
where
    T: cpal::Sample + cpal::FromSample<f32>,
{
    let gain = f32::from_bits(shared.master_gain.load(Ordering::Relaxed));
    let start = shared.clock.load(Ordering::Relaxed);
    let frames = data.len() / channels;
    let mut voices = shared.voices.lock();

    for frame in 0..frames {
        let clock = start + frame as u64;
        let mut left = 0.0f32;
        let mut right = 0.0f32;
        for voice in voices.iter() {
            if clock < voice.start_frame {
                continue;
            }
            let i = (clock - voice.start_frame) as usize;
            if i < voice.left.len() {
                left += voice.left[i];
                right += voice.right[i];
            }
        }

        let base = frame * channels;
        for (channel, slot) in data[base..base + channels].iter_mut().enumerate() {
            let sample = if channel == 0 { left } else { right };
            *slot = T::from_sample(sample * gain);
        }
    }

    let end = start + frames as u64;
    voices.retain(|v| end < v.start_frame + v.left.len() as u64);
    shared.clock.store(end, Ordering::Relaxed);
}

struct Output {
    _stream: cpal::Stream,
    shared: Arc<SharedOutput>,
    sample_rate: u32,
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    shared: Arc<SharedOutput>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            mix_into(&shared, data, channels);
        },
        |e| log::warn!("audio stream error: {}", e),
        None,
    )
}

fn open_output() -> Result<Output, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(AudioError::NoDevice)?;
    let config = device.default_output_config()?;
    let sample_rate = config.sample_rate().0;
    let sample_format = config.sample_format();
    let stream_config: cpal::StreamConfig = config.into();

    let shared = Arc::new(SharedOutput::new());
    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, shared.clone()),
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, shared.clone()),
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, shared.clone()),
        other => return Err(AudioError::UnsupportedFormat(other)),
    }?;

    // Streams can start paused; this is the platform's resume analogue
    stream.play()?;

    Ok(Output {
        _stream: stream,
        shared,
        sample_rate,
    })
}

/// The audio engine. One instance, owned by the application shell.
///
/// Muting is independent of initialization: the flag can be flipped
/// before an output exists and simply gates the effect triggers. A
/// failed initialization is latched and never retried; the engine then
/// behaves as permanently muted for the session.
pub struct SoundEngine {
    output: Option<Output>,
    convolver: Option<Convolver>,
    muted: bool,
    failed: bool,
}

impl SoundEngine {
    pub fn new() -> Self {
        Self {
            output: None,
            convolver: None,
            muted: false,
            failed: false,
        }
    }

    /// Open the output stream and build the reverb impulse, once.
    /// Call from a user gesture. Safe to call repeatedly; failures are
    /// logged and swallowed, leaving every later trigger a no-op.
    pub fn ensure_initialized(&mut self) {
        if self.output.is_some() || self.failed {
            return;
        }
        match open_output() {
            Ok(output) => {
                let impulse =
                    ReverbImpulse::build(REVERB_DURATION_SECS, REVERB_DECAY, output.sample_rate);
                self.convolver = Some(Convolver::new(&impulse));
                log::info!("audio output ready at {} Hz", output.sample_rate);
                self.output = Some(output);
            }
            Err(e) => {
                log::warn!("audio unavailable: {} (continuing without sound)", e);
                self.failed = true;
            }
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip the mute flag, returning the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Gentle music-box chime: two quick notes a major third apart
    pub fn play_card_flip(&mut self) {
        self.schedule_notes(&[
            (0.00, ToneSpec::new(659.25, 0.35, 0.06)),
            (0.06, ToneSpec::new(783.99, 0.30, 0.04)),
        ]);
    }

    /// Soft ascending shimmer, like turning a page: four harp-like
    /// notes walking up a Cmaj7 voicing
    pub fn play_transition(&mut self) {
        let chord = [261.63, 329.63, 392.00, 493.88];
        let notes: Vec<(f32, ToneSpec)> = chord
            .iter()
            .enumerate()
            .map(|(i, &freq)| {
                let step = i as f32;
                (
                    step * 0.07,
                    ToneSpec::new(freq, 0.5 - 0.05 * step, 0.035 - 0.005 * step).with_reverb(),
                )
            })
            .collect();
        self.schedule_notes(&notes);
    }

    /// Rising Cmaj7 then Fmaj7 arpeggios with a high shimmer on top,
    /// like bells at a wedding
    pub fn play_success(&mut self) {
        let mut notes = Vec::new();
        for (i, &freq) in [261.63, 329.63, 392.00, 493.88].iter().enumerate() {
            notes.push((i as f32 * 0.12, ToneSpec::new(freq, 2.0, 0.045).with_reverb()));
        }
        for (i, &freq) in [349.23, 440.00, 523.25, 659.25].iter().enumerate() {
            notes.push((0.6 + i as f32 * 0.12, ToneSpec::new(freq, 2.5, 0.04).with_reverb()));
        }
        for (i, &freq) in [783.99, 1046.50].iter().enumerate() {
            notes.push((1.3 + i as f32 * 0.15, ToneSpec::new(freq, 3.0, 0.025).with_reverb()));
        }
        self.schedule_notes(&notes);
    }

    /// Render each note and hand it to the mixer. No-op while muted or
    /// before the output exists; a failed note is logged and skipped
    /// without touching the others.
    fn schedule_notes(&mut self, notes: &[(f32, ToneSpec)]) {
        if self.muted {
            return;
        }
        let Some(output) = self.output.as_ref() else {
            return;
        };
        let rate = output.sample_rate;
        let shared = Arc::clone(&output.shared);
        let now = shared.clock.load(Ordering::Relaxed);

        for (offset, spec) in notes {
            let dry = render_tone(spec, rate);
            let (left, right) = if spec.reverb {
                match self.convolver.as_mut().map(|c| c.process(&dry)) {
                    Some(Ok([wet_left, wet_right])) => {
                        let len = wet_left.len().max(dry.len());
                        let mut left = Vec::with_capacity(len);
                        let mut right = Vec::with_capacity(len);
                        for i in 0..len {
                            let d = dry.get(i).copied().unwrap_or(0.0) * DRY_LEVEL;
                            left.push(d + wet_left[i] * WET_LEVEL);
                            right.push(d + wet_right[i] * WET_LEVEL);
                        }
                        (left, right)
                    }
                    Some(Err(e)) => {
                        log::warn!("reverb failed for {:.0} Hz note: {}", spec.frequency, e);
                        (dry.clone(), dry)
                    }
                    None => (dry.clone(), dry),
                }
            } else {
                (dry.clone(), dry)
            };

            let start_frame = now + (offset * rate as f32) as u64;
            shared.voices.lock().push(Voice {
                start_frame,
                left,
                right,
            });
        }
    }
}

impl Default for SoundEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_round_trip() {
        let mut engine = SoundEngine::new();
        assert!(!engine.muted());
        assert!(engine.toggle_mute());
        assert!(!engine.toggle_mute());
        assert!(!engine.muted());

        // Muting is allowed before any output exists
        engine.set_muted(true);
        assert!(engine.muted());
        assert!(engine.output.is_none());
    }

    #[test]
    fn test_triggers_are_noops_before_init() {
        let mut engine = SoundEngine::new();
        engine.play_card_flip();
        engine.play_transition();
        engine.play_success();
        assert!(engine.output.is_none());
    }

    #[test]
    fn test_mixer_sums_voices_at_offsets() {
        let shared = SharedOutput::new();
        shared.voices.lock().push(Voice {
            start_frame: 0,
            left: vec![0.25; 4],
            right: vec![0.5; 4],
        });
        shared.voices.lock().push(Voice {
            start_frame: 2,
            left: vec![0.25; 4],
            right: vec![0.25; 4],
        });

        let mut data = [0.0f32; 8];
        mix_into(&shared, &mut data, 2);

        assert_eq!(&data[0..2], &[0.25, 0.5]);
        assert_eq!(&data[2..4], &[0.25, 0.5]);
        // Second voice joins at frame 2
        assert_eq!(&data[4..6], &[0.5, 0.75]);
        assert_eq!(&data[6..8], &[0.5, 0.75]);

        assert_eq!(shared.clock.load(Ordering::Relaxed), 4);
        // First voice has fully played; the second is still live
        assert_eq!(shared.voices.lock().len(), 1);
    }

    #[test]
    fn test_mixer_applies_master_gain() {
        let shared = SharedOutput::new();
        shared.master_gain.store(0.5f32.to_bits(), Ordering::Relaxed);
        shared.voices.lock().push(Voice {
            start_frame: 0,
            left: vec![1.0; 2],
            right: vec![1.0; 2],
        });

        let mut data = [0.0f32; 4];
        mix_into(&shared, &mut data, 2);
        assert_eq!(data, [0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_mixer_clock_only_moves_forward() {
        let shared = SharedOutput::new();
        let mut data = [0.0f32; 8];
        mix_into(&shared, &mut data, 2);
        mix_into(&shared, &mut data, 2);
        assert_eq!(shared.clock.load(Ordering::Relaxed), 8);
    }

    #[test]
    fn test_future_voice_not_retired() {
        let shared = SharedOutput::new();
        shared.voices.lock().push(Voice {
            start_frame: 1_000,
            left: vec![1.0; 4],
            right: vec![1.0; 4],
        });

        let mut data = [0.0f32; 8];
        mix_into(&shared, &mut data, 2);
        assert_eq!(data, [0.0f32; 8]);
        assert_eq!(shared.voices.lock().len(), 1);
    }
}
