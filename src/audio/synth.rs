//! Warm tone synthesis
//!
//! The unit of sound generation: two oscillators detuned a few cents
//! apart (a chorus shimmer, like the pitch instability of an acoustic
//! instrument), a resonant low-pass to round off harsh overtones, and an
//! attack/hold/release envelope. Notes render offline into buffers that
//! the mixer plays back at scheduled frame offsets.

use std::f32::consts::TAU;

/// Detune applied to each oscillator of the pair, in cents
const DETUNE_CENTS: f32 = 6.0;
/// Low-pass resonance
const FILTER_Q: f32 = 0.7;
/// Low-pass cutoff ceiling in Hz
const CUTOFF_CEILING_HZ: f32 = 4000.0;
/// Exponential release target; never exactly zero
const RELEASE_FLOOR: f32 = 1.0e-4;
/// Extra rendered tail so the release is never truncated (seconds)
pub const STOP_MARGIN_SECS: f32 = 0.1;

/// Oscillator wave shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Square,
    Saw,
}

impl Waveform {
    /// Sample the wave at a phase in cycles (0.0..1.0)
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * phase - 1.0,
        }
    }
}

/// A single note to render
#[derive(Debug, Clone, Copy)]
pub struct ToneSpec {
    pub frequency: f32,
    pub duration: f32,
    pub volume: f32,
    pub waveform: Waveform,
    pub reverb: bool,
}

impl ToneSpec {
    pub fn new(frequency: f32, duration: f32, volume: f32) -> Self {
        Self {
            frequency,
            duration,
            volume,
            waveform: Waveform::Sine,
            reverb: false,
        }
    }

    pub fn with_reverb(mut self) -> Self {
        self.reverb = true;
        self
    }
}

/// Envelope gain at time `t` into a note: linear attack to the peak,
/// hold, then an exponential release toward (never reaching) silence
pub fn envelope_gain(t: f32, duration: f32, volume: f32) -> f32 {
    if t < 0.0 || t >= duration || volume <= 0.0 {
        return 0.0;
    }
    let attack = (0.15 * duration).min(0.08);
    let release = (0.6 * duration).min(1.5);
    let release_start = duration - release;

    if t < attack {
        volume * t / attack
    } else if t < release_start {
        volume
    } else {
        let ratio = (RELEASE_FLOOR / volume).min(1.0);
        volume * ratio.powf((t - release_start) / release)
    }
}

/// Two-pole resonant low-pass (RBJ cookbook coefficients)
struct LowPass {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl LowPass {
    fn new(cutoff: f32, q: f32, sample_rate: f32) -> Self {
        let omega = TAU * (cutoff / sample_rate).min(0.499);
        let (sin, cos) = omega.sin_cos();
        let alpha = sin / (2.0 * q);
        let a0 = 1.0 + alpha;
        Self {
            b0: (1.0 - cos) / 2.0 / a0,
            b1: (1.0 - cos) / a0,
            b2: (1.0 - cos) / 2.0 / a0,
            a1: -2.0 * cos / a0,
            a2: (1.0 - alpha) / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Render a note into a mono buffer covering `duration + STOP_MARGIN_SECS`
pub fn render_tone(spec: &ToneSpec, sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f32;
    let frames = ((spec.duration + STOP_MARGIN_SECS) * rate) as usize;

    let detune = 2.0f32.powf(DETUNE_CENTS / 1200.0);
    let step_low = spec.frequency / detune / rate;
    let step_high = spec.frequency * detune / rate;

    let cutoff = (spec.frequency * 3.0).min(CUTOFF_CEILING_HZ);
    let mut filter = LowPass::new(cutoff, FILTER_Q, rate);

    let mut phase_low = 0.0f32;
    let mut phase_high = 0.0f32;
    let mut out = Vec::with_capacity(frames);
    for i in 0..frames {
        let t = i as f32 / rate;
        let raw = spec.waveform.sample(phase_low) + spec.waveform.sample(phase_high);
        phase_low = (phase_low + step_low).fract();
        phase_high = (phase_high + step_high).fract();
        out.push(filter.process(raw) * envelope_gain(t, spec.duration, spec.volume));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 44_100;

    #[test]
    fn test_envelope_shape() {
        let duration = 1.0;
        let volume = 0.05;
        // Attack is min(0.08, 0.15 * duration) = 0.08
        assert_eq!(envelope_gain(0.0, duration, volume), 0.0);
        assert!((envelope_gain(0.04, duration, volume) - volume / 2.0).abs() < 1.0e-6);
        assert!((envelope_gain(0.08, duration, volume) - volume).abs() < 1.0e-6);

        // Held at the peak until the release starts (1.0 - 0.6 = 0.4)
        assert!((envelope_gain(0.39, duration, volume) - volume).abs() < 1.0e-6);

        // Release decays monotonically and never reaches a true zero
        let mid = envelope_gain(0.7, duration, volume);
        let late = envelope_gain(0.99, duration, volume);
        assert!(mid < volume && late < mid && late > 0.0);

        // Past the end the note is silent
        assert_eq!(envelope_gain(1.0, duration, volume), 0.0);
    }

    #[test]
    fn test_envelope_never_exceeds_peak() {
        for spec in [
            ToneSpec::new(261.63, 0.5, 0.035),
            ToneSpec::new(1046.5, 3.0, 0.025),
        ] {
            let mut t = 0.0;
            while t < spec.duration {
                assert!(envelope_gain(t, spec.duration, spec.volume) <= spec.volume + 1.0e-6);
                t += 0.01;
            }
        }
    }

    #[test]
    fn test_render_length_includes_stop_margin() {
        let spec = ToneSpec::new(659.25, 0.35, 0.06);
        let samples = render_tone(&spec, RATE);
        let expected = ((0.35 + STOP_MARGIN_SECS) * RATE as f32) as usize;
        assert_eq!(samples.len(), expected);
    }

    #[test]
    fn test_render_is_bounded_and_audible() {
        let spec = ToneSpec::new(440.0, 0.5, 0.04);
        let samples = render_tone(&spec, RATE);

        // Two unit oscillators summed, scaled by the envelope peak; leave
        // headroom for filter ringing
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.01, "tone should be audible, peak {}", peak);
        assert!(peak <= 2.5 * spec.volume, "tone too hot, peak {}", peak);

        // The tail dies out with the release
        let tail = &samples[samples.len() - 100..];
        assert!(tail.iter().all(|s| s.abs() < 0.01));
    }

    #[test]
    fn test_waveform_samples() {
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 1.0e-6);
        assert_eq!(Waveform::Square.sample(0.25), 1.0);
        assert_eq!(Waveform::Square.sample(0.75), -1.0);
        assert_eq!(Waveform::Saw.sample(0.5), 0.0);
        assert_eq!(Waveform::Triangle.sample(0.0), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.5), -1.0);
    }
}
