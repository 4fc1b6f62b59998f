//! Synthetic reverb
//!
//! A cheap approximation of a room impulse response: exponentially
//! decaying white noise, built once per session and convolved with each
//! note that asks for reverb. Convolution runs offline per note via FFT,
//! so the output callback never touches it.

use std::collections::HashMap;

use rand::Rng;
use realfft::num_complex::Complex32;
use realfft::{FftError, RealFftPlanner};

/// Envelope factor at a relative position (0.0 start, 1.0 end) of the tail
pub fn decay_envelope(position: f32, decay: f32) -> f32 {
    (1.0 - position).max(0.0).powf(decay)
}

/// Stereo impulse response used as a convolution kernel.
/// Immutable once built and shared by every effect that requests reverb.
pub struct ReverbImpulse {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl ReverbImpulse {
    /// Build the impulse: each sample is an independent uniform random
    /// value in [-1, 1] scaled by `(1 - i/len)^decay`
    pub fn build(duration_secs: f32, decay: f32, sample_rate: u32) -> Self {
        let length = (duration_secs * sample_rate as f32) as usize;
        let mut rng = rand::thread_rng();
        let mut channel = || {
            (0..length)
                .map(|i| {
                    let noise: f32 = rng.gen_range(-1.0..=1.0);
                    noise * decay_envelope(i as f32 / length as f32, decay)
                })
                .collect::<Vec<f32>>()
        };
        let left = channel();
        let right = channel();
        Self { left, right }
    }

    /// Equal-power scale so a convolved signal keeps roughly the dry
    /// signal's level. The effect recipes were tuned against a convolver
    /// that normalizes implicitly, so this is part of the contract.
    pub fn normalization_scale(&self) -> f32 {
        let energy: f32 = self
            .left
            .iter()
            .chain(self.right.iter())
            .map(|s| s * s)
            .sum();
        let per_channel = energy / 2.0;
        if per_channel <= f32::EPSILON {
            return 1.0;
        }
        1.0 / per_channel.sqrt()
    }
}

/// FFT convolution of mono note buffers with the shared stereo impulse.
/// Impulse spectra are cached per transform size, so repeated notes of
/// the same length pay only one forward FFT.
pub struct Convolver {
    impulse: [Vec<f32>; 2],
    planner: RealFftPlanner<f32>,
    spectra: HashMap<usize, [Vec<Complex32>; 2]>,
}

impl Convolver {
    pub fn new(impulse: &ReverbImpulse) -> Self {
        let scale = impulse.normalization_scale();
        let scaled = |samples: &[f32]| samples.iter().map(|s| s * scale).collect::<Vec<f32>>();
        Self {
            impulse: [scaled(&impulse.left), scaled(&impulse.right)],
            planner: RealFftPlanner::new(),
            spectra: HashMap::new(),
        }
    }

    /// Length of the wet tail produced for a dry signal of `dry_len` samples
    pub fn output_len(&self, dry_len: usize) -> usize {
        dry_len + self.impulse[0].len().saturating_sub(1)
    }

    /// Convolve a mono dry buffer with both impulse channels
    pub fn process(&mut self, dry: &[f32]) -> Result<[Vec<f32>; 2], FftError> {
        let out_len = self.output_len(dry.len());
        let n = out_len.next_power_of_two();

        let forward = self.planner.plan_fft_forward(n);
        let inverse = self.planner.plan_fft_inverse(n);

        // Impulse spectra for this transform size, computed on first use
        if !self.spectra.contains_key(&n) {
            let mut pair = [forward.make_output_vec(), forward.make_output_vec()];
            for (channel, spectrum) in self.impulse.iter().zip(pair.iter_mut()) {
                let mut padded = vec![0.0f32; n];
                padded[..channel.len()].copy_from_slice(channel);
                forward.process(&mut padded, spectrum)?;
            }
            self.spectra.insert(n, pair);
        }

        let mut padded = vec![0.0f32; n];
        padded[..dry.len()].copy_from_slice(dry);
        let mut dry_spectrum = forward.make_output_vec();
        forward.process(&mut padded, &mut dry_spectrum)?;

        let impulse_spectra = &self.spectra[&n];
        let mut out = [Vec::new(), Vec::new()];
        for (spectrum, wet) in impulse_spectra.iter().zip(out.iter_mut()) {
            let mut product: Vec<Complex32> = dry_spectrum
                .iter()
                .zip(spectrum.iter())
                .map(|(a, b)| a * b)
                .collect();
            // DC and Nyquist bins of a real-signal product must stay real
            if let Some(first) = product.first_mut() {
                first.im = 0.0;
            }
            if let Some(last) = product.last_mut() {
                last.im = 0.0;
            }

            let mut time = vec![0.0f32; n];
            inverse.process(&mut product, &mut time)?;
            let norm = 1.0 / n as f32;
            time.truncate(out_len);
            for sample in &mut time {
                *sample *= norm;
            }
            *wet = time;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_envelope_endpoints() {
        assert_eq!(decay_envelope(0.0, 2.5), 1.0);
        assert_eq!(decay_envelope(1.0, 2.5), 0.0);
        // Monotone between the endpoints
        assert!(decay_envelope(0.25, 2.5) > decay_envelope(0.75, 2.5));
    }

    #[test]
    fn test_impulse_shape() {
        let impulse = ReverbImpulse::build(2.0, 2.5, 44_100);
        assert_eq!(impulse.left.len(), 88_200);
        assert_eq!(impulse.right.len(), 88_200);

        // Full amplitude range at the head, silence at the tail
        assert!(impulse.left[0].abs() <= 1.0);
        assert!(impulse.left.last().copied().unwrap_or(1.0).abs() < 1.0e-6);
        assert!(impulse.right.last().copied().unwrap_or(1.0).abs() < 1.0e-6);
    }

    #[test]
    fn test_convolving_unit_pulse_reproduces_impulse() {
        let impulse = ReverbImpulse {
            left: vec![1.0, 0.5, 0.25],
            right: vec![0.5, 0.25, 0.125],
        };
        let scale = impulse.normalization_scale();
        let mut convolver = Convolver::new(&impulse);

        let dry = [1.0, 0.0, 0.0, 0.0];
        let [left, right] = convolver.process(&dry).expect("convolution");
        assert_eq!(left.len(), convolver.output_len(dry.len()));

        for (got, want) in left.iter().zip(impulse.left.iter()) {
            assert!((got - want * scale).abs() < 1.0e-4, "{} vs {}", got, want);
        }
        for (got, want) in right.iter().zip(impulse.right.iter()) {
            assert!((got - want * scale).abs() < 1.0e-4, "{} vs {}", got, want);
        }
        // Everything past the impulse tail is silence
        for sample in &left[impulse.left.len()..] {
            assert!(sample.abs() < 1.0e-4);
        }
    }

    #[test]
    fn test_spectra_cache_reused_across_notes() {
        let impulse = ReverbImpulse::build(0.01, 2.5, 44_100);
        let mut convolver = Convolver::new(&impulse);
        convolver.process(&vec![0.25; 64]).expect("first note");
        convolver.process(&vec![0.5; 64]).expect("second note");
        assert_eq!(convolver.spectra.len(), 1);
    }
}
