use std::f32::consts::{PI, TAU};

use rustfft::num_complex::Complex32;

use crate::{
    fft::{fill_right_part_of_spectrum, Fft},
    transform::transform,
    windows::hann_window,
};

pub const WINDOW_SIZE: usize = 2048;
pub const SLIDE_SIZE: usize = WINDOW_SIZE / 4;

/// Shifts `buf` by `semitones` without changing its length.
pub fn shift_semitones(
    buf: &[f32],
    semitones: i32,
    window_size: usize,
    slide_size: usize,
) -> Vec<f32> {
    let pitch = semitones as f32 / 12.0;
    transform(
        slide_size,
        &hann_window(window_size),
        buf,
        transform_processor(window_size, slide_size, pitch),
    )
}

/// Frame processor shifting by `pitch` octaves.
pub fn transform_processor(
    window_size: usize,
    slide_size: usize,
    pitch: f32,
) -> impl FnMut(&[f32]) -> Vec<f32> {
    let fft = Fft::new(window_size);
    let mut pitch_shifter = PitchShifter::new(window_size);

    move |buf| {
        fft.retouch_spectrum(buf, |spectrum| {
            process_spectrum(slide_size, &mut pitch_shifter, pitch, spectrum);
        })
    }
}

pub fn process_spectrum(
    slide_size: usize,
    pitch_shifter: &mut PitchShifter,
    pitch: f32,
    spectrum: &mut [Complex32],
) {
    let pitch_change_amount = 2.0f32.powf(pitch);
    let len = spectrum.len();

    let shifted_spectrum = pitch_shifter.process(spectrum, pitch_change_amount, slide_size);

    spectrum[..len / 2 + 1].copy_from_slice(&shifted_spectrum[..len / 2 + 1]);

    fill_right_part_of_spectrum(spectrum);
}

/// Phase vocoder state carried between consecutive frames.
pub struct PitchShifter {
    prev_input_phases: Vec<f32>,
    prev_output_phases: Vec<f32>,
}

impl PitchShifter {
    pub fn new(len: usize) -> Self {
        Self {
            prev_input_phases: vec![0.0; len / 2 + 1],
            prev_output_phases: vec![0.0; len / 2 + 1],
        }
    }

    pub fn process(
        &mut self,
        spectrum: &[Complex32],
        pitch_change_amount: f32,
        slide_size: usize,
    ) -> Vec<Complex32> {
        let len = spectrum.len();
        let half = len / 2 + 1;
        let expected_advance = |bin: usize| TAU * ((bin * slide_size) % len) as f32 / len as f32;

        // [magnitude, true frequency in bins]
        let mut pre = vec![[0.0f32; 2]; half];
        for i in 0..half {
            let (norm, phase) = spectrum[i].to_polar();

            let phase_diff = wrap_phase(phase - self.prev_input_phases[i] - expected_advance(i));
            self.prev_input_phases[i] = phase;
            let bin_deviation = phase_diff * len as f32 / slide_size as f32 / TAU;

            pre[i] = [norm, i as f32 + bin_deviation];
        }

        let mut post = vec![[0.0f32; 2]; half];
        if pitch_change_amount < 1.0 {
            // several source bins land on one target bin
            for (k, &[norm, freq]) in pre.iter().enumerate() {
                let i = (k as f32 * pitch_change_amount).round() as usize;
                post[i][0] += norm;
                post[i][1] = freq * pitch_change_amount;
            }
        } else {
            for (i, target) in post.iter_mut().enumerate() {
                let shifted_bin = (i as f32 / pitch_change_amount).round() as usize;
                if shifted_bin >= half {
                    break;
                }
                *target = [
                    pre[shifted_bin][0],
                    pre[shifted_bin][1] * pitch_change_amount,
                ];
            }
        }

        let mut phases: Vec<f32> = (0..half)
            .map(|i| {
                let bin_deviation = post[i][1] - i as f32;
                let phase_diff =
                    bin_deviation * TAU * slide_size as f32 / len as f32 + expected_advance(i);
                wrap_phase(self.prev_output_phases[i] + phase_diff)
            })
            .collect();

        if pitch_change_amount != 1.0 {
            lock_phases(&post, &mut phases);
        }

        let mut shifted_spectrum = spectrum.to_vec();
        for i in 0..half {
            shifted_spectrum[i] = Complex32::from_polar(post[i][0], phases[i]);
        }
        self.prev_output_phases.copy_from_slice(&phases);

        fill_right_part_of_spectrum(&mut shifted_spectrum);

        shifted_spectrum
    }
}

/// Ties every bin to the nearest magnitude peak, alternating by pi as a
/// stationary partial under a centered window does.
fn lock_phases(post: &[[f32; 2]], phases: &mut [f32]) {
    let len = post.len();
    let peaks: Vec<usize> = (0..len)
        .filter(|&i| {
            let norm = post[i][0];
            (i == 0 || norm > post[i - 1][0]) && (i + 1 == len || norm >= post[i + 1][0])
        })
        .collect();

    let mut j = 0;
    for i in 0..len {
        if peaks.is_empty() {
            break;
        }
        while j + 1 < peaks.len() && peaks[j + 1].abs_diff(i) <= peaks[j].abs_diff(i) {
            j += 1;
        }
        let peak = peaks[j];
        if i != peak {
            phases[i] = wrap_phase(phases[peak] + PI * (i as f32 - peak as f32));
        }
    }
}

pub fn wrap_phase(phase: f32) -> f32 {
    if phase >= 0.0 {
        (phase + PI) % TAU - PI
    } else {
        (phase - PI) % TAU + PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44100.0;

    fn sine(freq: f32, seconds: f32) -> Vec<f32> {
        (0..(SAMPLE_RATE * seconds) as usize)
            .map(|i| 0.5 * (TAU * freq * i as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    // Rising zero crossings per second over the middle half of the buffer.
    fn estimate_freq(buf: &[f32]) -> f32 {
        let middle = &buf[buf.len() / 4..buf.len() * 3 / 4];
        let crossings = middle
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count();
        crossings as f32 * SAMPLE_RATE / middle.len() as f32
    }

    fn rms(buf: &[f32]) -> f32 {
        let middle = &buf[buf.len() / 4..buf.len() * 3 / 4];
        (middle.iter().map(|x| x * x).sum::<f32>() / middle.len() as f32).sqrt()
    }

    #[test]
    fn test_wrap_phase() {
        for &phase in &[0.0, 1.0, -1.0, 3.0 * PI, -3.0 * PI + 0.1, 10.0, -10.0] {
            let wrapped = wrap_phase(phase);
            assert!((-PI..=PI).contains(&wrapped), "{phase} -> {wrapped}");
            let turns = (phase - wrapped) / TAU;
            assert!((turns - turns.round()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_semitones_is_near_identity() {
        let buf = sine(440.0, 0.5);
        let out = shift_semitones(&buf, 0, WINDOW_SIZE, SLIDE_SIZE);

        assert_eq!(out.len(), buf.len());
        let max_err = buf
            .iter()
            .zip(out.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_err < 1e-3, "max error {max_err}");
    }

    #[test]
    fn test_octave_up_and_down() {
        let buf = sine(330.0, 1.0);

        let up = shift_semitones(&buf, 12, WINDOW_SIZE, SLIDE_SIZE);
        assert_eq!(up.len(), buf.len());
        let freq = estimate_freq(&up);
        assert!((freq - 660.0).abs() < 660.0 * 0.05, "estimated {freq} Hz");
        assert!(rms(&up) > rms(&buf) * 0.5);

        let down = shift_semitones(&buf, -12, WINDOW_SIZE, SLIDE_SIZE);
        assert_eq!(down.len(), buf.len());
        let freq = estimate_freq(&down);
        assert!((freq - 165.0).abs() < 165.0 * 0.05, "estimated {freq} Hz");
        assert!(rms(&down) > rms(&buf) * 0.5);
    }

    #[test]
    fn test_small_steps() {
        let buf = sine(330.0, 1.0);
        for semitones in [-5, -1, 1, 3] {
            let expected = 330.0 * 2.0f32.powf(semitones as f32 / 12.0);
            let freq = estimate_freq(&shift_semitones(&buf, semitones, WINDOW_SIZE, SLIDE_SIZE));
            assert!(
                (freq - expected).abs() < expected * 0.02,
                "{semitones}: estimated {freq} Hz, expected {expected} Hz"
            );
        }
    }

    #[test]
    fn test_silence_stays_silent() {
        let buf = vec![0.0; 10_000];
        let out = shift_semitones(&buf, 7, WINDOW_SIZE, SLIDE_SIZE);
        assert_eq!(out.len(), buf.len());
        assert!(out.iter().all(|x| x.abs() < 1e-6));
    }
}
