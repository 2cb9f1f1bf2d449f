use std::sync::Arc;

use rustfft::num_complex::Complex32;

pub struct Fft {
    forward: Arc<dyn rustfft::Fft<f32>>,
    inverse: Arc<dyn rustfft::Fft<f32>>,
}

impl Fft {
    pub fn new(size: usize) -> Self {
        let mut planner = rustfft::FftPlanner::new();
        Self {
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
        }
    }

    /// Runs `process` on the spectrum of `buf` and returns the real part of the result.
    pub fn retouch_spectrum(
        &self,
        buf: &[f32],
        process: impl FnOnce(&mut [Complex32]),
    ) -> Vec<f32> {
        let mut spectrum: Vec<_> = buf.iter().map(|&x| Complex32::new(x, 0.0)).collect();
        self.forward(&mut spectrum);
        process(&mut spectrum);
        self.inverse(&mut spectrum);
        fix_scale(&mut spectrum);
        spectrum.iter().map(|x| x.re).collect()
    }

    pub fn forward(&self, buffer: &mut [Complex32]) {
        self.forward.process(buffer);
    }

    pub fn inverse(&self, buffer: &mut [Complex32]) {
        self.inverse.process(buffer);
    }
}

pub fn fix_scale(buf: &mut [Complex32]) {
    let scale = 1.0 / buf.len() as f32;
    for x in buf.iter_mut() {
        *x *= scale;
    }
}

/// Mirrors bins `1..len/2` so the spectrum of a real signal stays Hermitian.
pub fn fill_right_part_of_spectrum(spectrum: &mut [Complex32]) {
    let len = spectrum.len();
    for i in 1..len / 2 {
        spectrum[len - i] = spectrum[i].conj();
    }
}
