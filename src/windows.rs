use std::f32::consts::TAU;

pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (TAU * i as f32 / size as f32).cos()))
        .collect()
}
