/// Short-time processing of a whole buffer with weighted overlap-add.
///
/// Every frame is windowed before `process` and again after it. The input is
/// padded so each output sample is covered by the same number of frames, which
/// makes an identity `process` reproduce `buf` for overlaps where the squared
/// window sums to a constant (Hann at 1/4 slide).
pub fn transform(
    slide_size: usize,
    window: &[f32],
    buf: &[f32],
    mut process: impl FnMut(&[f32]) -> Vec<f32>,
) -> Vec<f32> {
    let window_size = window.len();
    assert!(0 < slide_size && slide_size <= window_size);

    let pad = window_size - slide_size;
    let mut padded = vec![0.0; pad];
    padded.extend_from_slice(buf);
    padded.resize(pad + buf.len() + window_size, 0.0);

    let output_scale = slide_size as f32 / window.iter().map(|w| w * w).sum::<f32>();
    let mut output = vec![0.0; padded.len()];
    let mut frame = vec![0.0; window_size];

    for start in (0..=padded.len() - window_size).step_by(slide_size) {
        for ((f, x), w) in frame.iter_mut().zip(&padded[start..]).zip(window) {
            *f = x * w;
        }
        let processed = process(&frame);
        for ((y, x), w) in output[start..].iter_mut().zip(processed).zip(window) {
            *y += x * w * output_scale;
        }
    }

    output.drain(..pad);
    output.truncate(buf.len());
    output
}

pub fn process_nop(buf: &[f32]) -> Vec<f32> {
    buf.to_vec()
}
