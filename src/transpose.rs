use std::path::Path;

use crate::{error::Result, overwrite::OverwritePolicy};

/// Mono samples in [-1.0, 1.0] held between decode and write.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Sample-level half of the transpose path: load, shift, write.
pub trait Transpose {
    fn load_mono(&self, path: &Path) -> Result<SampleBuffer>;

    fn shift(&self, buffer: &SampleBuffer, semitones: i32) -> Result<SampleBuffer>;

    fn write_pcm16(&self, path: &Path, buffer: &SampleBuffer, policy: OverwritePolicy)
        -> Result<()>;
}

/// Returns the transposer compiled into this build, if any.
#[cfg(feature = "transpose")]
pub fn probe() -> Option<Box<dyn Transpose>> {
    Some(Box::<PhaseVocoder>::default())
}

#[cfg(not(feature = "transpose"))]
pub fn probe() -> Option<Box<dyn Transpose>> {
    None
}

#[cfg(feature = "transpose")]
pub use vocoder::PhaseVocoder;

#[cfg(feature = "transpose")]
mod vocoder {
    use std::path::Path;

    use tracing::debug;

    use super::{SampleBuffer, Transpose};
    use crate::{error::Result, overwrite::OverwritePolicy, pitch_shift, wav};

    /// Phase vocoder over `rustfft`, WAV I/O over `hound`.
    #[derive(Debug, Clone, Copy)]
    pub struct PhaseVocoder {
        pub window_size: usize,
        pub slide_size: usize,
    }

    impl Default for PhaseVocoder {
        fn default() -> Self {
            Self {
                window_size: pitch_shift::WINDOW_SIZE,
                slide_size: pitch_shift::SLIDE_SIZE,
            }
        }
    }

    impl Transpose for PhaseVocoder {
        fn load_mono(&self, path: &Path) -> Result<SampleBuffer> {
            wav::load_mono(path)
        }

        fn shift(&self, buffer: &SampleBuffer, semitones: i32) -> Result<SampleBuffer> {
            debug!(
                semitones,
                samples = buffer.samples.len(),
                sample_rate = buffer.sample_rate,
                "shifting pitch"
            );
            let samples = pitch_shift::shift_semitones(
                &buffer.samples,
                semitones,
                self.window_size,
                self.slide_size,
            );
            Ok(SampleBuffer::new(samples, buffer.sample_rate))
        }

        fn write_pcm16(
            &self,
            path: &Path,
            buffer: &SampleBuffer,
            policy: OverwritePolicy,
        ) -> Result<()> {
            wav::write_pcm16(path, buffer, policy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let buffer = SampleBuffer::new(vec![0.0; 22050], 44100);
        assert!((buffer.duration() - 0.5).abs() < 1e-6);
    }

    #[cfg(feature = "transpose")]
    #[test]
    fn test_probe_finds_vocoder() {
        let transposer = probe().expect("built with the transpose feature");
        let buffer = SampleBuffer::new(vec![0.0; 4096], 44100);
        let shifted = transposer.shift(&buffer, -3).unwrap();
        assert_eq!(shifted.sample_rate, 44100);
        assert_eq!(shifted.samples.len(), 4096);
    }

    #[cfg(not(feature = "transpose"))]
    #[test]
    fn test_probe_without_feature() {
        assert!(probe().is_none());
    }
}
