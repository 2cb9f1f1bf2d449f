//! WAV sample I/O.

use std::{
    fs::{File, OpenOptions},
    io::BufWriter,
    path::Path,
};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::{error::Result, overwrite::OverwritePolicy, transpose::SampleBuffer};

/// Loads a WAV file, averaging all channels into one, at its native rate.
pub fn load_mono(path: impl AsRef<Path>) -> Result<SampleBuffer> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let samples = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok(SampleBuffer::new(samples, spec.sample_rate))
}

/// Writes mono 16-bit PCM, clipping to full scale.
pub fn write_pcm16(
    path: impl AsRef<Path>,
    buffer: &SampleBuffer,
    policy: OverwritePolicy,
) -> Result<()> {
    let path = path.as_ref();
    let file = match policy {
        OverwritePolicy::Fresh => OpenOptions::new().write(true).create_new(true).open(path)?,
        OverwritePolicy::Replace => File::create(path)?,
    };

    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::new(BufWriter::new(file), spec)?;
    for &x in buffer.samples.iter() {
        writer
            .write_sample((x * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;
    Ok(())
}
