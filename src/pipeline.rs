//! Output resolution, overwrite confirmation and the two processing paths.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    job::Job,
    overwrite::{self, Confirm, OverwritePolicy},
    transcode::{Transcode, WavFormat},
    transpose::Transpose,
};

/// Capabilities a job runs against.
pub struct Toolkit {
    pub transcoder: Box<dyn Transcode>,
    /// `None` when the build has no pitch-shift support.
    pub transposer: Option<Box<dyn Transpose>>,
}

/// A finished job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: PathBuf,
    pub transpose: Option<i32>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote: {}", self.output.display())?;
        if let Some(semitones) = self.transpose {
            write!(f, " (transpose: {semitones:+} semitones)")?;
        }
        Ok(())
    }
}

pub fn run(job: &Job, toolkit: &Toolkit, confirm: &mut dyn Confirm) -> Result<Outcome> {
    let output = job.output_path();
    let policy = overwrite::guard(&output, job.assume_yes, confirm)?;

    match job.transpose {
        None => direct(toolkit.transcoder.as_ref(), &job.input, &output, policy)?,
        Some(semitones) => transposed(toolkit, &job.input, &output, policy, semitones)?,
    }

    Ok(Outcome {
        output,
        transpose: job.transpose,
    })
}

fn direct(
    transcoder: &dyn Transcode,
    input: &Path,
    output: &Path,
    policy: OverwritePolicy,
) -> Result<()> {
    info!(?policy, "direct transcode");
    transcoder.transcode(input, output, &WavFormat::STANDARD, policy)
}

fn transposed(
    toolkit: &Toolkit,
    input: &Path,
    output: &Path,
    policy: OverwritePolicy,
    semitones: i32,
) -> Result<()> {
    let transposer = toolkit
        .transposer
        .as_deref()
        .ok_or(Error::MissingCapability)?;
    info!(semitones, ?policy, "transposing");

    let scratch = ScratchWav::new()?;
    toolkit.transcoder.transcode(
        input,
        scratch.path(),
        &WavFormat::STANDARD,
        OverwritePolicy::Replace,
    )?;

    let decoded = transposer.load_mono(scratch.path())?;
    let shifted = transposer.shift(&decoded, semitones)?;

    if policy == OverwritePolicy::Replace && output.exists() {
        // the write below truncates anyway
        if let Err(err) = fs::remove_file(output) {
            debug!(path = %output.display(), error = %err, "could not remove previous output");
        }
    }
    transposer.write_pcm16(output, &shifted, policy)
}

/// Intermediate WAV removed on every exit from the transpose path.
struct ScratchWav {
    path: PathBuf,
}

impl ScratchWav {
    fn new() -> Result<Self> {
        let path = tempfile::Builder::new()
            .prefix("wavdump-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path()
            .keep()
            .map_err(|err| err.error)?;
        debug!(path = %path.display(), "allocated scratch file");
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchWav {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        // Cleanup failures never replace the job's own result.
        if let Err(err) = fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %err, "could not remove scratch file");
        }
    }
}
