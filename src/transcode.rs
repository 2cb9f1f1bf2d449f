use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    overwrite::OverwritePolicy,
};

/// PCM layout requested from the transcoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub codec: &'static str,
    pub channels: u16,
    pub sample_rate: u32,
}

impl WavFormat {
    /// 16-bit little-endian PCM, stereo, 44.1 kHz.
    pub const STANDARD: WavFormat = WavFormat {
        codec: "pcm_s16le",
        channels: 2,
        sample_rate: 44100,
    };
}

pub trait Transcode {
    fn transcode(
        &self,
        input: &Path,
        output: &Path,
        format: &WavFormat,
        policy: OverwritePolicy,
    ) -> Result<()>;
}

pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn arguments(
        &self,
        input: &Path,
        output: &Path,
        format: &WavFormat,
        policy: OverwritePolicy,
    ) -> Vec<OsString> {
        let overwrite = match policy {
            OverwritePolicy::Fresh => "-n",
            OverwritePolicy::Replace => "-y",
        };

        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error", overwrite, "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(input.into());
        args.extend(
            [
                "-vn".to_string(),
                "-f".to_string(),
                "wav".to_string(),
                "-acodec".to_string(),
                format.codec.to_string(),
                "-ac".to_string(),
                format.channels.to_string(),
                "-ar".to_string(),
                format.sample_rate.to_string(),
            ]
            .into_iter()
            .map(OsString::from),
        );
        args.push(output.into());
        args
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Transcode for Ffmpeg {
    fn transcode(
        &self,
        input: &Path,
        output: &Path,
        format: &WavFormat,
        policy: OverwritePolicy,
    ) -> Result<()> {
        let args = self.arguments(input, output, format, policy);
        info!(input = %input.display(), output = %output.display(), "transcoding");
        debug!(program = %self.program.display(), ?args, "spawning transcoder");

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|err| {
                Error::Transcode(format!("could not launch {}: {err}", self.program.display()))
            })?;

        if result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
        if stderr.is_empty() {
            Err(Error::Transcode(format!("transcoder exited with {}", result.status)))
        } else {
            Err(Error::Transcode(stderr))
        }
    }
}
