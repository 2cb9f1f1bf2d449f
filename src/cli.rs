//! Command-line surface.

use std::{io, path::PathBuf};

use clap::Parser;

use crate::{
    error::Result,
    job::Job,
    overwrite::Prompt,
    pipeline::{self, Outcome, Toolkit},
    transcode::Ffmpeg,
    transpose,
};

/// Read an audio/video file with ffmpeg and dump it as a WAV.
///
/// By default the output is `<basename>.wav` in the current directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "wavdump", version)]
pub struct Args {
    /// Input audio/video file
    #[arg(value_name = "FILEPATH", value_parser = existing_file)]
    pub input: PathBuf,

    /// Output file path (defaults to input basename with .wav)
    #[arg(short, long, value_parser = not_a_directory)]
    pub output: Option<PathBuf>,

    /// Transpose audio by N semitones (e.g. +3, -4)
    #[arg(short, long, value_name = "SEMITONES", allow_negative_numbers = true)]
    pub transpose: Option<i32>,

    /// Overwrite output without prompting (non-interactive)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// ffmpeg executable used for decoding
    #[arg(long, env = "WAVDUMP_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn job(&self) -> Job {
        Job {
            input: self.input.clone(),
            output: self.output.clone(),
            transpose: self.transpose,
            assume_yes: self.yes,
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

pub fn run(args: &Args) -> Result<Outcome> {
    let toolkit = Toolkit {
        transcoder: Box::new(Ffmpeg::new(&args.ffmpeg)),
        transposer: transpose::probe(),
    };
    let mut prompt = Prompt::new(io::stdin().lock(), io::stderr());

    pipeline::run(&args.job(), &toolkit, &mut prompt)
}

fn existing_file(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err(format!("File '{value}' does not exist."));
    }
    if path.is_dir() {
        return Err(format!("File '{value}' is a directory."));
    }
    Ok(path)
}

fn not_a_directory(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        return Err(format!("File '{value}' is a directory."));
    }
    Ok(path)
}
