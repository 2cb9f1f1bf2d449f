//! # wavdump
//!
//! Dump any audio/video file to a WAV through ffmpeg, optionally transposing it
//! by a number of semitones with an in-crate phase vocoder.
//!
//! ## Features
//!
//! - `transpose` (default): pitch shifting over `rustfft` and WAV sample I/O over
//!   `hound`. Without it `--transpose` fails with a missing capability error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wavdump::{pipeline, transcode::Ffmpeg, transpose, Job, Prompt, Toolkit};
//!
//! let toolkit = Toolkit {
//!     transcoder: Box::new(Ffmpeg::default()),
//!     transposer: transpose::probe(),
//! };
//! let mut job = Job::new("song.mp3");
//! job.transpose = Some(-2);
//!
//! let mut prompt = Prompt::new(std::io::stdin().lock(), std::io::stderr());
//! let outcome = pipeline::run(&job, &toolkit, &mut prompt)?;
//! println!("{outcome}");
//! # Ok::<(), wavdump::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod job;
pub mod overwrite;
pub mod pipeline;
pub mod transcode;
pub mod transpose;

#[cfg(feature = "transpose")]
pub mod fft;
#[cfg(feature = "transpose")]
pub mod pitch_shift;
#[cfg(feature = "transpose")]
pub mod transform;
#[cfg(feature = "transpose")]
pub mod wav;
#[cfg(feature = "transpose")]
pub mod windows;

pub use error::{Error, Result};
pub use job::Job;
pub use overwrite::{Confirm, OverwritePolicy, Prompt};
pub use pipeline::{Outcome, Toolkit};
