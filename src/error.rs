use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a job can end without writing its output.
#[derive(Debug, Error)]
pub enum Error {
    /// The destination exists and replacing it was not confirmed.
    #[error("Aborted: output file exists and overwrite not confirmed.")]
    Aborted,

    /// Transposition was requested but the crate was built without it.
    #[error(
        "Missing optional dependencies for transpose: rebuild with the `transpose` feature \
         to enable `rustfft` (pitch shifting) and `hound` (WAV sample I/O), \
         e.g. cargo install wavdump --features transpose"
    )]
    MissingCapability,

    /// The external transcoder failed; carries its diagnostic output.
    #[error("ffmpeg error: {0}")]
    Transcode(String),

    #[error("Failed processing file: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Aborted)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

#[cfg(feature = "transpose")]
impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}
