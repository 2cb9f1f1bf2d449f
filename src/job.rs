use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Parameters of a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Semitones; `Some(0)` still runs the transpose path.
    pub transpose: Option<i32>,
    pub assume_yes: bool,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            transpose: None,
            assume_yes: false,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `<input stem>.wav`, relative to the working directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name: OsString = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".wav");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/a/b/song.mp3")),
            PathBuf::from("song.wav")
        );
        assert_eq!(
            default_output_path(Path::new("input.mp4")),
            PathBuf::from("input.wav")
        );
        assert_eq!(
            default_output_path(Path::new("clip")),
            PathBuf::from("clip.wav")
        );
        assert_eq!(
            default_output_path(Path::new("dir/archive.tar.gz")),
            PathBuf::from("archive.tar.wav")
        );
        assert_eq!(
            default_output_path(Path::new("take.wav")),
            PathBuf::from("take.wav")
        );
    }

    #[test]
    fn test_explicit_output_wins() {
        let mut job = Job::new("/media/input.mp4");
        assert_eq!(job.output_path(), PathBuf::from("input.wav"));

        job.output = Some(PathBuf::from("renders/out.wav"));
        assert_eq!(job.output_path(), PathBuf::from("renders/out.wav"));
    }
}
