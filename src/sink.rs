//! Image sinks. The pipeline hands over PNG bytes plus a date-derived
//! file stem; everything after that (naming collisions, where the file
//! lives) is the sink's business.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

/// Receives the finished shop image.
pub trait ImageSink {
    /// Persist `png` under a name derived from `stem`, returning where
    /// it ended up.
    fn store(&self, png: &[u8], stem: &str) -> Result<PathBuf>;
}

/// Writes `<stem>_v<N>.png` into a directory, bumping the version until
/// it finds a free name so re-renders of the same day never clobber
/// earlier output.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageSink for FileSink {
    fn store(&self, png: &[u8], stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let mut version = 1u32;
        loop {
            let path = self.dir.join(format!("{stem}_v{version}.png"));
            if !path.exists() {
                std::fs::write(&path, png)?;
                info!("shop image written to {}", path.display());
                return Ok(path);
            }
            version += 1;
        }
    }
}

/// Convenience for callers that only need the default file sink.
pub fn store_png(dir: &Path, png: &[u8], stem: &str) -> Result<PathBuf> {
    FileSink::new(dir).store(png, stem)
}
