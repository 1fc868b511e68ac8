//! File-backed logging.
//!
//! The terminal belongs to the UI, so records go to ~/.aeroflap/aeroflap.log.
//! The filter defaults to `info` and honours `RUST_LOG`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Install `env_logger`, appending to `path`.
pub fn init_file_logger(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        // A second init in the same process may fail; the file must exist either way.
        let _ = init_file_logger(&path);
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(init_file_logger(dir.path()).is_err());
    }
}
