//! Battery state files under a runtime directory
//!
//! Mimics the kernel's power-supply sysfs layout with two small files,
//! `status` and `capacity`, so frontends can read battery state without
//! talking to the hardware themselves.

use super::StatusSink;
use crate::error::{Error, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Sticky, world-readable runtime directory mode
const DIR_MODE: u32 = 0o1735;

/// Writes `status` and `capacity` files under one directory
pub struct StatusFiles {
    dir: PathBuf,
}

impl StatusFiles {
    /// Create (or take over) the output directory
    pub fn create(dir: &Path) -> Result<Self> {
        let persistence = |source| Error::Persistence {
            path: dir.display().to_string(),
            source,
        };
        fs::create_dir_all(dir).map_err(persistence)?;
        fs::set_permissions(dir, fs::Permissions::from_mode(DIR_MODE)).map_err(persistence)?;
        Ok(StatusFiles {
            dir: dir.to_path_buf(),
        })
    }

    fn write_file(&self, name: &str, contents: String) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, contents).map_err(|source| Error::Persistence {
            path: path.display().to_string(),
            source,
        })
    }
}

impl StatusSink for StatusFiles {
    fn write_status(&mut self, charging: bool) -> Result<()> {
        let label = if charging { "Charging" } else { "Discharging" };
        self.write_file("status", format!("{}\n", label))
    }

    fn write_capacity(&mut self, percent: i32) -> Result<()> {
        self.write_file("capacity", format!("{}\n", percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_status_and_capacity_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("bat");
        let mut sink = StatusFiles::create(&dir).unwrap();

        sink.write_status(true).unwrap();
        sink.write_capacity(87).unwrap();
        assert_eq!(fs::read_to_string(dir.join("status")).unwrap(), "Charging\n");
        assert_eq!(fs::read_to_string(dir.join("capacity")).unwrap(), "87\n");

        sink.write_status(false).unwrap();
        assert_eq!(
            fs::read_to_string(dir.join("status")).unwrap(),
            "Discharging\n"
        );
    }

    #[test]
    fn create_sets_directory_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("bat");
        StatusFiles::create(&dir).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, DIR_MODE);
    }

    #[test]
    fn unwritable_directory_is_a_persistence_error() {
        let result = StatusFiles::create(Path::new("/proc/pocket-io-nope"));
        assert!(matches!(result, Err(Error::Persistence { .. })));
    }
}
