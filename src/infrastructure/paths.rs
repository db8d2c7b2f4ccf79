//! Filesystem locations.

use std::path::{Path, PathBuf};

/// Directory name under the platform cache directory.
pub const APP_DIR: &str = "reqtui";

/// Default data directory: `<cache dir>/reqtui`, e.g. `~/.cache/reqtui` on
/// Linux. Falls back to `./.reqtui` when the platform reports no cache
/// directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::cache_dir().map_or_else(|| PathBuf::from(".reqtui"), |dir| dir.join(APP_DIR))
}

/// Replaces a leading `~` with the home directory.
///
/// ```text
/// ~/data   ->  /home/ada/data
/// ~        ->  /home/ada
/// ~ada/x   ->  ~ada/x      (other users are not resolved)
/// /abs     ->  /abs
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        assert!(default_data_dir().ends_with(APP_DIR) || default_data_dir() == Path::new(".reqtui"));
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde(Path::new("/var/lib")), PathBuf::from("/var/lib"));
        assert_eq!(expand_tilde(Path::new("~other/x")), PathBuf::from("~other/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/data")), home.join("data"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
