//! Platform detection and OS-specific directories.

use std::path::PathBuf;
use crate::constants::APP_DIR_NAME;
use crate::error::{FaError, FaResult};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detect the current platform at compile time.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Get the platform-specific application data directory.
    ///
    /// - Windows: `%APPDATA%/FundiAdmin`
    /// - macOS: `~/Library/Application Support/FundiAdmin`
    /// - Linux: `~/.local/share/FundiAdmin`
    pub fn data_dir() -> FaResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| FaError::Config("could not determine data directory".into()))?;
        Ok(base.join(APP_DIR_NAME))
    }

    /// Get the platform-specific configuration directory.
    pub fn config_dir() -> FaResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| FaError::Config("could not determine config directory".into()))?;
        Ok(base.join(APP_DIR_NAME))
    }

    /// Get a human-readable platform name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_name() {
        assert_eq!(Platform::Windows.name(), "Windows");
        assert_eq!(Platform::MacOs.name(), "macOS");
        assert_eq!(Platform::Linux.to_string(), "Linux");
    }

    #[test]
    fn test_dirs_end_with_app_name() {
        if let Ok(dir) = Platform::data_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
        if let Ok(dir) = Platform::config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }
}
