//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Get a path to a display profile fixture
pub fn profile_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("profiles").join(name)
}

pub fn valid_config_fixture() -> PathBuf {
    fixture_path("valid_config.toml")
}

pub fn invalid_config_fixture() -> PathBuf {
    fixture_path("invalid_config.toml")
}

/// Isolated environment: config search, HOME and cwd all point into a
/// temp directory so user configuration cannot leak into tests
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("screeninfo").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("SCREENINFO_CONFIG")
            .env_remove("SCREENINFO_SOURCE")
            .env_remove("SCREENINFO_PROFILE")
            .env_remove("SCREENINFO_DRM_ROOT")
            .env_remove("SCREENINFO_CONNECTOR")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the environment root
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// EDID base block for a 1920x1080@60 monitor, 527x296 mm, "DELL U2414H"
pub fn sample_edid() -> Vec<u8> {
    let mut edid = vec![0u8; 128];
    edid[..8].copy_from_slice(&[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    let id: u16 = (4 << 10) | (5 << 5) | 12;
    edid[8..10].copy_from_slice(&id.to_be_bytes());
    edid[10..12].copy_from_slice(&0xA0C4u16.to_le_bytes());
    edid[21] = 53;
    edid[22] = 30;
    edid[54..72].copy_from_slice(&[
        0x02, 0x3A, 0x80, 0x18, 0x71, 0x38, 0x2D, 0x40, 0x58, 0x2C, 0x45, 0x00, 0x0F, 0x28,
        0x21, 0x00, 0x00, 0x1E,
    ]);
    edid[72..77].copy_from_slice(&[0x00, 0x00, 0x00, 0xFC, 0x00]);
    let name = b"DELL U2414H\n ";
    edid[77..77 + name.len()].copy_from_slice(name);

    let sum = edid[..127].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    edid[127] = 0u8.wrapping_sub(sum);
    edid
}

/// Create a fake DRM sysfs tree with one connected monitor
pub fn fake_drm_root(root: &Path) -> PathBuf {
    let drm = root.join("drm");
    let connected = drm.join("card0-HDMI-A-1");
    let idle = drm.join("card0-DP-1");
    fs::create_dir_all(&connected).unwrap();
    fs::create_dir_all(&idle).unwrap();
    fs::create_dir_all(drm.join("card0")).unwrap();

    fs::write(connected.join("status"), "connected\n").unwrap();
    fs::write(connected.join("modes"), "1920x1080\n1280x720\n").unwrap();
    fs::write(connected.join("edid"), sample_edid()).unwrap();

    fs::write(idle.join("status"), "disconnected\n").unwrap();
    fs::write(idle.join("modes"), "").unwrap();
    fs::write(idle.join("edid"), b"").unwrap();
    drm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_exist() {
        assert!(fixtures_dir().exists(), "Fixtures directory should exist");
        assert!(valid_config_fixture().exists());
        assert!(invalid_config_fixture().exists());
        assert!(profile_fixture("pixel3.toml").exists());
    }

    #[test]
    fn test_sample_edid_checksum() {
        let edid = sample_edid();
        assert_eq!(edid.len(), 128);
        assert_eq!(edid.iter().fold(0u8, |acc, b| acc.wrapping_add(*b)), 0);
    }
}
