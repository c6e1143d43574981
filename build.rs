//! Build script for screeninfo
//!
//! Embeds build-time information into the binary:
//! - Git commit hash, branch and dirty state
//! - Build timestamp
//! - Target/host triples and profile
//! - Rust version

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = command_output("git", &["rev-parse", "--short=8", "HEAD"]);
    let git_branch = command_output("git", &["rev-parse", "--abbrev-ref", "HEAD"]);
    let git_dirty = is_git_dirty();

    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let rustc_version = command_output("rustc", &["--version"]);

    let vars = [
        ("SCREENINFO_GIT_HASH", git_hash.clone()),
        ("SCREENINFO_GIT_BRANCH", git_branch),
        ("SCREENINFO_GIT_DIRTY", git_dirty.to_string()),
        ("SCREENINFO_BUILD_TIMESTAMP", build_timestamp),
        ("SCREENINFO_TARGET", env_or_unknown("TARGET")),
        ("SCREENINFO_PROFILE", env_or_unknown("PROFILE")),
        ("SCREENINFO_RUSTC_VERSION", rustc_version),
        ("SCREENINFO_HOST", env_or_unknown("HOST")),
    ];

    for (key, value) in &vars {
        println!("cargo:rustc-env={}={}", key, value);
    }

    eprintln!(
        "Building screeninfo: {}{}",
        git_hash,
        if git_dirty == "true" { " (dirty)" } else { "" }
    );
}

fn env_or_unknown(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| "unknown".to_string())
}

/// Run a command and return its trimmed stdout, or "unknown" on any failure
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Check if the git working directory is dirty
fn is_git_dirty() -> &'static str {
    Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .map(|output| {
            if output.status.success() && !output.stdout.is_empty() {
                "true"
            } else {
                "false"
            }
        })
        .unwrap_or("unknown")
}
