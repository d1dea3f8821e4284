//! Build script: embeds the version string (from `GPX_VERSION` or `git describe`).

use std::process::Command;

const VERSION_ENV: &str = "GPX_VERSION";

/// `git describe` output for the enclosing checkout, if there is one.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!described.is_empty()).then_some(described)
}

fn main() {
    // A release build passes GPX_VERSION explicitly; local builds use git.
    let version = std::env::var(VERSION_ENV).ok().or_else(git_describe);
    if let Some(version) = version {
        println!("cargo:rustc-env={VERSION_ENV}={version}");
    }

    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/");
    println!("cargo:rerun-if-env-changed={VERSION_ENV}");
}
