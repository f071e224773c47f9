//! Embeds a version string for `--version` and the default user agent.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let version = describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=SNOO_VERSION={}", version);
}

/// `git describe` output without a leading `v`, if git is available.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    let version = raw.trim();
    let version = version.strip_prefix('v').unwrap_or(version);

    (!version.is_empty()).then(|| version.to_string())
}
