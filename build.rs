use std::process::Command;

/// Short hash of the checked-out commit, or `unknown` outside a git checkout.
fn short_commit_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // Reported by `crossfill --version`
    println!("cargo:rustc-env=GIT_HASH={}", short_commit_hash());
    println!("cargo:rerun-if-changed=.git/HEAD");
}
