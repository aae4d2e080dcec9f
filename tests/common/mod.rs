#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub fn storyset_cmd() -> Command {
    let mut cmd = Command::cargo_bin("storyset").unwrap();
    cmd.env_remove("STORYSET_ROOT");
    cmd.env_remove("STORYSET_APP_ID");
    cmd.env_remove("STORYSET_AUTH_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write `len` bytes of fake image data and return the path
pub fn write_image(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![0x5Au8; len]).unwrap();
    path
}

/// Run `add` in `root` and return the printed entry id
pub fn add_entry(root: &Path, image: &Path, grade: &str, sentence: &str) -> String {
    let output = storyset_cmd()
        .current_dir(root)
        .arg("add")
        .arg("--image")
        .arg(image)
        .arg("--grade")
        .arg(grade)
        .arg("--sentence")
        .arg(sentence)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .last()
        .unwrap()
        .trim()
        .to_string()
}
