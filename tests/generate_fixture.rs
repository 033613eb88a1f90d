use std::{fs, path::Path, process::Command};

use tempfile::tempdir;

fn generate(output: &Path, args: &[&str]) {
    let status = Command::new(env!("CARGO_BIN_EXE_generate_fixture"))
        .arg("--output")
        .arg(output)
        .args(args)
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn test_empty_fixture() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.bin");
    generate(&path, &["--size", "0"]);
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn test_zero_fill_exact_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zero.bin");
    generate(&path, &["--size", "65537"]);

    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), 65537);
    assert!(data.iter().all(|&b| b == 0));
}

#[test]
fn test_seeded_random_fill_is_reproducible() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.bin");
    let second = dir.path().join("b.bin");
    let other = dir.path().join("c.bin");
    let args = ["--size", "100000", "--fill", "random", "--seed", "7"];
    generate(&first, &args);
    generate(&second, &args);
    generate(&other, &["--size", "100000", "--fill", "random", "--seed", "8"]);

    let a = fs::read(&first).unwrap();
    let b = fs::read(&second).unwrap();
    assert_eq!(a.len(), 100000);
    assert_eq!(a, b);
    assert!(a.iter().any(|&x| x != 0));
    assert_ne!(a, fs::read(&other).unwrap());
}
