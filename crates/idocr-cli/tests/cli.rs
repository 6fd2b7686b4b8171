use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{GrayImage, Luma};
use predicates::prelude::*;
use tempfile::TempDir;

const AADHAAR_DUMP: &str = r#"[
    {"bbox": [[10,10],[200,10],[200,30],[10,30]], "text": "Government of India", "confidence": 0.97},
    {"bbox": [[10,40],[150,40],[150,60],[10,60]], "text": "RAM KUMAR", "confidence": 0.93},
    {"bbox": [[10,70],[180,70],[180,90],[10,90]], "text": "DOB: 01-01-1990", "confidence": 0.91},
    {"bbox": [[10,100],[60,100],[60,120],[10,120]], "text": "Male", "confidence": 0.88},
    {"bbox": [[10,130],[200,130],[200,150],[10,150]], "text": "1234 5678 9012", "confidence": 0.95}
]"#;

const PAN_DUMP: &str = r#"[
    {"text": "INCOME TAX DEPARTMENT", "confidence": 0.96},
    {"text": "GOVT. OF INDIA", "confidence": 0.94},
    {"text": "RAHUL SHARMA", "confidence": 0.92},
    {"text": "SURESH SHARMA", "confidence": 0.9},
    {"text": "15/08/1985", "confidence": 0.89},
    {"text": "ABCDE12O4F", "confidence": 0.81}
]"#;

const UNKNOWN_DUMP: &str = r#"[
    {"text": "Random receipt text", "confidence": 0.9},
    {"text": "Total: 500", "confidence": 0.9}
]"#;

fn idocr(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("idocr").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path());
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn checkerboard(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    GrayImage::from_fn(64, 64, |x, y| {
        if (x + y) % 2 == 0 { Luma([0]) } else { Luma([255]) }
    })
    .save(&path)
    .unwrap();
    path
}

fn flat(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    GrayImage::from_pixel(64, 64, Luma([180])).save(&path).unwrap();
    path
}

#[test]
fn process_aadhaar_dump() {
    let dir = TempDir::new().unwrap();
    let dump = write(dir.path(), "card.json", AADHAAR_DUMP);

    idocr(&dir)
        .arg("process")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""aadhaar_number": "1234 5678 9012""#))
        .stdout(predicate::str::contains(r#""name": "RAM KUMAR""#))
        .stdout(predicate::str::contains(r#""dob": "01-01-1990""#))
        .stdout(predicate::str::contains(r#""gender": "Male""#));
}

#[test]
fn process_pan_dump_corrects_number() {
    let dir = TempDir::new().unwrap();
    let dump = write(dir.path(), "pan.json", PAN_DUMP);

    idocr(&dir)
        .arg("process")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""document_type": "PAN""#))
        .stdout(predicate::str::contains(r#""pan_number": "ABCDE1204F""#))
        .stdout(predicate::str::contains(r#""fathers_name": "SURESH SHARMA""#));
}

#[test]
fn process_unknown_dump_fails_with_error_body() {
    let dir = TempDir::new().unwrap();
    let dump = write(dir.path(), "receipt.json", UNKNOWN_DUMP);

    idocr(&dir)
        .arg("process")
        .arg(&dump)
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""error": "No Aadhaar or PAN detected""#));
}

#[test]
fn process_csv_output_to_file() {
    let dir = TempDir::new().unwrap();
    let dump = write(dir.path(), "card.json", AADHAAR_DUMP);
    let out = dir.path().join("card.csv");

    idocr(&dir)
        .args(["process", "-f", "csv", "-o"])
        .arg(&out)
        .arg(&dump)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert_eq!(
        csv,
        "aadhaar_number,name,dob,gender\n1234 5678 9012,RAM KUMAR,01-01-1990,Male\n"
    );
}

#[test]
fn process_with_sharp_image() {
    let dir = TempDir::new().unwrap();
    let dump = write(dir.path(), "card.json", AADHAAR_DUMP);
    let image = checkerboard(dir.path(), "card.png");

    idocr(&dir)
        .arg("process")
        .arg(&dump)
        .arg("--image")
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("RAM KUMAR"));
}

#[test]
fn process_with_blurry_image_is_rejected() {
    let dir = TempDir::new().unwrap();
    let dump = write(dir.path(), "card.json", AADHAAR_DUMP);
    let image = flat(dir.path(), "card.png");

    idocr(&dir)
        .arg("process")
        .arg(&dump)
        .arg("--image")
        .arg(&image)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Image is too blurry for OCR processing."));
}

#[test]
fn process_no_quality_skips_gate() {
    let dir = TempDir::new().unwrap();
    let dump = write(dir.path(), "card.json", AADHAAR_DUMP);
    let image = flat(dir.path(), "card.png");

    idocr(&dir)
        .arg("process")
        .arg(&dump)
        .arg("--image")
        .arg(&image)
        .arg("--no-quality")
        .assert()
        .success()
        .stdout(predicate::str::contains("1234 5678 9012"));
}

#[test]
fn process_rejects_unsupported_image() {
    let dir = TempDir::new().unwrap();
    let dump = write(dir.path(), "card.json", AADHAAR_DUMP);
    let image = write(dir.path(), "card.gif", "GIF89a");

    idocr(&dir)
        .arg("process")
        .arg(&dump)
        .arg("--image")
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file format: gif"));
}

#[test]
fn process_missing_input() {
    let dir = TempDir::new().unwrap();

    idocr(&dir)
        .args(["process", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    write(&input, "aadhaar.json", AADHAAR_DUMP);
    write(&input, "pan.json", PAN_DUMP);
    write(&input, "receipt.json", UNKNOWN_DUMP);
    write(&input, "broken.json", "not json");
    let out = dir.path().join("out");

    idocr(&dir)
        .arg("batch")
        .arg(format!("{}/*.json", input.display()))
        .arg("-o")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 4 files"));

    let aadhaar = fs::read_to_string(out.join("aadhaar.json")).unwrap();
    assert!(aadhaar.contains("RAM KUMAR"));
    assert!(out.join("receipt.json").exists());
    assert!(!out.join("broken.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,document_type,number,name,dob,processing_time_ms,error\n"));
    assert!(summary.contains("pan.json,success,pan,ABCDE1204F,RAHUL SHARMA,15/08/1985,"));
    assert!(summary.contains("receipt.json,rejected,unknown,"));
    assert!(summary.contains("broken.json,error,"));
}

#[test]
fn batch_stops_on_error_by_default() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.json", "not json");

    idocr(&dir)
        .arg("batch")
        .arg(format!("{}/*.json", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn batch_gates_on_sibling_image() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "card.json", AADHAAR_DUMP);
    flat(dir.path(), "card.png");
    let out = dir.path().join("out");

    idocr(&dir)
        .arg("batch")
        .arg(format!("{}/*.json", dir.path().display()))
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let card = fs::read_to_string(out.join("card.json")).unwrap();
    assert!(card.contains("Image is too blurry for OCR processing."));
}

#[test]
fn batch_without_matches() {
    let dir = TempDir::new().unwrap();

    idocr(&dir)
        .arg("batch")
        .arg(format!("{}/*.json", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("idocr.json");

    idocr(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    idocr(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "quality.min_contrast"])
        .assert()
        .success()
        .stdout(predicate::str::diff("40\n"));

    idocr(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.auto_correct", "false"])
        .assert()
        .success();

    idocr(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.auto_correct"])
        .assert()
        .success()
        .stdout(predicate::str::diff("false\n"));

    idocr(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.unknown_key", "1"])
        .assert()
        .failure();
}

#[test]
fn config_disables_correction_for_process() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "idocr.json", r#"{"extraction": {"auto_correct": false}}"#);
    let dump = write(dir.path(), "pan.json", PAN_DUMP);

    idocr(&dir)
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&dump)
        .assert()
        .failure()
        .stdout(predicate::str::contains("No Aadhaar or PAN detected"));
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "idocr.json", "{}");

    idocr(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
