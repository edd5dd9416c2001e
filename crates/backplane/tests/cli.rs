mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn backplane() -> Command {
    Command::cargo_bin("backplane").unwrap()
}

#[test]
fn default_config_is_valid_json() {
    let output = backplane().arg("default-config").output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["grid"]["cols"], 32);
    assert_eq!(json["grid"]["rows"], 64);
    assert_eq!(json["artifacts"]["prefix"], "result");
    assert_eq!(json["classifier"]["tie_break"], "lowest_bin");
}

#[test]
fn read_prints_matrix_and_writes_rectified_image() {
    let dir = tempfile::tempdir().unwrap();
    let scene = dir.path().join("scene.png");
    common::rotated_quadrant_scene().save(&scene).unwrap();
    let out_dir = dir.path().join("out");
    let report = dir.path().join("report.json");

    backplane()
        .arg("read")
        .arg(&scene)
        .args(["--cols", "2", "--rows", "2"])
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{}\n15\n30\n\n",
            scene.display()
        )));

    assert!(out_dir.join("result-001.jpg").exists());
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["images"][0]["status"], "ok");
    assert_eq!(report["images"][0]["matrix"][1], "30");
}

#[test]
fn failing_image_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let blank = dir.path().join("blank.png");
    image::RgbImage::from_pixel(64, 64, image::Rgb(common::BACKGROUND))
        .save(&blank)
        .unwrap();
    let plate = dir.path().join("plate.png");
    common::pattern_plate(4, 2, 12, 2, (10, 10))
        .save(&plate)
        .unwrap();
    let report = dir.path().join("report.json");

    backplane()
        .arg("read")
        .arg(&blank)
        .arg(&plate)
        .args(["--cols", "4", "--rows", "2", "--no-rectified"])
        .arg("--report")
        .arg(&report)
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("0531\n3164\n"))
        .stderr(predicate::str::contains("no_backplane_detected"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["images"][0]["status"], "failed");
    assert_eq!(report["images"][0]["error_kind"], "no_backplane_detected");
    assert_eq!(report["images"][1]["index"], 2);
    assert!(!dir.path().join("result-002.jpg").exists());
}

#[test]
fn rectify_names_artifacts_by_input_position() {
    let dir = tempfile::tempdir().unwrap();
    let plate = dir.path().join("plate.png");
    common::pattern_plate(4, 2, 12, 2, (10, 10))
        .save(&plate)
        .unwrap();

    backplane()
        .arg("rectify")
        .arg(&plate)
        .arg(&plate)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("result-001.jpg").exists());
    assert!(dir.path().join("result-002.jpg").exists());
}

#[test]
fn scan_reads_rectified_input_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let img = dir.path().join("rect.png");
    common::rectified_pattern(8, 4, 5).save(&img).unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "grid": { "cols": 8, "rows": 4 } }"#).unwrap();

    backplane()
        .arg("scan")
        .arg(&img)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("05316420\n31642053\n"));
}

#[test]
fn invalid_config_fails_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let img = dir.path().join("rect.png");
    common::rectified_pattern(2, 2, 4).save(&img).unwrap();

    backplane()
        .arg("scan")
        .arg(&img)
        .args(["--cols", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cols"));
}
