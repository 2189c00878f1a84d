use std::fs;

use assert_cmd::Command;

mod common;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.arg("-V");
    cmd.assert().success().stdout("voc2yolo 0.1.0\n");
}

#[test]
fn convert_with_inline_classes_succeeds() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let input = temp.path().join("xml");
    let output = temp.path().join("labels");
    common::write_voc(
        &input,
        "street.xml",
        &common::voc_xml(
            "street.jpg",
            200,
            100,
            &[
                ("car", 50, 20, 150, 80),
                ("bicycle", 0, 0, 10, 10),
                ("human", 0, 0, 200, 100),
            ],
        ),
    );

    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.env_remove("VOC2YOLO_CLASSES")
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--class", "car=0", "-c", "human=1"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("1 file(s): 1 converted, 0 failed"))
        .stdout(predicates::str::contains("unmapped classes: bicycle (1)"));

    assert_eq!(
        fs::read_to_string(output.join("street.txt")).expect("read label"),
        common::STREET_LABELS
    );
}

#[test]
fn convert_with_class_file_and_json_report() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let input = temp.path().join("xml");
    let output = temp.path().join("labels");
    let classes = temp.path().join("data.yaml");
    fs::write(&classes, "names:\n  0: car\n  1: human\n").expect("write class map");
    common::write_voc(
        &input,
        "a.xml",
        &common::voc_xml("a.jpg", 100, 100, &[("car", 0, 0, 50, 50)]),
    );

    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.env_remove("VOC2YOLO_CLASSES")
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .arg("--classes")
        .arg(&classes)
        .args(["--report", "json", "--write-data-yaml"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"converted_files\": 1"))
        .stdout(predicates::str::contains("\"detections\": 1"));

    assert_eq!(
        fs::read_to_string(output.join("a.txt")).expect("read label"),
        "0 0.250000 0.250000 0.500000 0.500000\n"
    );
    assert!(output.join("data.yaml").is_file());
}

#[test]
fn convert_reports_zero_dimension_and_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let input = temp.path().join("xml");
    let output = temp.path().join("labels");
    common::create_sample_voc_dir(&input);

    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.env_remove("VOC2YOLO_CLASSES")
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--class", "car=0", "--class", "human=1"]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("3 file(s): 2 converted, 1 failed"))
        .stdout(predicates::str::contains("zero dimension"))
        .stderr(predicates::str::contains("1 failed file(s)"));

    assert!(output.join("street.txt").is_file());
    assert!(!output.join("broken.txt").exists());
}

#[test]
fn convert_requires_a_class_mapping() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.env_remove("VOC2YOLO_CLASSES")
        .arg("convert")
        .arg(temp.path())
        .arg(temp.path().join("out"));
    cmd.assert().failure();
}

#[test]
fn convert_rejects_bad_class_pair() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.env_remove("VOC2YOLO_CLASSES")
        .arg("convert")
        .arg(temp.path())
        .arg(temp.path().join("out"))
        .args(["--class", "car"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("expected NAME=ID"));
}

#[test]
fn convert_unsupported_report_format_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.env_remove("VOC2YOLO_CLASSES")
        .arg("convert")
        .arg(temp.path())
        .arg(temp.path().join("out"))
        .args(["--class", "car=0", "--report", "xml"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported format"));
}

#[test]
fn convert_nonexistent_input_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("voc2yolo").unwrap();
    cmd.env_remove("VOC2YOLO_CLASSES")
        .arg("convert")
        .arg(temp.path().join("missing"))
        .arg(temp.path().join("out"))
        .args(["--class", "car=0"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Invalid VOC input"));
}
