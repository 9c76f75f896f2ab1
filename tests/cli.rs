use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn slidemark_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("slidemark").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("XDG_DATA_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

const LINE_AND_ERASER: &str = r##"[
  {
    "id": "A",
    "status": "DRAW_END",
    "annotationType": "line",
    "annotationInfo": { "points": [10, 10, 90, 10], "thickness": 1, "color": 255 }
  },
  {
    "id": "B",
    "status": "DRAW_END",
    "annotationType": "elementEraser",
    "annotationInfo": { "points": [50, 10] }
  },
  {
    "id": "C",
    "status": "DRAW_END",
    "annotationType": "rectangle",
    "annotationInfo": { "points": [20, 20, 60, 60], "thickness": 1, "color": "#ff0000" }
  }
]"##;

fn write_input(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("annotations.json");
    std::fs::write(&path, LINE_AND_ERASER).unwrap();
    path
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    slidemark_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Whiteboard annotation renderer and eraser resolver",
        ));
}

#[test]
fn visibility_prints_json_vector() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    slidemark_cmd(&temp)
        .args(["visibility", "--width", "800", "--height", "600", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("[false,false,true]"));
}

#[test]
fn render_ops_skip_erased_shapes() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    slidemark_cmd(&temp)
        .args(["render", "--ops", "--width", "100", "--height", "100", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"op\": \"clear\""))
        .stdout(predicate::str::contains("#ff0000"))
        .stdout(predicate::str::contains("#0000ff").not());
}

#[test]
fn render_summary_counts_visible_annotations() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    slidemark_cmd(&temp)
        .args(["render", "--width", "100", "--height", "100", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 1 of 3 annotations"));
}

#[test]
fn custom_status_tags_come_from_config() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("pencil.json");
    std::fs::write(
        &input,
        r#"[{
          "id": "P",
          "status": "done",
          "annotationType": "pencil",
          "annotationInfo": { "points": [0, 0, 50, 50, 100, 0], "commands": [1, 3], "thickness": 1 }
        }]"#,
    )
    .unwrap();
    let config = temp.path().join("custom.toml");
    std::fs::write(
        &config,
        "[status]\nstart = \"begin\"\nupdate = \"move\"\nend = \"done\"\n",
    )
    .unwrap();

    slidemark_cmd(&temp)
        .args(["render", "--ops", "--width", "100", "--height", "100", "--config"])
        .arg(&config)
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("quadTo"));
}

#[test]
fn non_positive_size_is_rejected() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    slidemark_cmd(&temp)
        .args(["visibility", "--width", "0", "--height", "600", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width must be a positive number"));
}

#[test]
fn missing_input_file_fails() {
    let temp = TempDir::new().unwrap();
    slidemark_cmd(&temp)
        .args(["visibility", "--width", "10", "--height", "10", "--input"])
        .arg(temp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn missing_config_file_fails() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    slidemark_cmd(&temp)
        .args(["visibility", "--width", "10", "--height", "10", "--config"])
        .arg(temp.path().join("absent.toml"))
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[cfg(not(feature = "cairo"))]
#[test]
fn png_output_requires_cairo_feature() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    slidemark_cmd(&temp)
        .args(["render", "--width", "10", "--height", "10", "--output"])
        .arg(temp.path().join("out.png"))
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cairo"));
}

#[test]
fn visibility_reads_whiteboard_snapshot() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("snapshot.json");
    std::fs::write(
        &input,
        format!("{{\"whiteboard_id\": \"wb1\", \"annotations\": {LINE_AND_ERASER}}}"),
    )
    .unwrap();

    slidemark_cmd(&temp)
        .args(["visibility", "--width", "800", "--height", "600", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("[false,false,true]"));
}
