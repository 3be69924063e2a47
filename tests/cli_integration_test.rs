use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn bucketmap(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bucketmap"))
        .args(args)
        .current_dir(dir)
        .env_remove("BUCKETMAP_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run bucketmap")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "bucketmap failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn write_entities(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("countries.json");
    std::fs::write(
        &path,
        json!({
            "US": { "access_rank": 15, "gdp": 20000 },
            "CA": { "access_rank": 25, "gdp": 1800 },
            "FR": { "access_rank": null, "gdp": "" },
        })
        .to_string(),
    )
    .unwrap();
    path
}

#[test]
fn test_normalize_command_writes_buckets() {
    let temp = TempDir::new().unwrap();
    write_entities(temp.path());

    let output = bucketmap(
        temp.path(),
        &["normalize", "countries.json", "--fields", "access_rank,gdp"],
    );
    let normalized = stdout_json(&output);

    assert_eq!(normalized["US"], json!({ "access_rank": 1, "gdp": 6, "isoCode": "US" }));
    assert_eq!(normalized["CA"], json!({ "access_rank": 2, "gdp": 3, "isoCode": "CA" }));
    assert_eq!(normalized["FR"], json!({ "access_rank": null, "gdp": null, "isoCode": "FR" }));
}

#[test]
fn test_normalize_command_uses_config_and_output_file() {
    let temp = TempDir::new().unwrap();
    write_entities(temp.path());
    std::fs::write(
        temp.path().join("custom.toml"),
        "[normalization]\nid_field = \"code\"\nfields = [\"gdp\"]\n",
    )
    .unwrap();

    let output = bucketmap(
        temp.path(),
        &[
            "normalize",
            "countries.json",
            "--config",
            "custom.toml",
            "--output",
            "out.json",
            "--sequential",
        ],
    );
    assert!(output.status.success());

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("out.json")).unwrap())
            .unwrap();
    assert_eq!(written["US"]["code"], json!("US"));
    assert_eq!(written["US"]["gdp"], json!(6));
    assert_eq!(written["US"]["access_rank"], json!(15));
}

#[test]
fn test_normalize_without_fields_fails() {
    let temp = TempDir::new().unwrap();
    write_entities(temp.path());

    let output = bucketmap(temp.path(), &["normalize", "countries.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No fields"));
}

#[test]
fn test_stats_command() {
    let temp = TempDir::new().unwrap();
    write_entities(temp.path());

    let stats = stdout_json(&bucketmap(
        temp.path(),
        &["stats", "countries.json", "-f", "gdp"],
    ));
    assert_eq!(stats, json!({ "gdp": { "min": 1800.0, "max": 20000.0, "count": 2 } }));
}

#[test]
fn test_stats_command_marks_fields_without_data() {
    let temp = TempDir::new().unwrap();
    write_entities(temp.path());

    let stats = stdout_json(&bucketmap(
        temp.path(),
        &["stats", "countries.json", "-f", "area"],
    ));
    assert_eq!(
        stats,
        json!({ "area": { "min": "Infinity", "max": "-Infinity", "count": 0 } })
    );
}

#[test]
fn test_classify_command() {
    let temp = TempDir::new().unwrap();
    let results = stdout_json(&bucketmap(
        temp.path(),
        &["classify", "--table", "restriction", "40", "-5"],
    ));

    assert_eq!(
        results,
        json!([
            { "rank": 40.0, "bucket": 3, "label": "Considerable" },
            { "rank": -5.0, "bucket": null },
        ])
    );
}

#[test]
fn test_color_command() {
    let temp = TempDir::new().unwrap();
    let results = stdout_json(&bucketmap(temp.path(), &["color", "rgb(255, 0, 0)", "RED"]));

    assert_eq!(results[0]["hex"], json!("#ff0000"));
    assert_eq!(results[1]["hex"], json!("#ff0000"));
    assert_eq!(results[1]["valid"], json!(true));
}

#[test]
fn test_init_command_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();

    assert!(bucketmap(temp.path(), &["init"]).status.success());
    assert!(temp.path().join(".bucketmap.toml").exists());
    assert!(!bucketmap(temp.path(), &["init"]).status.success());
    assert!(bucketmap(temp.path(), &["init", "--force"]).status.success());
}
