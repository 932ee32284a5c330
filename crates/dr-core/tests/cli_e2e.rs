//! End-to-end tests for the dynreport binary.
//!
//! Every command runs with an empty `DYNREPORT_CONFIG_DIR` so a config file
//! on the host never leaks into the results.

use assert_cmd::Command;
use predicates::prelude::*;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a Command for the dynreport binary with an isolated config.
fn dynreport(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dynreport").expect("dynreport binary should exist");
    cmd.env("DYNREPORT_CONFIG_DIR", config_dir)
        .env_remove("DYNREPORT_CONFIG")
        .env_remove("RUST_LOG")
        .env_remove("DR_LOG")
        .env_remove("DR_LOG_FORMAT");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ============================================================================
// Export
// ============================================================================

mod export {
    use super::*;

    #[test]
    fn sales_template_to_dir() {
        let tmp = TempDir::new().unwrap();
        let expected = tmp.path().join("Q4_2024_Sales_Performance_Report.html");

        dynreport(tmp.path())
            .args(["export", "--template", "sales", "--out-dir"])
            .arg(tmp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Q4_2024_Sales_Performance_Report.html"));

        let html = fs::read_to_string(expected).unwrap();
        assert!(html.contains("Q4 2024 Sales Performance Report"));
        assert_eq!(html.matches(r#"id="quarterly-sales""#).count(), 1);
        assert_eq!(html.matches(r#"Plotly.newPlot("quarterly-sales""#).count(), 1);
        assert_eq!(html.matches("<tr>").count(), 4);
        assert!(html.contains("<td>4,850,000</td>"));
        assert!(html.contains("<td>18.4%</td>"));
        assert!(html.contains("<td>12/31/2024</td>"));
    }

    #[test]
    fn explicit_output_with_flags() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("report.html");

        dynreport(tmp.path())
            .args(["export", "-t", "sales", "--raw-cells", "--theme", "dark", "-o"])
            .arg(&out)
            .assert()
            .success();

        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains(r#"<html lang="en" class="dark">"#));
        assert!(html.contains("<td>4850000</td>"));
        assert!(html.contains("<td>2024-12-31</td>"));
    }

    #[test]
    fn seeded_randomize_is_reproducible() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("a.html");
        let second = tmp.path().join("b.html");

        for out in [&first, &second] {
            dynreport(tmp.path())
                .args(["export", "-t", "stunting", "--randomize", "--seed", "42", "-o"])
                .arg(out)
                .assert()
                .success();
        }
        let a = fs::read_to_string(&first).unwrap();
        assert_eq!(a, fs::read_to_string(&second).unwrap());
        assert!(!a.contains("47.0,46.2"));
    }

    #[test]
    fn document_file_round_trip() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("doc.json");
        fs::write(
            &input,
            r#"{
                "title": "Stunting Trends: 2015-2019",
                "sections": [
                    {"id": "b", "title": "Second", "content": "<p>two</p>", "order": 2},
                    {"id": "a", "title": "First", "content": "<p>one</p>", "order": 1}
                ]
            }"#,
        )
        .unwrap();

        dynreport(tmp.path())
            .args(["export", "--input"])
            .arg(&input)
            .arg("--out-dir")
            .arg(tmp.path())
            .assert()
            .success();

        let html = fs::read_to_string(tmp.path().join("Stunting_Trends__2015_2019.html")).unwrap();
        let ids: Vec<&str> = Regex::new(r#"class="report-section" id="([a-z]+)""#)
            .unwrap()
            .captures_iter(&html)
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn missing_input_is_io_error() {
        let tmp = TempDir::new().unwrap();
        dynreport(tmp.path())
            .args(["export", "--input", "/nonexistent/doc.json"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn malformed_input_is_args_error() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("bad.json");
        fs::write(&input, "{ not json").unwrap();
        dynreport(tmp.path())
            .args(["export", "--input"])
            .arg(&input)
            .assert()
            .code(10);
    }

    #[test]
    fn unknown_template_is_args_error() {
        let tmp = TempDir::new().unwrap();
        dynreport(tmp.path())
            .args(["export", "--template", "weather"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("unknown template 'weather'"));
    }

    #[test]
    fn embed_without_http_source_fails_cleanly() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("offline.html");
        let assert = dynreport(tmp.path())
            .args(["export", "-t", "sales", "--embed-assets", "-o"])
            .arg(&out)
            .assert();
        if cfg!(feature = "embed") {
            return;
        }
        assert.code(11).stderr(predicate::str::contains("embed"));
        assert!(!out.exists());
    }
}

// ============================================================================
// Config resolution
// ============================================================================

mod config {
    use super::*;

    #[test]
    fn config_dir_file_applies() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("dynreport.toml"),
            "[export]\ntheme = \"dark\"\nformat_cells = false\n",
        )
        .unwrap();
        let out = tmp.path().join("r.html");

        dynreport(tmp.path())
            .args(["export", "-t", "sales", "-o"])
            .arg(&out)
            .assert()
            .success();

        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains(r#"class="dark""#));
        assert!(html.contains("<td>4850000</td>"));
    }

    #[test]
    fn missing_explicit_config_is_config_error() {
        let tmp = TempDir::new().unwrap();
        dynreport(tmp.path())
            .args(["--config", "/nonexistent/dynreport.toml", "templates"])
            .assert()
            .code(12)
            .stderr(predicate::str::contains("config file not found"));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        fs::write(&path, "[export\n").unwrap();
        dynreport(tmp.path())
            .arg("--config")
            .arg(&path)
            .arg("templates")
            .assert()
            .code(12);
    }
}

// ============================================================================
// Other commands
// ============================================================================

mod commands {
    use super::*;

    #[test]
    fn templates_lists_all() {
        let tmp = TempDir::new().unwrap();
        let output = dynreport(tmp.path()).arg("templates").output().unwrap();
        assert!(output.status.success());
        let ids: Vec<String> = stdout_json(&output)
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["stunting", "sales", "education"]);
    }

    #[test]
    fn validate_clean_template() {
        let tmp = TempDir::new().unwrap();
        let output = dynreport(tmp.path())
            .args(["validate", "--template", "stunting"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(stdout_json(&output)["issues"], serde_json::json!([]));
    }

    #[test]
    fn validate_reports_duplicates() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("dup.json");
        fs::write(
            &input,
            r#"{"title": "Dup", "sections": [
                {"id": "s", "title": "A", "content": "", "order": 1},
                {"id": "s", "title": "B", "content": "", "order": 2}
            ]}"#,
        )
        .unwrap();

        let output = dynreport(tmp.path())
            .args(["validate", "--input"])
            .arg(&input)
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(10));
        let issues = stdout_json(&output)["issues"].as_array().unwrap().clone();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0]["code"], "duplicate_section_id");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("document validation failed with 1 error(s)"));
    }

    #[test]
    fn table_sorts_and_formats() {
        let tmp = TempDir::new().unwrap();
        let output = dynreport(tmp.path())
            .args([
                "table",
                "-t",
                "stunting",
                "--table",
                "stunting-summary",
                "--sort",
                "rate",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["state"]["sort_column"], "rate");
        assert_eq!(json["rows"][0][0], "Manipur");
        assert_eq!(json["rows"][0][1], "23.1");
        assert_eq!(json["columns"][1], "Stunting Rate (%)");
    }

    #[test]
    fn derived_table_pages() {
        let tmp = TempDir::new().unwrap();
        let output = dynreport(tmp.path())
            .args([
                "table",
                "-t",
                "stunting",
                "--table",
                "stunting-trends-line-table",
                "--page",
                "9",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["state"]["total_pages"], 2);
        assert_eq!(json["state"]["current_page"], 2);
        assert_eq!(json["rows"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn huge_page_number_clamps_immediately() {
        let tmp = TempDir::new().unwrap();
        let output = dynreport(tmp.path())
            .args([
                "table",
                "-t",
                "stunting",
                "--table",
                "stunting-trends-line-table",
                "--page",
                "18446744073709551615",
            ])
            .timeout(std::time::Duration::from_secs(30))
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(stdout_json(&output)["state"]["current_page"], 2);
    }

    #[test]
    fn unknown_table_is_args_error() {
        let tmp = TempDir::new().unwrap();
        dynreport(tmp.path())
            .args(["table", "-t", "sales", "--table", "missing"])
            .assert()
            .code(10);
    }

    #[test]
    fn schema_describes_document() {
        let tmp = TempDir::new().unwrap();
        let output = dynreport(tmp.path()).arg("schema").output().unwrap();
        assert!(output.status.success());
        let schema = stdout_json(&output);
        assert!(schema["properties"]["sections"].is_object());
        assert!(schema["properties"]["title"].is_object());
    }

    #[test]
    fn source_is_required() {
        let tmp = TempDir::new().unwrap();
        dynreport(tmp.path())
            .arg("export")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn jsonl_logs_go_to_stderr() {
        let tmp = TempDir::new().unwrap();
        let output = dynreport(tmp.path())
            .args(["--log-format", "jsonl", "-v", "templates"])
            .output()
            .unwrap();
        assert!(output.status.success());
        stdout_json(&output);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            serde_json::from_str::<Value>(line).expect("stderr line should be JSON");
        }
    }
}
