//! Integration test: `--dump` prints the laid-out frame as JSON

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Config that keeps the log file out of the user's state directory.
fn isolated_config(name: &str) -> PathBuf {
    let log = std::env::temp_dir().join(format!("{name}.log"));
    write_temp(
        &format!("{name}.toml"),
        &format!("gap = 10.0\npadding = 0.0\nestimate_height = 100.0\noverscan = 0.0\nlog_file_path = {:?}\n", log),
    )
}

fn run(args: &[&str], config: &PathBuf, stdin: Option<&str>) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_waterfall"));
    command
        .args(args)
        .env("WATERFALL_CONFIG", config)
        .env_remove("WATERFALL_COLUMNS");
    match stdin {
        Some(input) => {
            use std::io::Write;
            use std::process::Stdio;
            let mut child = command
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .expect("Failed to spawn binary");
            child
                .stdin
                .take()
                .expect("stdin is piped")
                .write_all(input.as_bytes())
                .expect("Failed to write stdin");
            child.wait_with_output().expect("Failed to wait for binary")
        }
        None => command.output().expect("Failed to execute binary"),
    }
}

#[test]
fn dump_lays_out_file_items_with_height_hints() {
    let config = isolated_config("waterfall_dump_file");
    let input = write_temp(
        "waterfall_dump_items.jsonl",
        concat!(
            "{\"key\": \"a\", \"text\": \"x\", \"height\": 100}\n",
            "{\"key\": \"b\", \"text\": \"x\", \"height\": 150}\n",
            "{\"key\": \"c\", \"text\": \"x\", \"height\": 80}\n",
            "{\"key\": \"d\", \"text\": \"x\", \"height\": 120}\n",
            "{\"key\": \"e\", \"text\": \"x\", \"height\": 90}\n",
        ),
    );

    let output = run(
        &[
            input.to_str().unwrap(),
            "--dump",
            "--columns",
            "2",
            "--width",
            "210",
            "--height",
            "1000",
        ],
        &config,
        None,
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let dump: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dump["columns"], 2);
    assert_eq!(dump["total_height"], 300.0);
    assert_eq!(dump["visible"].as_array().unwrap().len(), 5);
    assert_eq!(dump["visible"][3]["key"], "d");
    assert_eq!(dump["visible"][3]["x"], 110.0);
}

#[test]
fn dump_reads_stdin_when_no_file_is_given() {
    let config = isolated_config("waterfall_dump_stdin");

    let output = run(
        &["--dump", "--columns", "1", "--width", "50", "--height", "500"],
        &config,
        Some("{\"text\": \"one\"}\n\nbroken\n{\"text\": \"two\", \"height\": 5}\n"),
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let dump: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let positions = dump["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 2);
    assert_eq!(dump["visible"][0]["key"], "1");
    assert_eq!(dump["visible"][1]["key"], "4");
    assert_eq!(dump["visible"][1]["y"], 110.0);
    assert_eq!(dump["visible"][1]["is_estimate"], false);
}

#[test]
fn missing_file_fails() {
    let config = isolated_config("waterfall_dump_missing");
    let output = run(&["/nonexistent/items.jsonl", "--dump"], &config, None);
    assert!(!output.status.success());
}
