use serde_json::{Value, json};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "collate-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write_json(&self, name: &str, value: &Value) -> String {
        let path = self.path.join(name);
        fs::write(&path, value.to_string()).expect("fixture should be written");
        path.display().to_string()
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_collate<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_collate");
    Command::new(bin)
        .args(args)
        .env_remove("COLLATE_CONFIG")
        .env_remove("COLLATE_LOG")
        .output()
        .expect("collate command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn people() -> Value {
    json!({
        "$collection": "typed",
        "type": "Person",
        "elements": [
            {"$class": "Person", "firstName": "John", "lastName": "Doe", "age": 32},
            {"$class": "Person", "firstName": "Jane", "lastName": "Roe", "age": 30}
        ]
    })
}

#[test]
fn count_prints_the_element_count() {
    let tmp = TempDirGuard::new("count");
    let input = tmp.write_json("people.json", &people());

    let output = run_collate(["count", input.as_str()]);
    assert_success(&output);
    assert_eq!(stdout_text(&output).trim(), "2");
}

#[test]
fn iterate_prints_key_and_json_per_line() {
    let tmp = TempDirGuard::new("iterate");
    let input = tmp.write_json(
        "tags.json",
        &json!({"$collection": "keyed", "entries": {"a": "x", "b": [1, 2]}}),
    );

    let output = run_collate(["iterate", input.as_str()]);
    assert_success(&output);
    assert_eq!(stdout_text(&output), "a\t\"x\"\nb\t[1,2]\n");
}

#[test]
fn filter_keeps_matching_elements() {
    let tmp = TempDirGuard::new("filter");
    let input = tmp.write_json("people.json", &people());

    let output = run_collate([
        "filter",
        input.as_str(),
        "--field",
        "lastName",
        "--equals",
        "\"Roe\"",
    ]);
    assert_success(&output);
    let filtered = parse_json_stdout(&output);
    assert_eq!(filtered["type"], "Person");
    assert_eq!(filtered["elements"].as_array().map(Vec::len), Some(1));
    assert_eq!(filtered["elements"][0]["firstName"], "Jane");
}

#[test]
fn flatten_reads_one_field() {
    let tmp = TempDirGuard::new("flatten");
    let input = tmp.write_json("people.json", &people());

    let output = run_collate(["flatten", input.as_str(), "--field", "age"]);
    assert_success(&output);
    assert_eq!(
        parse_json_stdout(&output),
        json!({"$collection": "typed", "type": "integer", "elements": [32, 30]})
    );
}

#[test]
fn merge_concatenates_homogeneous_inputs() {
    let tmp = TempDirGuard::new("merge");
    let first = tmp.write_json(
        "first.json",
        &json!({"$collection": "keyed", "entries": ["item1", "item2"]}),
    );
    let second = tmp.write_json(
        "second.json",
        &json!({"$collection": "keyed", "entries": ["item3"]}),
    );

    let output = run_collate(["merge", first.as_str(), second.as_str()]);
    assert_success(&output);
    assert_eq!(
        parse_json_stdout(&output),
        json!({"$collection": "keyed", "entries": ["item1", "item2", "item3"]})
    );
}

#[test]
fn merge_falls_back_for_mixed_inputs() {
    let tmp = TempDirGuard::new("merge-mixed");
    let first = tmp.write_json(
        "first.json",
        &json!({"$collection": "keyed", "entries": ["text1", "text2"]}),
    );
    let second = tmp.write_json(
        "second.json",
        &json!({"$collection": "keyed", "entries": [12, 67]}),
    );

    let output = run_collate(["merge", first.as_str(), second.as_str()]);
    assert_success(&output);
    let merged = parse_json_stdout(&output);
    assert_eq!(merged.as_array().map(Vec::len), Some(2));
}

#[test]
fn unsupported_input_reports_the_guard_error() {
    let tmp = TempDirGuard::new("unsupported");
    let input = tmp.write_json("plain.json", &json!([1, 2, 3]));

    let output = run_collate(["count", input.as_str()]);
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_text(&output);
    assert!(stderr.starts_with("error: "), "stderr:\n{stderr}");
    assert!(stderr.contains("invoke `supports` first"), "stderr:\n{stderr}");
}

#[test]
fn config_round_trips_and_is_honoured() {
    let tmp = TempDirGuard::new("config");

    let output = run_collate(["config"]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("merge-chain"));

    let config = tmp.path().join("collate.toml");
    fs::write(&config, "sequence-handlers = [\"typed\"]\n").expect("config should be written");
    let input = tmp.write_json(
        "tags.json",
        &json!({"$collection": "keyed", "entries": ["a"]}),
    );

    let output = run_collate([
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("count"),
        OsStr::new(input.as_str()),
    ]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("TypedSequenceHandler"));
}

#[test]
fn invalid_config_is_reported() {
    let tmp = TempDirGuard::new("bad-config");
    let config = tmp.path().join("collate.toml");
    fs::write(&config, "merge-chain = [\"keyed\", \"keyed\"]\n").expect("config should be written");

    let output = run_collate([OsStr::new("--config"), config.as_os_str(), OsStr::new("config")]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("more than once"));
}
