use assert_cmd::Command;
use regex::Regex;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};
use tempfile::TempDir;

#[derive(Debug)]
pub struct CompareRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

impl CompareRun {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Stderr lines that are not tracing output.
    pub fn error_lines(&self) -> Vec<&str> {
        let log_line = Regex::new(r"^\S+\s+(TRACE|DEBUG|INFO|WARN|ERROR)\s").expect("regex");
        self.stderr
            .lines()
            .filter(|line| !line.trim().is_empty() && !log_line.is_match(line))
            .collect()
    }

    /// The structured error printed on stderr when stdout is not a terminal.
    ///
    /// It is the last line written before the process exits.
    pub fn error_json(&self) -> Value {
        let line = self
            .error_lines()
            .last()
            .copied()
            .unwrap_or_else(|| panic!("no error on stderr:\n{}", self.stderr));
        serde_json::from_str(line)
            .unwrap_or_else(|err| panic!("stderr is not a JSON error ({err}):\n{}", self.stderr))
    }

    pub fn error_code(&self) -> String {
        self.error_json()["error"]["code"]
            .as_str()
            .expect("error code")
            .to_string()
    }
}

pub struct Workspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub log_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let log_dir = root.join("logs");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            temp_dir,
            root,
            log_dir,
        }
    }

    /// Write a file relative to the workspace root.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("write workspace file");
        path
    }

    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        self.write(name, &serde_json::to_string_pretty(value).expect("serialize"))
    }
}

pub fn run_compare<I, S>(workspace: &Workspace, args: I, label: &str) -> CompareRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_compare_with_stdin(workspace, args, None, label)
}

pub fn run_compare_with_stdin<I, S>(
    workspace: &Workspace,
    args: I,
    stdin: Option<&str>,
    label: &str,
) -> CompareRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bench-compare"));
    cmd.current_dir(&workspace.root);
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "bench_compare=debug");
    cmd.env("RUST_BACKTRACE", "1");
    cmd.env("HOME", &workspace.root);
    if let Some(input) = stdin {
        cmd.write_stdin(input);
    }

    let start = Instant::now();
    let output = cmd.output().expect("run bench-compare");
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let log_body = format!(
        "label: {label}\nstarted: {:?}\nduration: {:?}\nstatus: {}\nargs: {:?}\ncwd: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        SystemTime::now(),
        duration,
        output.status,
        cmd.get_args().collect::<Vec<_>>(),
        workspace.root.display(),
        stdout,
        stderr
    );
    fs::write(&log_path, log_body).expect("write log");

    CompareRun {
        stdout,
        stderr,
        status: output.status,
        duration,
        log_path,
    }
}
