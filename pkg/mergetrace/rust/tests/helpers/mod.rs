// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Outcome of one `merge-trace` invocation.
pub struct MergeRun {
    pub status: ExitStatus,
    /// stdout and stderr, in that order. simple_logger splits levels across both.
    pub logs: String,
}

impl MergeRun {
    pub fn logged(&self, pattern: &str) -> bool {
        self.logs.contains(pattern)
    }
}

/// Run the built binary with the given arguments and no inherited merge-trace env.
pub fn run_merge(args: &[&std::ffi::OsStr]) -> MergeRun {
    run_merge_with_env(args, &[])
}

pub fn run_merge_with_env(args: &[&std::ffi::OsStr], env: &[(&str, &str)]) -> MergeRun {
    let bin = env!("CARGO_BIN_EXE_merge-trace");
    let mut cmd = Command::new(bin);
    cmd.args(args)
        .env_remove("DD_MERGE_TRACE_DEFAULT")
        .env_remove("DD_MERGE_TRACE_DELIMITER")
        .env_remove("DD_MERGE_TRACE_LOG_LEVEL");
    for (k, v) in env {
        cmd.env(k, v);
    }
    let out = cmd.output().expect("failed to run merge-trace");

    let mut logs = String::from_utf8_lossy(&out.stdout).into_owned();
    logs.push_str(&String::from_utf8_lossy(&out.stderr));
    for line in logs.lines() {
        eprintln!("[merge-trace] {line}");
    }
    MergeRun {
        status: out.status,
        logs,
    }
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    path
}

/// Merge `primary` and `secondary` given as file contents; returns the run and
/// the output file contents (empty if it was never written).
pub fn merge_files(
    dir: &Path,
    primary: &str,
    secondary: &str,
    extra: &[&str],
) -> (MergeRun, String) {
    let first = write_csv(dir, "first.csv", primary);
    let second = write_csv(dir, "second.csv", secondary);
    let output = dir.join("output.csv");

    let mut args: Vec<&std::ffi::OsStr> = extra.iter().map(std::ffi::OsStr::new).collect();
    args.push(first.as_os_str());
    args.push(second.as_os_str());
    args.push(output.as_os_str());

    let run = run_merge(&args);
    let contents = std::fs::read_to_string(&output).unwrap_or_default();
    (run, contents)
}
