//! Test helpers for tabsql integration tests
//!
//! This module provides helper functions and structs to simplify
//! writing end-to-end tests that run the tabsql binary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Represents a test case for tabsql
pub struct TabsqlTestCase {
    /// The SQL query to execute
    pub sql: String,
    /// Additional command line arguments, placed before the query
    pub args: Vec<String>,
    /// Input files to create in the working directory as (name, content)
    pub files: Vec<(String, String)>,
    /// Data piped to standard input
    pub stdin: Option<String>,
    /// Expected exact stdout (checked when set)
    pub expected_output: Option<String>,
    /// Expected strings in stdout
    pub expected_stdout: Vec<String>,
    /// Expected strings in stderr
    pub expected_stderr: Vec<String>,
    /// Whether the command is expected to succeed
    pub should_succeed: bool,
}

impl Default for TabsqlTestCase {
    fn default() -> Self {
        TabsqlTestCase {
            sql: String::new(),
            args: Vec::new(),
            files: Vec::new(),
            stdin: None,
            expected_output: None,
            expected_stdout: Vec::new(),
            expected_stderr: Vec::new(),
            should_succeed: true,
        }
    }
}

/// Run a test case in a fresh temporary working directory
pub fn run_test_case(test_case: TabsqlTestCase) -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    for (name, content) in &test_case.files {
        create_file(temp_dir.path(), name, content)?;
    }

    let mut cmd = Command::cargo_bin("tabsql")?;
    cmd.current_dir(temp_dir.path());
    for arg in &test_case.args {
        cmd.arg(arg);
    }
    cmd.arg(&test_case.sql);

    if let Some(input) = &test_case.stdin {
        cmd.write_stdin(input.as_bytes());
    }

    let mut assert = cmd.assert();

    if test_case.should_succeed {
        assert = assert.success();
    } else {
        assert = assert.failure();
    }

    if let Some(expected) = test_case.expected_output {
        assert = assert.stdout(expected);
    }

    for expected in test_case.expected_stdout {
        assert = assert.stdout(predicate::str::contains(expected));
    }

    for expected in test_case.expected_stderr {
        assert = assert.stderr(predicate::str::contains(expected));
    }

    Ok(())
}

/// Helper function to create a temp directory for tests, respecting CARGO_TARGET_TMPDIR if set
pub fn create_temp_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    if let Ok(cargo_target_tmpdir) = env::var("CARGO_TARGET_TMPDIR") {
        fs::create_dir_all(&cargo_target_tmpdir)?;
        Ok(TempDir::new_in(cargo_target_tmpdir)?)
    } else {
        Ok(TempDir::new()?)
    }
}

/// Helper function to create an input file with custom content
pub fn create_file(
    dir: &Path,
    filename: &str,
    content: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Standard people file: header line plus three rows
pub fn people_csv() -> (String, String) {
    (
        "people.csv".to_string(),
        "id,name,age\n1,Alice,32\n2,Bob,25\n3,Charlie,35\n".to_string(),
    )
}
