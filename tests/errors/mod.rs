//! Error handling tests for tabsql
//!
//! Fatal errors must name the failing stage and exit non-zero; malformed
//! rows are skipped unless --strict is given.

use crate::helpers::{people_csv, run_test_case, TabsqlTestCase};

#[test]
fn test_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT * FROM nope.csv".to_string(),
        expected_output: Some(String::new()),
        expected_stderr: vec!["load failed".to_string(), "nope.csv".to_string()],
        should_succeed: false,
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_syntax_error() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT * FORM people.csv".to_string(),
        files: vec![people_csv()],
        expected_stderr: vec!["execute failed".to_string(), "syntax error".to_string()],
        should_succeed: false,
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_unknown_column() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT salary FROM people.csv".to_string(),
        args: vec!["--ih".to_string()],
        files: vec![people_csv()],
        expected_stderr: vec!["execute failed".to_string()],
        should_succeed: false,
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_unterminated_literal() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT 'oops FROM people.csv".to_string(),
        files: vec![people_csv()],
        expected_stderr: vec!["resolve failed".to_string()],
        should_succeed: false,
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_malformed_row_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT name FROM pets.csv".to_string(),
        args: vec!["--ih".to_string()],
        files: vec![(
            "pets.csv".to_string(),
            "id,name\n1,rex\n2,tom,extra\n3,kit\n".to_string(),
        )],
        expected_output: Some("rex\nkit\n".to_string()),
        expected_stderr: vec!["skipping row".to_string()],
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_malformed_row_is_fatal_when_strict() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT name FROM pets.csv".to_string(),
        args: vec!["--ih".to_string(), "--strict".to_string()],
        files: vec![(
            "pets.csv".to_string(),
            "id,name\n1,rex\n2,tom,extra\n".to_string(),
        )],
        expected_output: Some(String::new()),
        expected_stderr: vec!["load failed".to_string(), "row 2".to_string()],
        should_succeed: false,
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_bad_ltsv_field() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT * FROM bad.ltsv".to_string(),
        args: vec!["-i".to_string(), "ltsv".to_string()],
        files: vec![("bad.ltsv".to_string(), "host:a\tnolabel\n".to_string())],
        expected_stderr: vec!["load failed".to_string(), "line 1".to_string()],
        should_succeed: false,
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_invalid_output_delimiter() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT 1".to_string(),
        args: vec!["--od".to_string(), "::".to_string()],
        expected_stderr: vec!["invalid delimiter".to_string()],
        should_succeed: false,
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_empty_query_prints_usage() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("tabsql")?;
    cmd.arg("  ;  ").assert().code(2);
    Ok(())
}

#[test]
fn test_unknown_output_format() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("tabsql")?;
    cmd.args(["-o", "xml", "SELECT 1"]).assert().code(2);
    Ok(())
}

#[test]
fn test_standard_input_referenced_twice() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT * FROM - AS a JOIN - AS b".to_string(),
        stdin: Some("1,a\n".to_string()),
        expected_output: Some(String::new()),
        expected_stderr: vec!["load failed".to_string(), "only be read once".to_string()],
        should_succeed: false,
        ..Default::default()
    };

    run_test_case(test_case)
}
