//! Output format tests for tabsql
//!
//! One small result rendered through every writer.

use crate::helpers::{run_test_case, TabsqlTestCase};

fn pets_csv() -> (String, String) {
    (
        "pets.csv".to_string(),
        "id,name\n1,rex\n22,tom\n".to_string(),
    )
}

fn pets_case(args: &[&str], expected: &str) -> TabsqlTestCase {
    let mut all_args = vec!["--ih".to_string()];
    all_args.extend(args.iter().map(|a| a.to_string()));
    TabsqlTestCase {
        sql: "SELECT id, name FROM pets.csv ORDER BY CAST(id AS INTEGER)".to_string(),
        args: all_args,
        files: vec![pets_csv()],
        expected_output: Some(expected.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_csv_output_quotes_special_values() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT 'a,b' AS x, 'say \"hi\"' AS y".to_string(),
        args: vec!["--oh".to_string()],
        expected_output: Some("x,y\n\"a,b\",\"say \"\"hi\"\"\"\n".to_string()),
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_csv_output_delimiter() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(pets_case(&["--od", "\\t", "--oh"], "id\tname\n1\trex\n22\ttom\n"))
}

#[test]
fn test_ltsv_output() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(pets_case(&["-o", "ltsv"], "id:1\tname:rex\nid:22\tname:tom\n"))
}

#[test]
fn test_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = pets_case(&["-o", "json"], "");
    let test_case = TabsqlTestCase {
        expected_output: None,
        expected_stdout: vec![
            "\"id\": \"1\"".to_string(),
            "\"name\": \"rex\"".to_string(),
            "\"name\": \"tom\"".to_string(),
        ],
        ..test_case
    };

    run_test_case(test_case)
}

#[test]
fn test_json_output_empty_result() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT * FROM pets.csv WHERE name = 'none'".to_string(),
        args: vec!["--ih".to_string(), "-o".to_string(), "json".to_string()],
        files: vec![pets_csv()],
        expected_output: Some("[]\n".to_string()),
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_ascii_table_output() -> Result<(), Box<dyn std::error::Error>> {
    let expected = "\
+----+------+
| id | name |
+----+------+
| 1  | rex  |
| 22 | tom  |
+----+------+
";
    run_test_case(pets_case(&["-o", "at"], expected))
}

#[test]
fn test_markdown_output() -> Result<(), Box<dyn std::error::Error>> {
    let expected = "\
| id | name |
|----|------|
| 1  | rex  |
| 22 | tom  |
";
    run_test_case(pets_case(&["-o", "md"], expected))
}

#[test]
fn test_raw_output_multi_character_delimiter() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(pets_case(
        &["-o", "raw", "--od", " | ", "--oh"],
        "id | name\n1 | rex\n22 | tom\n",
    ))
}

#[test]
fn test_raw_output_does_not_escape() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT 'a,b', 'c'".to_string(),
        args: vec!["-o".to_string(), "raw".to_string()],
        expected_output: Some("a,b,c\n".to_string()),
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_null_renders_empty() -> Result<(), Box<dyn std::error::Error>> {
    let test_case = TabsqlTestCase {
        sql: "SELECT NULL, 1.5, 'x'".to_string(),
        expected_output: Some(",1.5,x\n".to_string()),
        ..Default::default()
    };

    run_test_case(test_case)
}

#[test]
fn test_ascii_table_aligns_wide_characters() -> Result<(), Box<dyn std::error::Error>> {
    let expected = "\
+--------+
| name   |
+--------+
| 東京都 |
| abcdef |
+--------+
";
    let test_case = TabsqlTestCase {
        sql: "SELECT name FROM cities.csv".to_string(),
        args: vec!["--ih".to_string(), "-o".to_string(), "at".to_string()],
        files: vec![(
            "cities.csv".to_string(),
            "name\n東京都\nabcdef\n".to_string(),
        )],
        expected_output: Some(expected.to_string()),
        ..Default::default()
    };

    run_test_case(test_case)
}
