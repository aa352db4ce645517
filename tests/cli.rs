use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn puf() -> Command {
    let mut command = Command::cargo_bin("puf").unwrap();
    command.env_remove("PUF_SEPARATOR").env_remove("PUF_LOG");
    command
}

#[test]
fn buffer_mode_sums_a_column() {
    puf().arg("sum(cols[0])")
         .write_stdin("1 2\n3 4\n")
         .assert()
         .success()
         .stdout("4\n");
}

#[test]
fn ragged_columns_render_one_per_line() {
    puf().arg("cols")
         .write_stdin("1 2\n3 4\n5\n")
         .assert()
         .success()
         .stdout("(1, 3, 5)\n(2, 4)\n");
}

#[test]
fn line_mode_evaluates_every_line() {
    puf().args(["-l", "row[1] * 2"])
         .write_stdin("a 1\nb 2.5\n")
         .assert()
         .success()
         .stdout("2\n5.0\n");
}

#[test]
fn separator_keeps_empty_fields() {
    puf().args(["-F", ",", "-l", "row"])
         .write_stdin("a,,b\n")
         .assert()
         .success()
         .stdout("a\n\nb\n");
}

#[test]
fn separator_can_come_from_the_environment() {
    puf().env("PUF_SEPARATOR", ":")
         .args(["-l", "row[1]"])
         .write_stdin("a:b\n")
         .assert()
         .success()
         .stdout("b\n");
}

#[test]
fn skip_header_drops_the_first_line() {
    puf().args(["-s", "len(rows)"])
         .write_stdin("h\n1\n2\n")
         .assert()
         .success()
         .stdout("2\n");
}

#[test]
fn mappings_render_as_key_value_lines() {
    puf().arg("{'a': 1, 'b': None, 'c': 3}")
         .write_stdin("")
         .assert()
         .success()
         .stdout("a=1\nc=3\n");
}

#[test]
fn none_prints_nothing() {
    puf().args(["-l", "None"])
         .write_stdin("x\ny\n")
         .assert()
         .success()
         .stdout("");
}

#[test]
fn modules_are_imported_on_demand() {
    puf().args(["-l", "re.sub('[aeiou]', '', line)"])
         .write_stdin("banana\n")
         .assert()
         .success()
         .stdout("bnn\n");
}

#[test]
fn unknown_names_fail_with_status_one() {
    puf().arg("bogusmodule123.x")
         .write_stdin("")
         .assert()
         .code(1)
         .stdout("")
         .stderr(predicate::str::starts_with("puf: ").and(predicate::str::contains("bogusmodule123")));
}

#[test]
fn parse_errors_fail_before_reading_input() {
    puf().arg("1 2")
         .write_stdin("1\n")
         .assert()
         .code(1)
         .stdout("")
         .stderr(predicate::str::contains("Error on line 1"));
}

#[test]
fn missing_command_is_a_usage_error() {
    puf().write_stdin("")
         .assert()
         .code(1)
         .stderr(predicate::str::contains("Must supply either command or file."));
}

#[test]
fn runaway_recursion_is_an_error() {
    puf().arg("do { f(n) = f(n + 1); f(0) }")
         .write_stdin("")
         .assert()
         .code(1)
         .stderr(predicate::str::contains("Maximum call depth"));
}

#[test]
fn scripts_run_against_input_files() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("report.puf");
    let data = dir.path().join("data.txt");
    fs::write(&script, "import math\nprint(math.floor(sum(cols[1]) / len(rows)))\n").unwrap();
    fs::write(&data, "a 3\nb 4\n").unwrap();

    puf().arg("-x")
         .arg(&script)
         .arg(&data)
         .assert()
         .success()
         .stdout("3\n");
}

#[test]
fn several_files_are_processed_in_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    fs::write(&first, "1\n2\n").unwrap();
    fs::write(&second, "3\n").unwrap();

    puf().args(["-l", "row[0] * 10"])
         .arg(&first)
         .arg(&second)
         .assert()
         .success()
         .stdout("10\n20\n30\n");
}

#[test]
fn in_place_editing_keeps_a_backup() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("words.txt");
    fs::write(&data, "ab\ncd\n").unwrap();

    puf().args(["-i=.orig", "-l", "line.upper()"])
         .arg(&data)
         .assert()
         .success()
         .stdout("");

    assert_eq!(fs::read_to_string(&data).unwrap(), "AB\nCD\n");
    assert_eq!(fs::read_to_string(dir.path().join("words.txt.orig")).unwrap(), "ab\ncd\n");
}

#[test]
fn verbose_logging_goes_to_stderr() {
    puf().args(["-vv", "1 + 1"])
         .write_stdin("")
         .assert()
         .success()
         .stdout("2\n")
         .stderr(predicate::str::contains("evaluating once over the buffered stream"));
}
