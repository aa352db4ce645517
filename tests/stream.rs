use std::{
    fs,
    io::{Cursor, Write},
    path::PathBuf,
};

use puf::{
    cli::Args,
    interpreter::value::core::Value,
    record::lines::Separator,
    run,
    stream::{
        files::{OutputStream, determine_streams, post_process},
        orchestrator::{StreamOptions, interpret_stream},
    },
};
use tempfile::TempDir;

fn options(line_mode: bool, skip_header: bool) -> StreamOptions {
    StreamOptions { line_mode,
                    skip_header,
                    separator: Separator::Whitespace }
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn interactive_input_yields_one_empty_environment() {
    let environments: Vec<_> = interpret_stream(Cursor::new("ignored\n"), true, &options(true, true)).collect();

    assert_eq!(environments.len(), 1);
    assert!(environments[0].as_ref().unwrap().is_empty());
}

#[test]
fn line_mode_yields_one_environment_per_line() {
    let environments = interpret_stream(Cursor::new("a 1\nb 2\n"), false, &options(true, false)).collect::<Result<Vec<_>, _>>()
                                                                                            .unwrap();

    assert_eq!(environments.len(), 2);
    assert_eq!(environments[1]["line"], Value::from("b 2"));
    assert_eq!(environments[1]["row"].to_string(), "['b', 2]");
    assert!(!environments[0].contains_key("rows"));
}

#[test]
fn buffer_mode_yields_a_single_environment() {
    let environments = interpret_stream(Cursor::new("1 2\n3 4\n"), false, &options(false, false)).collect::<Result<Vec<_>, _>>()
                                                                                             .unwrap();

    assert_eq!(environments.len(), 1);
    assert_eq!(environments[0]["cols"].to_string(), "[(1, 3), (2, 4)]");
    assert!(!environments[0].contains_key("line"));
}

#[test]
fn skip_header_discards_exactly_one_line() {
    let environments = interpret_stream(Cursor::new("x y\n\n1 2\n"), false, &options(false, true)).collect::<Result<Vec<_>, _>>()
                                                                                              .unwrap();

    assert_eq!(environments[0]["lines"].to_string(), "['', '1 2']");
}

#[test]
fn skip_header_on_empty_input_yields_an_empty_buffer() {
    let environments = interpret_stream(Cursor::new(""), false, &options(false, true)).collect::<Result<Vec<_>, _>>()
                                                                                  .unwrap();

    assert_eq!(environments.len(), 1);
    assert_eq!(environments[0]["rows"].to_string(), "[]");
}

#[test]
fn literal_separator_applies_to_rows() {
    let options = StreamOptions { line_mode:   true,
                                  skip_header: false,
                                  separator:   Separator::Literal(",".to_string()), };

    let environments = interpret_stream(Cursor::new("a,,3\n"), false, &options).collect::<Result<Vec<_>, _>>()
                                                                            .unwrap();

    assert_eq!(environments[0]["row"].to_string(), "['a', '', 3]");
}

#[test]
fn files_without_in_place_write_to_standard_output() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "data.txt", "1\n");
    let args = Args { file: vec![path],
                      ..Args::default() };

    let pairs = determine_streams(&args).collect::<Result<Vec<_>, _>>().unwrap();

    assert_eq!(pairs.len(), 1);
    assert!(matches!(pairs[0].1, OutputStream::Stdout(_)));
    assert!(!pairs[0].0.is_interactive());
}

#[test]
fn missing_files_report_their_path() {
    let args = Args { file: vec![PathBuf::from("no/such/input.txt")],
                      ..Args::default() };

    let error = determine_streams(&args).next().unwrap().err().unwrap();

    assert!(error.to_string().contains("no/such/input.txt"));
}

#[test]
fn in_place_without_suffix_replaces_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "data.txt", "old\n");
    let args = Args { file: vec![path.clone()],
                      in_place: Some(String::new()),
                      ..Args::default() };

    for pair in determine_streams(&args) {
        let (input, mut output) = pair.unwrap();
        output.write_all(b"new\n").unwrap();
        post_process(&args, input, output).unwrap();
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn in_place_with_suffix_keeps_a_backup() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "data.txt", "old\n");
    let args = Args { file: vec![path.clone()],
                      in_place: Some(".bak".to_string()),
                      ..Args::default() };

    for pair in determine_streams(&args) {
        let (input, mut output) = pair.unwrap();
        output.write_all(b"new\n").unwrap();
        post_process(&args, input, output).unwrap();
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    assert_eq!(fs::read_to_string(dir.path().join("data.txt.bak")).unwrap(), "old\n");
}

#[test]
fn run_rewrites_every_file_in_place() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "first.txt", "1 2\n3 4\n");
    let second = write_file(&dir, "second.txt", "10\n");
    let args = Args { command: Some("sum(cols[0])".to_string()),
                      file: vec![first.clone(), second.clone()],
                      in_place: Some(String::new()),
                      ..Args::default() };

    run(&args).unwrap();

    assert_eq!(fs::read_to_string(&first).unwrap(), "4\n");
    assert_eq!(fs::read_to_string(&second).unwrap(), "10\n");
}

#[test]
fn run_in_line_mode_renders_each_line() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "names.txt", "name score\nada 3\nbob 4\n");
    let args = Args { command: Some("{'who': row[0].upper(), 'twice': row[1] * 2}".to_string()),
                      file: vec![path.clone()],
                      in_place: Some(String::new()),
                      line: true,
                      skip_header: true,
                      ..Args::default() };

    run(&args).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "who=ADA\ntwice=6\nwho=BOB\ntwice=8\n");
}

#[test]
fn run_stops_at_the_first_evaluation_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "data.txt", "1\n");
    let args = Args { command: Some("row[5]".to_string()),
                      file: vec![path.clone()],
                      in_place: Some(String::new()),
                      line: true,
                      ..Args::default() };

    assert!(run(&args).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "1\n");
}
