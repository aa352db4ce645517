use std::io::Cursor;

use proptest::prelude::*;
use puf::{
    interpreter::value::core::Value,
    record::{
        Row,
        buffer::{Buffer, transpose},
        lines::{LineParser, Separator, parse_row},
        segment::interpret_segment,
    },
};

fn parse_all(content: &str, separator: &Separator) -> Vec<(String, Row)> {
    LineParser::new(Cursor::new(content.to_string()), separator.clone()).map(|entry| entry.unwrap())
                                                                      .collect()
}

#[test]
fn segments_prefer_integers_then_reals() {
    assert_eq!(interpret_segment("42"), Value::Integer(42));
    assert_eq!(interpret_segment("007"), Value::Integer(7));
    assert_eq!(interpret_segment("+5"), Value::Integer(5));
    assert_eq!(interpret_segment("3.14"), Value::Real(3.14));
    assert_eq!(interpret_segment(".5"), Value::Real(0.5));
    assert_eq!(interpret_segment("99999999999999999999"), Value::Real(1e20));
    assert!(matches!(interpret_segment("inf"), Value::Real(r) if r.is_infinite()));
    assert!(matches!(interpret_segment("nan"), Value::Real(r) if r.is_nan()));
}

#[test]
fn segments_that_are_not_numbers_stay_text() {
    assert_eq!(interpret_segment("abc"), Value::from("abc"));
    assert_eq!(interpret_segment("1,5"), Value::from("1,5"));
    assert_eq!(interpret_segment(" x "), Value::from(" x "));
    assert_eq!(interpret_segment(""), Value::from(""));
}

#[test]
fn whitespace_separator_drops_empty_tokens() {
    let row = parse_row("  a  b ", &Separator::Whitespace);

    assert_eq!(row, vec![Value::from("a"), Value::from("b")]);
}

#[test]
fn literal_separator_keeps_empty_tokens() {
    let row = parse_row("a,,b", &Separator::Literal(",".to_string()));

    assert_eq!(row, vec![Value::from("a"), Value::from(""), Value::from("b")]);
}

#[test]
fn line_endings_are_stripped() {
    let entries = parse_all("1 2\r\n3\n\nlast", &Separator::Whitespace);
    let lines: Vec<&str> = entries.iter().map(|(line, _)| line.as_str()).collect();

    assert_eq!(lines, ["1 2", "3", "", "last"]);
    assert!(entries[2].1.is_empty());
}

#[test]
fn parsing_is_repeatable() {
    let content = "a 1\nb 2.5\n";

    assert_eq!(parse_all(content, &Separator::Whitespace),
               parse_all(content, &Separator::Whitespace));
}

#[test]
fn invalid_utf8_ends_the_sequence_with_an_error() {
    let bytes: Vec<u8> = vec![b'o', b'k', b'\n', 0xff, 0xfe, b'\n', b'x', b'\n'];
    let mut parser = LineParser::new(Cursor::new(bytes), Separator::Whitespace);

    assert!(matches!(parser.next(), Some(Ok(_))));
    assert!(matches!(parser.next(), Some(Err(_))));
    assert!(parser.next().is_none());
}

#[test]
fn ragged_rows_shorten_later_columns() {
    let rows = vec![vec![Value::Integer(1), Value::Integer(2)],
                    vec![Value::Integer(3), Value::Integer(4)],
                    vec![Value::Integer(5)]];

    let cols = transpose(&rows);

    assert_eq!(cols.len(), 2);
    assert_eq!(cols[0], [Value::Integer(1), Value::Integer(3), Value::Integer(5)]);
    assert_eq!(cols[1], [Value::Integer(2), Value::Integer(4)]);
}

#[test]
fn empty_stream_has_no_columns() {
    let buffer = Buffer::from_lines(LineParser::new(Cursor::new(""), Separator::Whitespace)).unwrap();

    assert!(buffer.lines.is_empty());
    assert!(buffer.rows.is_empty());
    assert!(buffer.cols.is_empty());
}

#[test]
fn buffer_environment_exposes_lines_rows_and_cols() {
    let parser = LineParser::new(Cursor::new("1 2\n3 4\n"), Separator::Whitespace);
    let environment = Buffer::from_lines(parser).unwrap().into_environment();

    assert_eq!(environment["lines"].to_string(), "['1 2', '3 4']");
    assert_eq!(environment["rows"].to_string(), "[[1, 2], [3, 4]]");
    assert_eq!(environment["cols"].to_string(), "[(1, 3), (2, 4)]");
}

proptest! {
    #[test]
    fn integers_round_trip_through_text(n in any::<i64>()) {
        prop_assert_eq!(interpret_segment(&n.to_string()), Value::Integer(n));
    }

    #[test]
    fn words_stay_text(word in "[p-z]{1,8}") {
        prop_assert_eq!(interpret_segment(&word), Value::from(word.as_str()));
    }

    #[test]
    fn whitespace_splitting_ignores_run_lengths(tokens in prop::collection::vec("[a-z0-9]{1,5}", 0..8),
                                                gaps in prop::collection::vec("[ \t]{1,3}", 9)) {
        let mut line = gaps[0].clone();
        for (token, gap) in tokens.iter().zip(&gaps[1..]) {
            line.push_str(token);
            line.push_str(gap);
        }

        prop_assert_eq!(Separator::Whitespace.split(&line), tokens);
    }

    #[test]
    fn literal_splitting_is_lossless(tokens in prop::collection::vec("[a-z]{0,3}", 1..8)) {
        let line = tokens.join(";");

        prop_assert_eq!(Separator::Literal(";".to_string()).split(&line), tokens);
    }

    #[test]
    fn column_lengths_count_the_rows_that_reach_them(lengths in prop::collection::vec(0usize..6, 0..10)) {
        let rows: Vec<Row> = lengths.iter()
                                    .map(|&len| (0..len).map(|i| Value::Integer(i64::try_from(i).unwrap())).collect())
                                    .collect();

        let cols = transpose(&rows);

        prop_assert_eq!(cols.len(), lengths.iter().copied().max().unwrap_or(0));
        for (i, col) in cols.iter().enumerate() {
            prop_assert_eq!(col.len(), lengths.iter().filter(|&&len| len > i).count());
        }
    }
}
