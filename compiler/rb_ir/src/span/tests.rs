use super::*;
use pretty_assertions::assert_eq;

#[test]
fn advance_tracks_lines_and_columns() {
    let p = Position::START.advanced_by('a').advanced_by('b');
    assert_eq!(p, Position::new(2, 1, 3));

    let p = p.advanced_by('\n');
    assert_eq!(p, Position::new(3, 2, 1));
    assert!(p.is_line_start());
}

#[test]
fn advance_counts_bytes_for_offset_and_chars_for_column() {
    let p = Position::START.advanced_by('Σ');
    assert_eq!(p.offset, 2);
    assert_eq!(p.column, 2);

    let p = p.advanced_by('\u{1F600}');
    assert_eq!(p.offset, 6);
    assert_eq!(p.column, 3);
}

#[test]
fn lone_carriage_return_stays_on_line() {
    let p = Position::START.advanced_by('\r');
    assert_eq!(p.line, 1);
    assert_eq!(p.column, 2);
}

#[test]
fn empty_span() {
    let at = Position::new(5, 1, 6);
    let span = SourceSpan::empty(at);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
    assert!(!span.contains(5));
}

#[test]
fn merge_covers_both() {
    let a = SourceSpan::new(Position::new(0, 1, 1), Position::new(3, 1, 4));
    let b = SourceSpan::new(Position::new(10, 2, 1), Position::new(12, 2, 3));
    let merged = a.merge(b);
    assert_eq!(merged.start, a.start);
    assert_eq!(merged.end, b.end);
    assert_eq!(merged.len(), 12);
    assert_eq!(merged.to_range(), 0..12);
}

#[test]
fn display_uses_line_and_column() {
    let span = SourceSpan::new(Position::new(0, 1, 1), Position::new(7, 2, 3));
    assert_eq!(span.to_string(), "1:1-2:3");
    assert_eq!(format!("{span:?}"), "0..7");
}
