use super::*;
use pretty_assertions::assert_eq;

fn quoted(close: char) -> NestingFrame {
    NestingFrame::Quoted(StringFrame::new(StringFlags::EXPANDS, close))
}

#[test]
fn paired_delimiters() {
    let frame = StringFrame::delimited_by(StringFlags::empty(), '(');
    assert_eq!(frame.open_delim, Some('('));
    assert_eq!(frame.close_delim, ')');
    assert!(!frame.interpolation_allowed());

    let frame = StringFrame::delimited_by(StringFlags::EXPANDS, '|');
    assert_eq!(frame.open_delim, None);
    assert_eq!(frame.close_delim, '|');
    assert!(frame.interpolation_allowed());

    assert_eq!(closing_delimiter('<'), Some('>'));
    assert_eq!(closing_delimiter('"'), None);
}

#[test]
fn open_and_close() {
    let mut stack = NestingStack::new(8);
    assert!(stack.is_top_level());
    assert!(stack.in_code());

    assert!(stack.open(quoted('"')));
    assert!(!stack.in_code());
    assert!(stack.open(NestingFrame::Interpolation { brace_depth: 0 }));
    assert!(stack.in_code());
    assert_eq!(stack.depth(), 2);

    assert!(stack.close('}'));
    assert!(!stack.close(')'));
    assert!(stack.is_top_level());
    assert!(!stack.close('"'));
}

#[test]
fn braces_balance_inside_interpolation() {
    let mut stack = NestingStack::new(8);
    assert!(stack.open(quoted('"')));
    assert!(stack.open(NestingFrame::Interpolation { brace_depth: 0 }));

    assert!(!stack.note_brace('{'));
    assert!(!stack.note_brace('{'));
    assert_eq!(stack.top(), Some(&NestingFrame::Interpolation { brace_depth: 2 }));
    assert!(!stack.note_brace('}'));
    assert!(!stack.note_brace('}'));
    assert!(stack.note_brace('}'));
    assert_eq!(stack.depth(), 2, "caller pops the interpolation");
}

#[test]
fn braces_outside_interpolation_are_ignored() {
    let mut stack = NestingStack::new(8);
    assert!(!stack.note_brace('}'));
    assert!(stack.open(quoted('"')));
    assert!(!stack.note_brace('{'));
    assert_eq!(stack.top(), Some(&quoted('"')));
}

#[test]
fn depth_is_bounded() {
    let mut stack = NestingStack::new(2);
    assert!(stack.open(quoted('"')));
    assert!(stack.open(NestingFrame::Interpolation { brace_depth: 0 }));
    assert!(!stack.open(quoted('\'')));
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.max_depth(), 2);
}

#[test]
fn depth_limit_can_change() {
    let mut stack = NestingStack::new(1);
    assert!(stack.open(quoted('"')));
    assert!(!stack.open(NestingFrame::Interpolation { brace_depth: 0 }));

    stack.set_max_depth(2);
    assert!(stack.open(NestingFrame::Interpolation { brace_depth: 0 }));

    stack.set_max_depth(1);
    assert_eq!(stack.depth(), 2);
    assert!(!stack.open(quoted('\'')));
}

#[test]
fn interpolation_per_kind() {
    let heredoc = |interpolate| {
        NestingFrame::DeferredBlock(HeredocFrame::new(HeredocRequest {
            label: "EOS".to_string(),
            indent: HeredocIndent::Squiggly,
            interpolate,
            shell: false,
        }))
    };
    assert!(heredoc(true).interpolation_allowed());
    assert!(!heredoc(false).interpolation_allowed());
    assert_eq!(heredoc(true).expected_closer(), None);
    assert!(!NestingFrame::Comment.interpolation_allowed());
    assert!(HeredocIndent::Dash.allows_indented_label());
    assert!(!HeredocIndent::None.allows_indented_label());
}
