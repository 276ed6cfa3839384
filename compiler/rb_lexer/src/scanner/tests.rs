use pretty_assertions::assert_eq;
use rb_diagnostic::{DiagnosticLog, NullSink, Severity};
use rb_ir::SourceEncoding;

use super::*;
use crate::{lex, BinaryOp, RegexOptions};

fn scan_with(source: &str, config: &LexerConfig) -> (Vec<Token>, DiagnosticLog) {
    let mut log = DiagnosticLog::new();
    let tokens = lex(source, config, &mut log);
    (tokens, log)
}

fn scan(source: &str) -> (Vec<Token>, DiagnosticLog) {
    scan_with(source, &LexerConfig::default())
}

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).0.iter().map(|t| t.kind).collect()
}

fn trivia_kinds(source: &str) -> Vec<TokenKind> {
    let config = LexerConfig::default().with_trivia(true);
    scan_with(source, &config).0.iter().map(|t| t.kind).collect()
}

fn text(token: &Token) -> Option<&str> {
    token.value.as_ref().and_then(TokenValue::as_str)
}

fn codes(log: &DiagnosticLog) -> Vec<rb_diagnostic::ErrorCode> {
    log.codes()
}

use TokenKind::*;

// === Identifiers and keywords ===

#[test]
fn def_reads_method_name() {
    assert_eq!(kinds("def foo; end"), [Def, Identifier, Semicolon, End, EndOfFile]);
    let (tokens, _) = scan("def foo=(v)");
    assert_eq!(tokens[1].name(), Some("foo="));
    assert_eq!(tokens[2].kind, LeftParenthesis);
}

#[test]
fn operator_method_names() {
    assert_eq!(kinds("def +@; end"), [Def, UnaryPlusOp, Semicolon, End, EndOfFile]);
    assert_eq!(kinds("def []=(k, v)")[1], ItemAssign);
    assert_eq!(kinds("def [](k)")[1], ItemReference);
    assert_eq!(kinds("def !@")[1], UnaryBangOp);
}

#[test]
fn name_suffixes() {
    let (tokens, _) = scan("empty? save! x!=y");
    assert_eq!(tokens[0].kind, FunctionIdentifier);
    assert_eq!(tokens[0].name(), Some("empty?"));
    assert_eq!(tokens[1].kind, FunctionIdentifier);
    assert_eq!(tokens[1].name(), Some("save!"));
    assert_eq!(tokens[2].name(), Some("x"));
    assert_eq!(tokens[3].kind, NotEqual);
}

#[test]
fn constants() {
    assert_eq!(
        kinds("A::B"),
        [ConstantIdentifier, SeparatingDoubleColon, ConstantIdentifier, EndOfFile]
    );
    assert_eq!(kinds("::A"), [LeadingDoubleColon, ConstantIdentifier, EndOfFile]);
}

#[test]
fn keywords_are_names_after_dot() {
    let (tokens, _) = scan("x.class");
    assert_eq!(tokens[2].kind, Identifier);
    assert_eq!(tokens[2].name(), Some("class"));
}

#[test]
fn modifier_keywords() {
    assert_eq!(kinds("x if y"), [Identifier, IfMod, Identifier, EndOfFile]);
    assert_eq!(kinds("if y"), [If, Identifier, EndOfFile]);
    assert_eq!(kinds("x rescue y"), [Identifier, RescueMod, Identifier, EndOfFile]);
    assert_eq!(kinds("x while y")[1], WhileMod);
}

#[test]
fn labels() {
    assert_eq!(
        kinds("foo(a: 1)"),
        [Identifier, LeftParenthesis, Label, Integer, RightParenthesis, EndOfFile]
    );
    let (tokens, _) = scan("foo(a: 1)");
    assert_eq!(tokens[2].name(), Some("a"));
    // `::` is not a label.
    assert_eq!(kinds("foo(A::B)")[2], ConstantIdentifier);
}

#[test]
fn ternary_is_not_a_label_or_character() {
    assert_eq!(
        kinds("a ? b : c"),
        [Identifier, QuestionMark, Identifier, Colon, Identifier, EndOfFile]
    );
}

#[test]
fn command_mode_picks_identifier_state() {
    let mut scanner = Scanner::new("puts x", LexerConfig::default(), NullSink);
    assert_eq!(scanner.next_token().kind, Identifier);
    assert_eq!(scanner.lexical_state(), LexicalState::CmdArg);
    assert_eq!(scanner.next_token().kind, Identifier);
    assert_eq!(scanner.lexical_state(), LexicalState::Arg);
}

#[test]
fn declared_locals_end_expressions() {
    let mut scanner = Scanner::new("x /y/", LexerConfig::default(), NullSink);
    scanner.declare_local("x");
    assert_eq!(scanner.next_token().kind, Identifier);
    assert_eq!(scanner.lexical_state(), LexicalState::End);
    assert_eq!(scanner.next_token().kind, Slash);
}

#[test]
fn non_ascii_identifiers_follow_config() {
    let (tokens, log) = scan("größe");
    assert_eq!(tokens[0].kind, Identifier);
    assert_eq!(tokens[0].name(), Some("größe"));
    assert!(log.is_empty());

    let config = LexerConfig::default().with_extended_identifiers(false);
    let (tokens, log) = scan_with("é", &config);
    assert_eq!(tokens[0].kind, InvalidCharacter);
    assert_eq!(
        codes(&log),
        [LexErrorKind::InvalidCharacterInExpression { found: 'é' }.code()]
    );
}

// === do ===

#[test]
fn do_in_loop_condition() {
    let mut scanner = Scanner::new("while x do\nend", LexerConfig::default(), NullSink);
    assert_eq!(scanner.next_token().kind, While);
    scanner.enter_loop_condition();
    assert_eq!(scanner.next_token().kind, Identifier);
    assert_eq!(scanner.next_token().kind, LoopDo);
    scanner.leave_loop_condition();
    assert_eq!(scanner.next_token().kind, End);
}

#[test]
fn do_after_command_arguments() {
    let mut scanner = Scanner::new("foo x do end", LexerConfig::default(), NullSink);
    assert_eq!(scanner.next_token().kind, Identifier);
    let saved = scanner.enter_command_arguments();
    assert_eq!(scanner.next_token().kind, Identifier);
    assert_eq!(scanner.next_token().kind, BlockDo);
    scanner.leave_command_arguments(saved);
    assert_eq!(scanner.next_token().kind, End);
}

#[test]
fn plain_do() {
    assert_eq!(kinds("foo do end"), [Identifier, Do, End, EndOfFile]);
}

#[test]
fn lambda_bodies() {
    let mut scanner = Scanner::new("-> { 1 }", LexerConfig::default(), NullSink);
    assert_eq!(scanner.next_token().kind, Lambda);
    let saved = scanner.enter_lambda_definition();
    assert_eq!(scanner.next_token().kind, LeftLambdaBrace);
    assert_eq!(scanner.next_token().kind, Integer);
    assert_eq!(scanner.next_token().kind, RightBrace);
    scanner.leave_lambda_definition(saved);
    assert_eq!(scanner.state().opening_count, 0);

    let mut scanner = Scanner::new("-> do end", LexerConfig::default(), NullSink);
    assert_eq!(scanner.next_token().kind, Lambda);
    let saved = scanner.enter_lambda_definition();
    assert_eq!(scanner.next_token().kind, LambdaDo);
    scanner.leave_lambda_definition(saved);
}

// === Operators ===

#[test]
fn slash_divides_or_opens_regex() {
    assert_eq!(kinds("a / b"), [Identifier, Slash, Identifier, EndOfFile]);

    let (tokens, log) = scan("x = /ab/i");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [Identifier, Assignment, RegexBegin, StringContent, RegexEnd, EndOfFile]);
    assert_eq!(text(&tokens[3]), Some("ab"));
    assert_eq!(
        tokens[4].value,
        Some(TokenValue::RegexOptions(RegexOptions::IGNORE_CASE))
    );
    assert!(log.is_empty());
}

#[test]
fn ambiguous_regex_argument_warns() {
    let (tokens, log) = scan("foo /x/");
    assert_eq!(tokens[1].kind, RegexBegin);
    assert_eq!(codes(&log), [LexErrorKind::AmbiguousFirstArgument.code()]);
    assert!(!log.has_errors());
}

#[test]
fn regex_options() {
    let (tokens, log) = scan("/a/mixq");
    assert_eq!(
        tokens[2].value,
        Some(TokenValue::RegexOptions(
            RegexOptions::MULTILINE | RegexOptions::IGNORE_CASE | RegexOptions::EXTENDED
        ))
    );
    assert_eq!(codes(&log), [LexErrorKind::UnknownRegexOption { option: 'q' }.code()]);

    // Encoding options exclude each other.
    let (tokens, _) = scan("/a/nu");
    assert_eq!(tokens[2].value, Some(TokenValue::RegexOptions(RegexOptions::UTF8)));
}

#[test]
fn regex_keeps_escapes() {
    let (tokens, _) = scan(r"/a\d\/\\/");
    assert_eq!(text(&tokens[1]), Some(r"a\d\/\\"));
}

#[test]
fn op_assignment() {
    let (tokens, _) = scan("a += 1");
    assert_eq!(tokens[1].kind, OpAssignment);
    assert_eq!(tokens[1].value, Some(TokenValue::OpAssign(BinaryOp::Plus)));

    let cases = [
        ("a -= 1", BinaryOp::Minus),
        ("a *= 1", BinaryOp::Star),
        ("a /= 1", BinaryOp::Slash),
        ("a **= 1", BinaryOp::Pow),
        ("a <<= 1", BinaryOp::Shl),
        ("a ||= 1", BinaryOp::Or),
        ("a &&= 1", BinaryOp::And),
        ("a ^= 1", BinaryOp::BitXor),
    ];
    for (source, op) in cases {
        let (tokens, _) = scan(source);
        assert_eq!(tokens[1].value, Some(TokenValue::OpAssign(op)), "{source}");
    }
}

#[test]
fn comparison_operators() {
    assert_eq!(kinds("a <=> b")[1], Cmp);
    assert_eq!(kinds("a === b")[1], StrictEqual);
    assert_eq!(kinds("a == b")[1], Equal);
    assert_eq!(kinds("a =~ b")[1], Match);
    assert_eq!(kinds("a !~ b")[1], NotMatch);
    assert_eq!(kinds("a >= b")[1], GreaterOrEqual);
    assert_eq!(kinds("a => b")[1], DoubleArrow);
    assert_eq!(kinds("a&&b")[1], And2);
    assert_eq!(kinds("a||b")[1], Or2);
}

#[test]
fn shift_is_not_a_heredoc() {
    assert_eq!(kinds("a << b"), [Identifier, Lshft, Identifier, EndOfFile]);
    assert_eq!(kinds("a<<b"), [Identifier, Lshft, Identifier, EndOfFile]);
    assert_eq!(kinds("1 <<E"), [Integer, Lshft, ConstantIdentifier, EndOfFile]);
}

#[test]
fn unary_and_binary_minus() {
    assert_eq!(kinds("-1"), [NumberNegation, Integer, EndOfFile]);
    assert_eq!(kinds("a - 1"), [Identifier, Minus, Integer, EndOfFile]);
    assert_eq!(kinds("-a"), [UnaryMinus, Identifier, EndOfFile]);

    let (tokens, log) = scan("foo -1");
    assert_eq!(tokens[1].kind, NumberNegation);
    assert_eq!(codes(&log), [LexErrorKind::AmbiguousFirstArgument.code()]);
}

#[test]
fn unary_plus_reads_number() {
    let (tokens, _) = scan("+5");
    assert_eq!(tokens[0].kind, Integer);
    assert_eq!(tokens[0].value, Some(TokenValue::Integer(5)));
    assert_eq!(tokens[0].span.len(), 2);
}

#[test]
fn splat_and_block_arguments() {
    assert_eq!(kinds("a * b")[1], Asterisk);
    assert_eq!(kinds("*a")[0], Star);
    assert_eq!(kinds("a & b")[1], Ampersand);
    assert_eq!(kinds("&a")[0], BlockReference);

    let (tokens, log) = scan("foo *args");
    assert_eq!(tokens[1].kind, Star);
    assert_eq!(codes(&log), [LexErrorKind::StarInterpretedAsSplat.code()]);

    let (tokens, log) = scan("foo &blk");
    assert_eq!(tokens[1].kind, BlockReference);
    assert_eq!(codes(&log), [LexErrorKind::AmpersandInterpretedAsBlock.code()]);
}

#[test]
fn brackets_by_context() {
    assert_eq!(
        kinds("[1]"),
        [LeftBracket, Integer, RightBracket, EndOfFile]
    );
    assert_eq!(
        kinds("a[1]"),
        [Identifier, LeftIndexingBracket, Integer, RightBracket, EndOfFile]
    );
    assert_eq!(kinds("foo [1]")[1], LeftBracket);
    assert_eq!(kinds("(1)")[0], LeftExprParenthesis);
    assert_eq!(kinds("foo (1)")[1], LeftArgParenthesis);
    assert_eq!(kinds("foo(1)")[1], LeftParenthesis);
}

#[test]
fn braces_by_context() {
    assert_eq!(kinds("{}")[0], LeftBrace);
    assert_eq!(kinds("foo {}")[1], LeftBlockBrace);
    assert_eq!(kinds("foo(1) {}")[4], LeftBlockBrace);
    assert_eq!(kinds("[1] {}")[3], LeftBlockArgBrace);
}

#[test]
fn dots_and_ranges() {
    assert_eq!(kinds("1..2"), [Integer, DoubleDot, Integer, EndOfFile]);
    assert_eq!(kinds("1...2"), [Integer, TripleDot, Integer, EndOfFile]);
    assert_eq!(kinds("a.b"), [Identifier, Dot, Identifier, EndOfFile]);
}

#[test]
fn integer_then_dot() {
    let (tokens, log) = scan("1.");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [Integer, Dot, EndOfFile]
    );
    assert_eq!(tokens[0].value, Some(TokenValue::Integer(1)));
    assert!(log.is_empty());
}

#[test]
fn numbers_report_issues() {
    let (tokens, log) = scan("1_");
    assert_eq!(tokens[0].value, Some(TokenValue::Integer(1)));
    assert_eq!(codes(&log), [LexErrorKind::TrailingUnderscoreInNumber.code()]);

    let (tokens, _) = scan("1.5");
    assert_eq!(tokens[0].value, Some(TokenValue::Float(1.5)));

    let (tokens, _) = scan("0x1_0000_0000_0000_0000");
    assert_eq!(tokens[0].kind, BigInteger);
}

#[test]
fn clamped_floats_warn() {
    let (tokens, log) = scan("1e400 1e-400");
    assert_eq!(tokens[0].value, Some(TokenValue::Float(f64::INFINITY)));
    assert_eq!(tokens[1].value, Some(TokenValue::Float(0.0)));
    assert_eq!(
        codes(&log),
        [LexErrorKind::FloatOutOfRange.code(), LexErrorKind::FloatOutOfRange.code()]
    );
    assert_eq!(log.warnings().count(), 2);
}

// === Symbols and variables ===

#[test]
fn symbols() {
    let (tokens, _) = scan(":foo");
    assert_eq!(tokens[0].kind, SymbolBegin);
    assert_eq!(tokens[1].kind, Identifier);
    assert_eq!(tokens[1].name(), Some("foo"));

    assert_eq!(kinds(":\"a b\""), [SymbolBegin, StringContent, StringEnd, EndOfFile]);
    assert_eq!(kinds(":+")[1], Plus);
}

#[test]
fn global_variables() {
    let (tokens, _) = scan("$stdout");
    assert_eq!(tokens[0].kind, GlobalVariable);
    assert_eq!(tokens[0].name(), Some("stdout"));

    let (tokens, _) = scan("$1");
    assert_eq!(tokens[0].kind, MatchReference);
    assert_eq!(tokens[0].value, Some(TokenValue::Integer(1)));

    let (tokens, _) = scan("$&");
    assert_eq!(tokens[0].kind, MatchReference);
    assert_eq!(tokens[0].name(), Some("&"));

    assert_eq!(scan("$!").0[0].name(), Some("!"));
    assert_eq!(scan("$-w").0[0].name(), Some("-w"));
    assert_eq!(scan("$_").0[0].name(), Some("_"));
    assert_eq!(scan("$0").0[0].name(), Some("0"));
    assert_eq!(kinds("$"), [Dollar, EndOfFile]);
}

#[test]
fn bad_global_variables() {
    let (tokens, log) = scan("$99999999999");
    assert_eq!(tokens[0].value, Some(TokenValue::Integer(0)));
    assert_eq!(
        codes(&log),
        [LexErrorKind::MatchGroupReferenceOverflow { number: String::new() }.code()]
    );

    let (tokens, log) = scan("$0abc");
    assert_eq!(tokens[0].kind, GlobalVariable);
    assert_eq!(
        codes(&log),
        [LexErrorKind::InvalidGlobalVariableName { name: String::new() }.code()]
    );
}

#[test]
fn instance_and_class_variables() {
    let (tokens, _) = scan("@foo @@bar");
    assert_eq!(tokens[0].kind, InstanceVariable);
    assert_eq!(tokens[0].name(), Some("@foo"));
    assert_eq!(tokens[1].kind, ClassVariable);
    assert_eq!(tokens[1].name(), Some("@@bar"));

    let (tokens, log) = scan("@1");
    assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), [At, Integer, EndOfFile]);
    assert_eq!(
        codes(&log),
        [LexErrorKind::InvalidInstanceVariableName { digit: '1' }.code()]
    );
}

// === Character literals ===

#[test]
fn character_literals() {
    let (tokens, _) = scan("?a");
    assert_eq!(tokens[0].kind, Character);
    assert_eq!(text(&tokens[0]), Some("a"));

    let (tokens, _) = scan(r"?\n");
    assert_eq!(text(&tokens[0]), Some("\n"));

    let (tokens, _) = scan(r"?\u{3b1}");
    assert_eq!(text(&tokens[0]), Some("α"));

    assert_eq!(kinds("?ab"), [QuestionMark, Identifier, EndOfFile]);
}

#[test]
fn character_literal_unicode_braces() {
    let (tokens, log) = scan(r"?\u{41}");
    assert_eq!(tokens[0].kind, Character);
    assert_eq!(text(&tokens[0]), Some("A"));
    assert!(log.is_empty());

    let (tokens, log) = scan(r"?\u{}");
    assert_eq!(text(&tokens[0]), Some("\0"));
    assert_eq!(codes(&log), [LexErrorKind::InvalidUnicodeEscape.code()]);
}

#[test]
fn character_literal_raw_byte() {
    let (tokens, _) = scan(r"?\xff");
    assert_eq!(
        tokens[0].value,
        Some(TokenValue::String {
            content: crate::StringContent::Bytes(vec![0xFF]),
            encoding: SourceEncoding::Utf8,
        })
    );

    let config = LexerConfig::default().with_encoding(SourceEncoding::Ascii);
    let (tokens, _) = scan_with(r"?\xff", &config);
    assert_eq!(
        tokens[0].value,
        Some(TokenValue::String {
            content: crate::StringContent::Bytes(vec![0xFF]),
            encoding: SourceEncoding::Binary,
        })
    );
}

#[test]
fn question_mark_before_space_warns() {
    let (tokens, log) = scan("? ");
    assert_eq!(tokens[0].kind, QuestionMark);
    assert_eq!(codes(&log), [LexErrorKind::InvalidCharacterSyntax { escape: 's' }.code()]);
    assert_eq!(log.warnings().count(), 1);

    let (_, log) = scan("?");
    assert_eq!(codes(&log), [LexErrorKind::IncompleteCharacter.code()]);
}

// === Strings ===

#[test]
fn double_quoted_string() {
    let (tokens, log) = scan(r#""a\tb""#);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [StringBegin, StringContent, StringEnd, EndOfFile]
    );
    assert_eq!(text(&tokens[1]), Some("a\tb"));
    assert!(log.is_empty());
}

#[test]
fn single_quoted_keeps_escapes() {
    let (tokens, _) = scan(r"'a\tb\'c\\d'");
    assert_eq!(text(&tokens[1]), Some(r"a\tb'c\d"));
}

#[test]
fn interpolation() {
    let (tokens, _) = scan("\"a#{1}\"");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [
            StringBegin,
            StringContent,
            StringEmbeddedCodeBegin,
            Integer,
            StringEmbeddedCodeEnd,
            StringEnd,
            EndOfFile
        ]
    );
    assert_eq!(text(&tokens[1]), Some("a"));
}

#[test]
fn interpolation_balances_braces() {
    assert_eq!(
        kinds("\"#{ {a: 1} }\""),
        [
            StringBegin,
            StringEmbeddedCodeBegin,
            LeftBrace,
            Label,
            Integer,
            RightBrace,
            StringEmbeddedCodeEnd,
            StringEnd,
            EndOfFile
        ]
    );
}

#[test]
fn nested_strings_in_interpolation() {
    assert_eq!(
        kinds("\"a#{\"b#{c}\"}\""),
        [
            StringBegin,
            StringContent,
            StringEmbeddedCodeBegin,
            StringBegin,
            StringContent,
            StringEmbeddedCodeBegin,
            Identifier,
            StringEmbeddedCodeEnd,
            StringEnd,
            StringEmbeddedCodeEnd,
            StringEnd,
            EndOfFile
        ]
    );
}

#[test]
fn embedded_variables() {
    let (tokens, _) = scan("\"x#@a#$b\"");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [
            StringBegin,
            StringContent,
            StringEmbeddedVariableBegin,
            InstanceVariable,
            StringEmbeddedVariableBegin,
            GlobalVariable,
            StringEnd,
            EndOfFile
        ]
    );
    // Not a variable: stays content.
    let (tokens, _) = scan("\"#@1\"");
    assert_eq!(text(&tokens[1]), Some("#@1"));
}

#[test]
fn no_interpolation_in_single_quotes() {
    let (tokens, _) = scan("'a#{b}'");
    assert_eq!(text(&tokens[1]), Some("a#{b}"));
}

#[test]
fn content_ends_at_each_line() {
    let (tokens, _) = scan("\"a\nb\"");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [StringBegin, StringContent, StringContent, StringEnd, EndOfFile]
    );
    assert_eq!(text(&tokens[1]), Some("a\n"));
    assert_eq!(text(&tokens[2]), Some("b"));
}

#[test]
fn line_continuation_in_strings() {
    let (tokens, _) = scan("\"a\\\nb\"");
    assert_eq!(text(&tokens[1]), Some("a"));
    assert_eq!(text(&tokens[2]), Some("b"));

    let (tokens, _) = scan("'a\\\nb'");
    assert_eq!(text(&tokens[1]), Some("a\\\n"));
}

#[test]
fn crlf_in_content_is_lf() {
    let (tokens, _) = scan("\"a\r\nb\"");
    assert_eq!(text(&tokens[1]), Some("a\n"));
}

#[test]
fn unterminated_string() {
    let (tokens, log) = scan("\"abc");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [StringBegin, StringContent, StringEnd, EndOfFile]
    );
    assert_eq!(codes(&log), [LexErrorKind::UnterminatedString.code()]);
    assert!(log.has_errors());
}

#[test]
fn invalid_escape_gives_placeholder() {
    let (tokens, log) = scan(r#""\x""#);
    assert_eq!(text(&tokens[1]), Some("?"));
    assert_eq!(codes(&log), [LexErrorKind::InvalidEscapeCharacter.code()]);
}

#[test]
fn shell_strings() {
    assert_eq!(kinds("`ls`"), [ShellStringBegin, StringContent, StringEnd, EndOfFile]);
    assert_eq!(kinds("def `")[1], Backtick);
}

// === % quotations ===

#[test]
fn word_lists() {
    let (tokens, _) = scan("%w(a b)");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [VerbatimWordsBegin, StringContent, WordSeparator, StringContent, StringEnd, EndOfFile]
    );
    assert_eq!(text(&tokens[1]), Some("a"));
    assert_eq!(text(&tokens[3]), Some("b"));

    assert_eq!(
        kinds("%W[#{x} y]")[..3].to_vec(),
        [WordsBegin, StringEmbeddedCodeBegin, Identifier]
    );
}

#[test]
fn paired_delimiters_nest() {
    let (tokens, _) = scan("%q(a(b)c)");
    assert_eq!(text(&tokens[1]), Some("a(b)c"));
    assert_eq!(tokens[2].kind, StringEnd);

    let (tokens, _) = scan("%|a|");
    assert_eq!(tokens[0].kind, StringBegin);
    assert_eq!(text(&tokens[1]), Some("a"));
}

#[test]
fn quotation_kinds() {
    assert_eq!(kinds("%Q{a}")[0], StringBegin);
    assert_eq!(kinds("%x(ls)")[0], ShellStringBegin);
    assert_eq!(kinds("%r<a>i")[0], RegexBegin);
    assert_eq!(kinds("%s(a)")[0], SymbolBegin);
    assert_eq!(kinds("a % b")[1], Percent);
    assert_eq!(kinds("a %= b")[1], OpAssignment);
}

#[test]
fn unknown_quotation_type() {
    let (tokens, log) = scan("%z(");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [Percent, Identifier, LeftParenthesis, EndOfFile]
    );
    assert_eq!(codes(&log), [LexErrorKind::UnknownQuotedStringType.code()]);
}

// === Layout ===

#[test]
fn significant_newlines() {
    assert_eq!(kinds("a\nb"), [Identifier, NewLine, Identifier, EndOfFile]);
    assert_eq!(kinds("a +\nb"), [Identifier, Plus, Identifier, EndOfFile]);
    assert_eq!(kinds("a\r\nb"), [Identifier, NewLine, Identifier, EndOfFile]);
}

#[test]
fn leading_dot_continues_chain() {
    assert_eq!(kinds("a\n  .b"), [Identifier, Dot, Identifier, EndOfFile]);
    assert_eq!(kinds("a\n..b")[1], NewLine);
}

#[test]
fn line_continuation() {
    assert_eq!(kinds("a \\\n+ b"), [Identifier, Plus, Identifier, EndOfFile]);
    assert_eq!(kinds("\\ a")[0], Backslash);
}

#[test]
fn trivia_mode() {
    assert_eq!(
        trivia_kinds("a # c\n"),
        [Identifier, Whitespace, SingleLineComment, NewLine, EndOfFile]
    );
    assert_eq!(trivia_kinds("a +\nb"), [Identifier, Whitespace, Plus, EndOfLine, Identifier, EndOfFile]);
    assert_eq!(kinds("a # c\n"), [Identifier, NewLine, EndOfFile]);
}

#[test]
fn vertical_tab_is_invalid() {
    let (tokens, log) = scan("\x0B");
    assert_eq!(tokens[0].kind, InvalidCharacter);
    assert_eq!(
        codes(&log),
        [LexErrorKind::InvalidCharacterInExpression { found: '\x0B' }.code()]
    );
}

#[test]
fn embedded_documents() {
    assert_eq!(kinds("=begin\nfoo\n=end\nx"), [Identifier, EndOfFile]);
    assert_eq!(
        trivia_kinds("=begin\nfoo\n=end\nx"),
        [MultiLineComment, MultiLineComment, MultiLineComment, Identifier, EndOfFile]
    );

    let (tokens, log) = scan("=begin\nfoo\n");
    assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), [EndOfFile]);
    assert_eq!(codes(&log), [LexErrorKind::UnterminatedEmbeddedDocument.code()]);
}

#[test]
fn end_marker_stops_scan() {
    let mut scanner = Scanner::new("a\n__END__\ndata", LexerConfig::default(), NullSink);
    let kinds: Vec<_> = std::iter::from_fn(|| {
        let token = scanner.next_token();
        (!token.is_eof()).then_some(token.kind)
    })
    .collect();
    assert_eq!(kinds, [Identifier, NewLine]);
    assert_eq!(scanner.data_offset(), Some(10));
}

#[test]
fn nul_ends_input() {
    assert_eq!(kinds("a\0b"), [Identifier, EndOfFile]);
}

#[test]
fn byte_order_mark_is_skipped() {
    let (tokens, log) = scan("\u{FEFF}x");
    assert_eq!(tokens[0].kind, Identifier);
    assert_eq!(tokens[0].span.start.offset, 3);
    assert_eq!(codes(&log), [LexErrorKind::ByteOrderMarkIgnored.code()]);
    assert!(!log.has_errors());
}

#[test]
fn token_spans() {
    let (tokens, _) = scan("ab\n  cd");
    assert_eq!(tokens[0].span.to_string(), "1:1-1:3");
    assert_eq!(tokens[2].span.to_string(), "2:3-2:5");
}

// === Limits and policy ===

#[test]
fn nesting_limit_flattens_interpolation() {
    let config = LexerConfig::default().with_max_nesting_depth(1);
    let (tokens, log) = scan_with("\"a#{b}\"", &config);
    let texts: Vec<_> = tokens.iter().filter_map(text).collect();
    assert_eq!(texts, ["a", "#{", "b}"]);
    assert_eq!(tokens.last().map(|t| t.kind), Some(EndOfFile));
    let fatal: Vec<_> = log.diagnostics().iter().map(|d| d.severity).collect();
    assert_eq!(fatal, [Severity::Fatal]);
}

#[test]
fn severity_overrides_apply() {
    let code = LexErrorKind::AmbiguousFirstArgument.code();
    let config = LexerConfig::default().with_severity_override(code, Severity::Error);
    let (_, log) = scan_with("foo -1", &config);
    assert_eq!(log.errors().count(), 1);
}

#[test]
fn eof_repeats() {
    let mut scanner = Scanner::new("", LexerConfig::default(), NullSink);
    assert!(scanner.next_token().is_eof());
    assert!(scanner.next_token().is_eof());
}

#[test]
fn tokens_iterator_stops_after_eof() {
    let scanner = Scanner::new("a b", LexerConfig::default(), NullSink);
    let tokens: Vec<_> = scanner.into_iter().collect();
    assert_eq!(tokens.len(), 3);
    assert!(tokens[2].is_eof());
}
