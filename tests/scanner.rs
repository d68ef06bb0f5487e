//! Token stream behaviour through the public API.

use enigma::{ErrorKind, Scanner, Token, TokenKind};
use std::collections::HashSet;

fn scan(src: &str) -> Vec<Token<'_>> {
    Scanner::new(src).collect()
}

fn kinds(src: &str) -> Vec<TokenKind> {
    scan(src).iter().map(Token::kind).collect()
}

#[test]
fn empty_input_has_nothing_to_scan() {
    let mut scanner = Scanner::new("");
    assert!(!scanner.has_next());
    assert_eq!(None, scanner.next());
    assert_eq!(TokenKind::EndOfFile, scanner.scan_token().kind());
}

#[test]
fn keyword_prefix_stays_identifier() {
    let tokens = scan("iffy");
    assert_eq!(1, tokens.len());
    assert_eq!(TokenKind::Identifier, tokens[0].kind());
    assert_eq!("iffy", tokens[0].text());
}

#[test]
fn identifiers_allow_underscores_and_digits() {
    let tokens = scan("_tmp1 fun2 classy orchid");
    assert!(tokens.iter().all(|t| t.kind() == TokenKind::Identifier));
    let texts: Vec<_> = tokens.iter().map(Token::text).collect();
    assert_eq!(vec!["_tmp1", "fun2", "classy", "orchid"], texts);
}

#[test]
fn bang_equal_is_one_token() {
    assert_eq!(vec![TokenKind::BangEqual], kinds("!="));
    assert_eq!(vec![TokenKind::Bang], kinds("!"));
}

#[test]
fn number_with_fraction() {
    let tokens = scan("12.5");
    assert_eq!(1, tokens.len());
    assert_eq!(TokenKind::Number, tokens[0].kind());
    assert_eq!("12.5", tokens[0].text());
}

#[test]
fn number_with_trailing_dot() {
    let tokens = scan("12.");
    assert_eq!(2, tokens.len());
    assert_eq!(TokenKind::Number, tokens[0].kind());
    assert_eq!("12", tokens[0].text());
    assert_eq!(TokenKind::Dot, tokens[1].kind());
    assert_eq!("", tokens[1].text());
}

#[test]
fn number_takes_at_most_one_fraction() {
    let tokens = scan("1.2.3");
    let texts: Vec<_> = tokens.iter().map(|t| (t.kind(), t.text())).collect();
    assert_eq!(
        vec![
            (TokenKind::Number, "1.2"),
            (TokenKind::Dot, ""),
            (TokenKind::Number, "3"),
        ],
        texts
    );
}

#[test]
fn number_then_method_call() {
    assert_eq!(
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Identifier],
        kinds("3.abs")
    );
}

#[test]
fn tokens_record_their_line() {
    let tokens = scan("a\nb");
    assert_eq!(0, tokens[0].line());
    assert_eq!(1, tokens[1].line());
}

#[test]
fn unterminated_string_is_still_emitted() {
    let mut scanner = Scanner::new("\"abc");
    let token = scanner.scan_token();
    assert_eq!(TokenKind::String, token.kind());
    assert_eq!("abc", token.text());
    assert_eq!(1, scanner.errors().len());
    assert_eq!(&ErrorKind::UnterminatedString, scanner.errors()[0].kind());
    assert!(!scanner.has_next());
}

#[test]
fn string_text_excludes_quotes() {
    let tokens = scan("\"hello world\" \"\"");
    assert_eq!("hello world", tokens[0].text());
    assert_eq!(TokenKind::String, tokens[1].kind());
    assert_eq!("", tokens[1].text());
}

#[test]
fn strings_are_not_unescaped() {
    let tokens = scan(r#""a\nb""#);
    assert_eq!(r"a\nb", tokens[0].text());
}

#[test]
fn punctuation_maps_to_unique_kinds() {
    use TokenKind::*;
    let expected = [
        ('(', LeftParen),
        (')', RightParen),
        ('{', LeftBrace),
        ('}', RightBrace),
        ('[', LeftBracket),
        (']', RightBracket),
        (',', Comma),
        ('.', Dot),
        ('-', Minus),
        ('+', Plus),
        (';', Semicolon),
        ('/', Slash),
        ('*', Star),
    ];
    for (c, kind) in expected.iter() {
        let src = c.to_string();
        assert_eq!(vec![*kind], kinds(&src), "scanning {:?}", c);
    }

    let distinct: HashSet<_> = expected.iter().map(|(_, k)| *k).collect();
    assert_eq!(expected.len(), distinct.len());
}

#[test]
fn unrecognized_characters_do_not_stop_the_scan() {
    let mut scanner = Scanner::new("x @ y $");
    let tokens: Vec<_> = scanner.by_ref().collect();
    let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
    assert_eq!(
        vec![
            TokenKind::Identifier,
            TokenKind::Error,
            TokenKind::Identifier,
            TokenKind::Error,
        ],
        kinds
    );
    let reported: Vec<_> = scanner.errors().iter().map(|e| e.kind().clone()).collect();
    assert_eq!(
        vec![
            ErrorKind::UnrecognizedCharacter('@'),
            ErrorKind::UnrecognizedCharacter('$'),
        ],
        reported
    );
}

#[test]
fn scan_tokens_appends_end_of_file() {
    let (tokens, errors) = Scanner::new("print nil;\n").scan_tokens();
    let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
    assert_eq!(
        vec![
            TokenKind::Print,
            TokenKind::Nil,
            TokenKind::Semicolon,
            TokenKind::EndOfFile,
        ],
        kinds
    );
    assert_eq!(1, tokens[3].line());
    assert!(errors.is_empty());
}

#[test]
fn small_program() {
    use TokenKind::*;
    let src = "fun add(a, b) {\n  return a + b;\n}\nprint add(1, 2.5) >= 3;";
    assert_eq!(
        vec![
            Fun, Identifier, LeftParen, Identifier, Comma, Identifier, RightParen, LeftBrace,
            Return, Identifier, Plus, Identifier, Semicolon,
            RightBrace,
            Print, Identifier, LeftParen, Number, Comma, Number, RightParen, GreaterEqual,
            Number, Semicolon,
        ],
        kinds(src)
    );
    let lines: Vec<_> = scan(src).iter().map(Token::line).collect();
    assert_eq!(0, lines[0]);
    assert_eq!(1, lines[8]);
    assert_eq!(2, lines[13]);
    assert_eq!(3, lines[23]);
}
