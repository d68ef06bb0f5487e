use crate::{
    error::Error,
    token::{Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::str::CharIndices;

static SINGLE_CHAR_TOKENS: phf::Map<char, TokenKind> = phf_map! {
    '(' => TokenKind::LeftParen,
    ')' => TokenKind::RightParen,
    '{' => TokenKind::LeftBrace,
    '}' => TokenKind::RightBrace,
    '[' => TokenKind::LeftBracket,
    ']' => TokenKind::RightBracket,
    ',' => TokenKind::Comma,
    '.' => TokenKind::Dot,
    '-' => TokenKind::Minus,
    '+' => TokenKind::Plus,
    ';' => TokenKind::Semicolon,
    '/' => TokenKind::Slash,
    '*' => TokenKind::Star,
};

/// Pull-based scanner over a borrowed source string.
///
/// Each call to [`Scanner::scan_token`] skips whitespace and produces exactly
/// one token. Malformed input never stops the scan: unrecognized characters
/// become `Error` tokens, unterminated strings become truncated `String`
/// tokens, and both are recorded in [`Scanner::errors`].
pub struct Scanner<'a> {
    source: &'a str,
    src: PeekMoreIterator<CharIndices<'a>>,
    start: usize,
    current: usize,
    line: usize,
    errors: Vec<Error>,
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if !self.has_next() {
            return None;
        }
        let token = self.scan_token();
        match token.kind {
            TokenKind::EndOfFile => None,
            _ => Some(token),
        }
    }
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            src: source.char_indices().peekmore(),
            start: 0,
            current: 0,
            line: 0,
            errors: Vec::new(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.current < self.source.len()
    }

    /// Byte offset of the next unconsumed character.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Scans everything that is left, appending an `EndOfFile` token.
    pub fn scan_tokens(mut self) -> (Vec<Token<'a>>, Vec<Error>) {
        let mut tokens: Vec<Token<'a>> = self.by_ref().collect();
        tokens.push(Token::new(TokenKind::EndOfFile, "", self.line));
        (tokens, self.errors)
    }

    /// Produces the next token. Once only whitespace (or nothing) is left
    /// this returns `EndOfFile` without reading past the end of the source.
    pub fn scan_token(&mut self) -> Token<'a> {
        self.skip_whitespace();
        self.start = self.current;
        let line = self.line;

        let c = match self.advance() {
            Some(c) => c,
            None => return Token::new(TokenKind::EndOfFile, "", line),
        };

        let kind = match c {
            '"' => return self.extract_string(line),
            c if can_start_identifier(c) => self.extract_identifier(),
            c if c.is_ascii_digit() => self.extract_number(),
            c => self.operator_kind(c),
        };

        let text = if kind.carries_text() { self.lexeme() } else { "" };
        Token::new(kind, text, line)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.src.peek() {
            match c {
                ' ' | '\t' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                }
                '\r' => {
                    self.advance();
                    // the '\n' of a "\r\n" pair does the counting
                    if !self.check('\n') {
                        self.line += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn operator_kind(&mut self, c: char) -> TokenKind {
        let (single, double) = match c {
            '!' => (TokenKind::Bang, TokenKind::BangEqual),
            '=' => (TokenKind::Equal, TokenKind::EqualEqual),
            '<' => (TokenKind::Less, TokenKind::LessEqual),
            '>' => (TokenKind::Greater, TokenKind::GreaterEqual),
            c => {
                return match SINGLE_CHAR_TOKENS.get(&c) {
                    Some(kind) => *kind,
                    None => {
                        self.errors.push(Error::unrecognized_character(self.line, c));
                        TokenKind::Error
                    }
                }
            }
        };

        if self.does_next_match('=') { double } else { single }
    }

    fn extract_string(&mut self, line: usize) -> Token<'a> {
        let source = self.source;
        let body_start = self.current;
        self.advance_until(|c| c == '"');
        let body = &source[body_start..self.current];
        self.line += count_line_breaks(body);

        if self.advance().is_none() {
            self.errors.push(Error::unterminated_string(line));
        }
        Token::new(TokenKind::String, body, line)
    }

    fn extract_number(&mut self) -> TokenKind {
        self.advance_until(|c| !c.is_ascii_digit());

        let has_fraction = self.check('.')
            && matches!(self.src.peek_nth(1), Some(&(_, c)) if c.is_ascii_digit());
        if has_fraction {
            self.advance();
            self.advance_until(|c| !c.is_ascii_digit());
        }

        TokenKind::Number
    }

    fn extract_identifier(&mut self) -> TokenKind {
        self.advance_until(|c| !is_part_of_valid_identifier(c));
        keyword_kind(self.lexeme()).unwrap_or(TokenKind::Identifier)
    }

    fn lexeme(&self) -> &'a str {
        let source = self.source;
        &source[self.start..self.current]
    }

    fn advance(&mut self) -> Option<char> {
        let (i, c) = self.src.next()?;
        self.current = i + c.len_utf8();
        Some(c)
    }

    fn check(&mut self, c: char) -> bool {
        matches!(self.src.peek(), Some(&(_, next)) if next == c)
    }

    fn does_next_match(&mut self, c: char) -> bool {
        if self.check(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance_until(&mut self, should_stop: impl Fn(char) -> bool) {
        while let Some(&(_, c)) = self.src.peek() {
            if should_stop(c) {
                break;
            }
            self.advance();
        }
    }
}

/// Classifies a fully scanned identifier by its leading characters. The
/// candidate's remaining suffix has to match the rest of the lexeme exactly,
/// so a keyword that is only a prefix (`iffy`, `fort`) stays an identifier.
fn keyword_kind(lexeme: &str) -> Option<TokenKind> {
    use TokenKind::*;
    let bytes = lexeme.as_bytes();
    let (offset, rest, kind) = match bytes.first()? {
        b'a' => (1, "nd", And),
        b'c' => (1, "lass", Class),
        b'e' => (1, "lse", Else),
        b'f' => match bytes.get(1)? {
            b'a' => (2, "lse", False),
            b'o' => (2, "r", For),
            b'u' => (2, "n", Fun),
            _ => return None,
        },
        b'i' => (1, "f", If),
        b'n' => (1, "il", Nil),
        b'o' => (1, "r", Or),
        b'p' => (1, "rint", Print),
        b'r' => (1, "eturn", Return),
        b's' => (1, "uper", Super),
        b't' => match bytes.get(1)? {
            b'h' => (2, "is", This),
            b'r' => (2, "ue", True),
            _ => return None,
        },
        b'v' => (1, "ar", Var),
        b'w' => (1, "hile", While),
        _ => return None,
    };

    (&bytes[offset..] == rest.as_bytes()).then_some(kind)
}

fn count_line_breaks(text: &str) -> usize {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count()
}

fn can_start_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_part_of_valid_identifier(c: char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
