#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unexpected character '{0}'.")]
    UnrecognizedCharacter(char),
}

/// A lexical diagnostic. Scanning always continues past one of these; the
/// offending input is still represented in the token stream.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("[line {}] Error: {kind}", .line + 1)]
pub struct Error {
    kind: ErrorKind,
    line: usize,
}

impl Error {
    pub fn unterminated_string(line: usize) -> Error {
        Error { kind: ErrorKind::UnterminatedString, line }
    }

    pub fn unrecognized_character(line: usize, c: char) -> Error {
        Error { kind: ErrorKind::UnrecognizedCharacter(c), line }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 0-based, matching `Token::line`.
    pub fn line(&self) -> usize {
        self.line
    }
}
