pub mod error;
pub mod scanner;
pub mod token;

pub use crate::{
    error::{Error, ErrorKind},
    scanner::Scanner,
    token::{Token, TokenKind},
};
