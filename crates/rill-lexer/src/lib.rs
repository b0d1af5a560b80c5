pub mod cursor;
pub mod token;

mod scanner;

pub use scanner::{lex, LexError, Lexer};
pub use token::{Literal, Token, TokenKind};
