mod keywords;
mod scanner;
mod token;

pub use keywords::Keywords;
pub use scanner::Scanner;
pub use token::{Literal, Token, TokenKind};
