use super::token::{Token, TokenKind};
use crate::error::SyntaxError;

pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // Make sure the stream is terminated
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let pos = tokens.last().map(|t| t.pos).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", pos));
        }
        Parser { tokens, cursor: 0 }
    }
}

impl Parser {
    /// Peek : Watch next token without consuming it
    pub fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Peek n tokens ahead; stays on `Eof` at the end of the stream
    pub fn peek_nth(&self, n: usize) -> &Token {
        let idx = (self.cursor + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
        token
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&self, cond: F) -> bool {
        cond(self.peek())
    }

    /// Next token must be of the given kind
    pub fn expect_tobe(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.peek().kind == kind {
            Ok(self.next())
        } else {
            Err(SyntaxError::Expected(kind.describe(), self.peek().into()))
        }
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:ident) => {
        $parser.expect_tobe($crate::grammer::token::TokenKind::$kind)
    };
}

/// Parse `{ element } terminal`, stopping at the terminal or end of input
#[macro_export]
macro_rules! repeat {
    ($parser:expr, $elem:expr, $terminal:pat) => {{
        let mut items = Vec::new();
        while !$crate::check!($parser, $terminal | $crate::grammer::token::TokenKind::Eof) {
            items.push($elem?);
        }
        items
    }};
}
