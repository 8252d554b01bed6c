use super::token::{Pos, Token, TokenKind};
use crate::error::LexError;
use std::iter::Peekable;
use std::str::CharIndices;

const RUN_ASM_BLOCK: &str = "Run.AsmBlock";
const RUN_ASM: &str = "Run.Asm";

/// Split source text into tokens, terminated by an `Eof` token.
pub fn scan(code: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(code).parse()
}

pub struct Lexer<'a> {
    code: &'a str,
    iter: Peekable<CharIndices<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            iter: code.char_indices().peekable(),
            line: 1,
            col: 1,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn pos(&self) -> Pos {
        Pos::new(self.line, self.col)
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.iter.clone().nth(n).map(|(_, ch)| ch)
    }

    /// Unconsumed source text
    fn rest(&mut self) -> &'a str {
        let code = self.code;
        match self.iter.peek() {
            Some(&(idx, _)) => &code[idx..],
            None => "",
        }
    }

    /// Consume one character, keeping line and column in step with it
    fn consume(&mut self) -> Option<char> {
        let (_, ch) = self.iter.next()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn consume_str(&mut self, s: &str) {
        for _ in s.chars() {
            self.consume();
        }
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, cond: F) -> String {
        let mut lexeme = String::new();
        while let Some(ch) = self.peek_nth(0) {
            if !cond(ch) {
                break;
            }
            self.consume();
            lexeme.push(ch);
        }
        lexeme
    }
}

// ----------------------------------------------------------------------------
// Lexer
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    pub fn parse(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(ch0) = self.peek_nth(0) {
            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            let pos = self.pos();

            // 1. Comments
            if ch0 == '/' {
                match self.peek_nth(1) {
                    Some('/') => {
                        self.consume_while(|ch| ch != '\n');
                        continue;
                    }
                    Some('*') => {
                        self.block_comment(pos)?;
                        continue;
                    }
                    _ => {}
                }
            }

            // 2. Raw assembly markers (the longer marker first)
            if self.rest().starts_with(RUN_ASM_BLOCK) {
                self.consume_str(RUN_ASM_BLOCK);
                tokens.push(Token::new(TokenKind::RunAsmBlock, RUN_ASM_BLOCK, pos));
                tokens.push(self.asm_block(pos)?);
                continue;
            }
            if self.rest().starts_with(RUN_ASM) {
                self.consume_str(RUN_ASM);
                tokens.push(Token::new(TokenKind::RunAsm, RUN_ASM, pos));
                continue;
            }

            // 3. Single character token
            if let Some(kind) = single_char_token(ch0) {
                self.consume();
                tokens.push(Token::new(kind, ch0.to_string(), pos));
                continue;
            }

            // 4. Number literal
            if ch0.is_ascii_digit() {
                let lexeme = self.consume_while(|ch| ch.is_ascii_digit());
                let value = lexeme
                    .parse::<i64>()
                    .map_err(|_| LexError::IntegerOutOfRange(lexeme.clone(), pos))?;
                tokens.push(Token::new(TokenKind::Number(value), lexeme, pos));
                continue;
            }

            // 5. String literal
            if ch0 == '"' {
                tokens.push(self.text(pos)?);
                continue;
            }

            // 6. Identifier or keyword
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                let lexeme = self.consume_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');
                let kind = keyword(&lexeme).unwrap_or_else(|| TokenKind::Ident(lexeme.clone()));
                tokens.push(Token::new(kind, lexeme, pos));
                continue;
            }

            return Err(LexError::UnexpectedChar(ch0, pos));
        }
        tokens.push(Token::new(TokenKind::Eof, "", self.pos()));
        Ok(tokens)
    }

    // /* ... */
    fn block_comment(&mut self, pos: Pos) -> Result<(), LexError> {
        self.consume_str("/*");
        loop {
            if self.rest().starts_with("*/") {
                self.consume_str("*/");
                return Ok(());
            }
            if self.consume().is_none() {
                return Err(LexError::UnterminatedComment(pos));
            }
        }
    }

    // "text" (no escape sequences)
    fn text(&mut self, pos: Pos) -> Result<Token, LexError> {
        self.consume();
        let body = self.consume_while(|ch| ch != '"');
        if self.consume().is_none() {
            return Err(LexError::UnterminatedString(pos));
        }
        let lexeme = format!("\"{body}\"");
        Ok(Token::new(TokenKind::Text(body), lexeme, pos))
    }

    // Run.AsmBlock { ... }
    // Captures everything up to the matching brace as a single text token.
    fn asm_block(&mut self, marker: Pos) -> Result<Token, LexError> {
        self.consume_while(char::is_whitespace);
        if self.consume() != Some('{') {
            return Err(LexError::MissingOpeningBrace(marker));
        }

        let pos = self.pos();
        let mut content = String::new();
        let mut depth = 1;
        loop {
            let ch = self
                .consume()
                .ok_or(LexError::UnterminatedBlock(marker))?;
            match ch {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                break;
            }
            content.push(ch);
        }

        let code = strip_comments(&content);
        Ok(Token::new(TokenKind::Text(code.clone()), code, pos))
    }
}

/// Remove `/* */` spans, then `//` comments up to the end of their line.
pub fn strip_comments(code: &str) -> String {
    let mut without_blocks = String::with_capacity(code.len());
    let mut rest = code;
    while let Some(begin) = rest.find("/*") {
        match rest[begin + 2..].find("*/") {
            Some(len) => {
                without_blocks.push_str(&rest[..begin]);
                rest = &rest[begin + 2 + len + 2..];
            }
            None => break,
        }
    }
    without_blocks.push_str(rest);

    without_blocks
        .split_inclusive('\n')
        .map(|line| match line.find("//") {
            Some(idx) if line.ends_with('\n') => format!("{}\n", &line[..idx]),
            Some(idx) => line[..idx].to_string(),
            None => line.to_string(),
        })
        .collect()
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        '=' => Some(TokenKind::Equal),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '%' => Some(TokenKind::Percent),
        ';' => Some(TokenKind::Semicolon),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '{' => Some(TokenKind::LCurly),
        '}' => Some(TokenKind::RCurly),
        _ => None,
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "int" => Some(TokenKind::KwInt),
        "void" => Some(TokenKind::KwVoid),
        "return" => Some(TokenKind::KwReturn),
        "const" => Some(TokenKind::KwConst),
        _ => None,
    }
}
