use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Pos) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Single character tokens
    Equal,     // '='
    Plus,      // '+'
    Minus,     // '-'
    Star,      // '*'
    Slash,     // '/'
    Percent,   // '%'
    Semicolon, // ';'
    LParen,    // '('
    RParen,    // ')'
    LCurly,    // '{'
    RCurly,    // '}'

    // Keywords
    KwInt,    // "int"
    KwVoid,   // "void"
    KwReturn, // "return"
    KwConst,  // "const"

    // Raw assembly markers
    RunAsm,      // "Run.Asm"
    RunAsmBlock, // "Run.AsmBlock"

    // Identifier
    Ident(String),

    // Literals
    Number(i64),
    Text(String),

    // Special
    Eof,
}

impl TokenKind {
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Equal => "'='",
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent => "operator",
            TokenKind::Semicolon => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LCurly => "'{'",
            TokenKind::RCurly => "'}'",
            TokenKind::KwInt => "'int'",
            TokenKind::KwVoid => "'void'",
            TokenKind::KwReturn => "'return'",
            TokenKind::KwConst => "'const'",
            TokenKind::RunAsm => "'Run.Asm'",
            TokenKind::RunAsmBlock => "'Run.AsmBlock'",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Number(_) => "integer",
            TokenKind::Text(_) => "string",
            TokenKind::Eof => "end of input",
        }
    }
}

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(line: usize, col: usize) -> Self {
        Pos { line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}
