use crate::grammer::token::{Pos, Token, TokenKind};
use std::fmt;
use thiserror::Error;

// Token information for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ('{}') at {}", self.kind.describe(), self.text, self.pos)
    }
}

impl From<&Token> for TokenInfo {
    fn from(token: &Token) -> Self {
        TokenInfo {
            kind: token.kind.clone(),
            text: token.text.clone(),
            pos: token.pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{0}' at {1}")]
    UnexpectedChar(char, Pos),

    #[error("unterminated string literal at {0}")]
    UnterminatedString(Pos),

    #[error("unterminated block comment at {0}")]
    UnterminatedComment(Pos),

    #[error("integer literal {0} is out of range at {1}")]
    IntegerOutOfRange(String, Pos),

    #[error("missing '{{' after Run.AsmBlock at {0}")]
    MissingOpeningBrace(Pos),

    #[error("unterminated Run.AsmBlock at {0}")]
    UnterminatedBlock(Pos),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("expected {0} but got {1}")]
    Expected(&'static str, TokenInfo),

    #[error("unexpected token in expression: {0}")]
    UnexpectedInExpr(TokenInfo),

    #[error("unexpected token in statement: {0}")]
    UnexpectedInStmt(TokenInfo),

    #[error("unexpected token in declaration: {0}")]
    UnexpectedInDecl(TokenInfo),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("{0} is already defined at {1}")]
    Redeclared(String, Pos),

    #[error("{0} is not declared at {1}")]
    NotDeclared(String, Pos),

    #[error("cannot assign to constant {0} at {1}")]
    AssignToConstant(String, Pos),

    #[error("cannot assign to function {0} at {1}")]
    AssignToFunction(String, Pos),

    #[error("{0} is not defined at {1}")]
    NotDefined(String, Pos),

    #[error("function {0} is not defined at {1}")]
    FunctionNotDefined(String, Pos),

    #[error("global variable initializer must be a constant expression at {0}")]
    NonConstantInitializer(Pos),

    #[error("constant value must be a constant expression at {0}")]
    NonConstantValue(Pos),

    #[error("constant initializer must be a literal at {0}")]
    NonLiteralConstant(Pos),

    #[error("entry point 'int main()' not found")]
    MissingEntryPoint,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    #[error("expression too complex: out of registers")]
    OutOfRegisters,

    #[error("unsupported expression: {0} is a function")]
    UnsupportedExpression(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("initializer of global variable {0} cannot be evaluated at compile time")]
    NonConstantInitializer(String),
}

// Unified error type for the compiler pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("Generator error: {0}")]
    Gen(#[from] GenError),
}

impl LexError {
    pub fn pos(&self) -> Pos {
        match self {
            LexError::UnexpectedChar(_, pos)
            | LexError::UnterminatedString(pos)
            | LexError::UnterminatedComment(pos)
            | LexError::IntegerOutOfRange(_, pos)
            | LexError::MissingOpeningBrace(pos)
            | LexError::UnterminatedBlock(pos) => *pos,
        }
    }
}

impl SyntaxError {
    pub fn pos(&self) -> Pos {
        match self {
            SyntaxError::Expected(_, token)
            | SyntaxError::UnexpectedInExpr(token)
            | SyntaxError::UnexpectedInStmt(token)
            | SyntaxError::UnexpectedInDecl(token) => token.pos,
        }
    }
}

impl SemanticError {
    pub fn pos(&self) -> Option<Pos> {
        match self {
            SemanticError::Redeclared(_, pos)
            | SemanticError::NotDeclared(_, pos)
            | SemanticError::AssignToConstant(_, pos)
            | SemanticError::AssignToFunction(_, pos)
            | SemanticError::NotDefined(_, pos)
            | SemanticError::FunctionNotDefined(_, pos)
            | SemanticError::NonConstantInitializer(pos)
            | SemanticError::NonConstantValue(pos)
            | SemanticError::NonLiteralConstant(pos) => Some(*pos),
            SemanticError::MissingEntryPoint => None,
        }
    }
}

impl Error {
    /// Location of the offending token or node, if known.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            Error::Lex(e) => Some(e.pos()),
            Error::Syntax(e) => Some(e.pos()),
            Error::Semantic(e) => e.pos(),
            Error::Gen(_) => None,
        }
    }

    /// Name of the pipeline stage that failed.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex(_) => "lexical",
            Error::Syntax(_) => "syntax",
            Error::Semantic(_) => "semantic",
            Error::Gen(_) => "generator",
        }
    }
}
