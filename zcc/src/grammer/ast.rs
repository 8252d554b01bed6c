use super::token::Pos;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Program(pub Vec<Decl>); // program = { decl } EOF

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,  // "int"
    Void, // "void"
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Const(String, Expr, Pos),              // "const" "int" ident "=" expr ";"
    Var(String, Type, Option<Expr>, Pos),  // "int" ident [ "=" expr ] ";"
    Func(String, Type, Block, Pos),        // ( "int" | "void" ) ident "(" ")" block
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block(pub Vec<Stmt>, pub Pos); // "{" { stmt } "}"

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Return(Option<Expr>, Pos),  // "return" [ expr ] ";"
    Call(String, Pos),          // ident "(" ")" ";"
    Assign(Ident, Expr, Pos),   // ident "=" expr ";"
    RunAsm(String, Pos),        // "Run.Asm" "(" string ")" ";"
    RunAsmBlock(String, Pos),   // "Run.AsmBlock" "{" raw "}"
}

/// Raw assembly payloads (`Stmt::RunAsm`, `Stmt::RunAsmBlock`) are opaque:
/// nothing after the lexer looks inside them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryOp, Box<Expr>, Box<Expr>, Pos), // primary binop expr
    Ident(Ident),                                // ident
    NumberLit(i64, Pos),                         // num-lit
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, // "+"
    Sub, // "-"
    Mul, // "*"
    Div, // "/"
    Mod, // "%"
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Const(name, ..) | Decl::Var(name, ..) | Decl::Func(name, ..) => name,
        }
    }

    pub fn pos(&self) -> Pos {
        match self {
            Decl::Const(.., pos) | Decl::Var(.., pos) | Decl::Func(.., pos) => *pos,
        }
    }
}

impl Expr {
    pub fn pos(&self) -> Pos {
        match self {
            Expr::Binary(.., pos) | Expr::NumberLit(_, pos) => *pos,
            Expr::Ident(ident) => ident.pos,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Void => write!(f, "void"),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        };
        write!(f, "{symbol}")
    }
}
