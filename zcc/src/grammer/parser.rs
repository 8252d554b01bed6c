use super::ast::{BinaryOp, Block, Decl, Expr, Ident, Program, Stmt, Type};
use super::parsercore::Parser;
use super::token::{Token, TokenKind, TokenKind::*};
use crate::error::SyntaxError;
use crate::{check, expect, repeat};

/// Build the syntax tree of a whole program.
pub fn parse(tokens: Vec<Token>) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse()
}

impl Parser {
    pub fn parse(mut self) -> Result<Program, SyntaxError> {
        let mut decls = Vec::new();
        while !check!(self, Eof) {
            decls.push(self.parse_decl()?);
        }
        Ok(Program(decls))
    }
}

impl Parser {
    /// decl = const-decl | var-decl | func-decl
    fn parse_decl(&mut self) -> Result<Decl, SyntaxError> {
        let token = self.peek().clone();
        match token.kind {
            // const-decl = "const" "int" ident "=" expr ";"
            KwConst => {
                expect!(self, KwConst)?;
                expect!(self, KwInt)?;
                let name = self.parse_ident()?.name;
                expect!(self, Equal)?;
                let value = self.parse_expr()?;
                expect!(self, Semicolon)?;
                Ok(Decl::Const(name, value, token.pos))
            }

            // func-decl = ( "int" | "void" ) ident "(" ")" block
            // var-decl  = "int" ident [ "=" expr ] ";"
            KwInt | KwVoid => {
                let ty = self.parse_type()?;
                let name = self.parse_ident()?.name;

                if check!(self, LParen) || ty == Type::Void {
                    expect!(self, LParen)?;
                    expect!(self, RParen)?;
                    let body = self.parse_block()?;
                    return Ok(Decl::Func(name, ty, body, token.pos));
                }

                let init = if check!(self, Equal) {
                    expect!(self, Equal)?;
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                expect!(self, Semicolon)?;
                Ok(Decl::Var(name, ty, init, token.pos))
            }

            _ => Err(SyntaxError::UnexpectedInDecl((&token).into())),
        }
    }

    /// type = "int" | "void"
    fn parse_type(&mut self) -> Result<Type, SyntaxError> {
        match self.peek().kind {
            KwInt => {
                expect!(self, KwInt)?;
                Ok(Type::Int)
            }
            KwVoid => {
                expect!(self, KwVoid)?;
                Ok(Type::Void)
            }
            _ => Err(SyntaxError::Expected("type", self.peek().into())),
        }
    }

    /// block = "{" { stmt } "}"
    fn parse_block(&mut self) -> Result<Block, SyntaxError> {
        let open = expect!(self, LCurly)?;
        let stmts = repeat!(self, self.parse_stmt(), RCurly);
        expect!(self, RCurly)?;
        Ok(Block(stmts, open.pos))
    }

    /// stmt = return-stmt | call-stmt | assign-stmt | run-asm-stmt | run-asm-block-stmt
    fn parse_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let token = self.peek().clone();
        match &token.kind {
            // return-stmt = "return" [ expr ] ";"
            KwReturn => {
                expect!(self, KwReturn)?;
                let arg = if check!(self, Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                expect!(self, Semicolon)?;
                Ok(Stmt::Return(arg, token.pos))
            }

            // call-stmt = ident "(" ")" ";"
            TokenKind::Ident(_) if matches!(self.peek_nth(1).kind, LParen) => {
                let name = self.parse_ident()?.name;
                expect!(self, LParen)?;
                expect!(self, RParen)?;
                expect!(self, Semicolon)?;
                Ok(Stmt::Call(name, token.pos))
            }

            // assign-stmt = ident "=" expr ";"
            TokenKind::Ident(_) if matches!(self.peek_nth(1).kind, Equal) => {
                let target = self.parse_ident()?;
                expect!(self, Equal)?;
                let value = self.parse_expr()?;
                expect!(self, Semicolon)?;
                Ok(Stmt::Assign(target, value, token.pos))
            }

            // run-asm-stmt = "Run.Asm" "(" string ")" ";"
            RunAsm => {
                expect!(self, RunAsm)?;
                expect!(self, LParen)?;
                let code = self.parse_text()?;
                expect!(self, RParen)?;
                expect!(self, Semicolon)?;
                Ok(Stmt::RunAsm(code, token.pos))
            }

            // run-asm-block-stmt = "Run.AsmBlock" string
            // (the lexer has already captured the braced body as a string)
            RunAsmBlock => {
                expect!(self, RunAsmBlock)?;
                let code = self.parse_text()?;
                Ok(Stmt::RunAsmBlock(code, token.pos))
            }

            _ => Err(SyntaxError::UnexpectedInStmt((&token).into())),
        }
    }

    /// expr = primary [ binop expr ]
    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.parse_primary()?;
        let op = match self.peek().kind {
            Plus => BinaryOp::Add,
            Minus => BinaryOp::Sub,
            Star => BinaryOp::Mul,
            Slash => BinaryOp::Div,
            Percent => BinaryOp::Mod,
            _ => return Ok(left),
        };
        self.next();
        let right = self.parse_expr()?;
        let pos = left.pos();
        Ok(Expr::Binary(op, Box::new(left), Box::new(right), pos))
    }

    /// primary = num-lit | ident
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.peek().clone();
        match token.kind {
            Number(value) => {
                self.next();
                Ok(Expr::NumberLit(value, token.pos))
            }
            TokenKind::Ident(_) => Ok(Expr::Ident(self.parse_ident()?)),
            _ => Err(SyntaxError::UnexpectedInExpr((&token).into())),
        }
    }

    fn parse_ident(&mut self) -> Result<Ident, SyntaxError> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                let token = self.next();
                Ok(Ident {
                    name,
                    pos: token.pos,
                })
            }
            _ => Err(SyntaxError::Expected("identifier", self.peek().into())),
        }
    }

    fn parse_text(&mut self) -> Result<String, SyntaxError> {
        match self.peek().kind.clone() {
            Text(code) => {
                self.next();
                Ok(code)
            }
            _ => Err(SyntaxError::Expected("string", self.peek().into())),
        }
    }
}
