//! Declaration collection and body validation.
//!
//! The first pass walks the top-level declarations in source order and
//! binds each name in one flat global table. Variables get consecutive
//! memory slots starting at 0. The second pass checks every function body
//! against that table. Both passes stop at the first violation.

pub mod symbols;

use crate::error::SemanticError;
use crate::grammer::ast::{Block, Decl, Expr, Program, Stmt, Type};
use symbols::{Symbol, SymbolKind, SymbolTable};

pub const ENTRY_POINT: &str = "main";

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    pub program: &'a Program,
    pub symbols: SymbolTable<'a>,
    /// Set when any `Run.Asm` / `Run.AsmBlock` was found. Their payload is never checked.
    pub raw_asm_used: bool,
}

pub fn analyze(program: &Program) -> Result<Analysis<'_>, SemanticError> {
    let mut analyzer = Analyzer::default();
    analyzer.collect(program)?;
    analyzer.check_entry_point()?;
    analyzer.validate(program)?;
    Ok(Analysis {
        program,
        symbols: analyzer.symbols,
        raw_asm_used: analyzer.raw_asm_used,
    })
}

#[derive(Default)]
struct Analyzer<'a> {
    symbols: SymbolTable<'a>,
    next_slot: usize,
    raw_asm_used: bool,
}

// ----------------------------------------------------------------------------
// Pass 1: declarations
// ----------------------------------------------------------------------------

impl<'a> Analyzer<'a> {
    fn collect(&mut self, program: &'a Program) -> Result<(), SemanticError> {
        for decl in &program.0 {
            let name = decl.name();
            if self.symbols.contains(name) {
                return Err(SemanticError::Redeclared(name.to_string(), decl.pos()));
            }

            let (kind, ty) = match decl {
                Decl::Func(_, ret, _, _) => (SymbolKind::Function, *ret),
                Decl::Var(_, ty, init, _) => {
                    if let Some(init) = init {
                        if !self.is_constant(init) {
                            return Err(SemanticError::NonConstantInitializer(init.pos()));
                        }
                    }
                    let address = self.next_slot;
                    self.next_slot += 1;
                    (SymbolKind::Variable { address }, *ty)
                }
                Decl::Const(_, value, _) => {
                    if !self.is_constant(value) {
                        return Err(SemanticError::NonConstantValue(value.pos()));
                    }
                    // Folding is not supported for constants themselves
                    let Expr::NumberLit(value, _) = value else {
                        return Err(SemanticError::NonLiteralConstant(value.pos()));
                    };
                    (SymbolKind::Constant { value: *value }, Type::Int)
                }
            };

            self.symbols.insert(Symbol {
                name,
                kind,
                ty,
                decl,
            });
        }
        Ok(())
    }

    /// Literal, declared constant, or binary combination of those.
    fn is_constant(&self, expr: &Expr) -> bool {
        match expr {
            Expr::NumberLit(..) => true,
            Expr::Ident(ident) => matches!(
                self.symbols.get(&ident.name),
                Some(Symbol {
                    kind: SymbolKind::Constant { .. },
                    ..
                })
            ),
            Expr::Binary(_, lhs, rhs, _) => self.is_constant(lhs) && self.is_constant(rhs),
        }
    }

    fn check_entry_point(&self) -> Result<(), SemanticError> {
        match self.symbols.get(ENTRY_POINT) {
            Some(Symbol {
                kind: SymbolKind::Function,
                ty: Type::Int,
                ..
            }) => Ok(()),
            _ => Err(SemanticError::MissingEntryPoint),
        }
    }
}

// ----------------------------------------------------------------------------
// Pass 2: function bodies
// ----------------------------------------------------------------------------

impl<'a> Analyzer<'a> {
    fn validate(&mut self, program: &Program) -> Result<(), SemanticError> {
        for decl in &program.0 {
            if let Decl::Func(_, _, body, _) = decl {
                self.visit_block(body)?;
            }
        }
        Ok(())
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), SemanticError> {
        for stmt in &block.0 {
            self.visit_stmt(stmt)?;
        }
        Ok(())
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::Return(arg, _) => {
                if let Some(arg) = arg {
                    self.visit_expr(arg)?;
                }
            }
            Stmt::Call(name, pos) => match self.symbols.get(name) {
                Some(Symbol {
                    kind: SymbolKind::Function,
                    ..
                }) => {}
                _ => return Err(SemanticError::FunctionNotDefined(name.clone(), *pos)),
            },
            Stmt::Assign(target, value, _) => {
                let name = target.name.clone();
                match self.symbols.get(&target.name).map(|sym| sym.kind) {
                    Some(SymbolKind::Variable { .. }) => {}
                    Some(SymbolKind::Constant { .. }) => {
                        return Err(SemanticError::AssignToConstant(name, target.pos))
                    }
                    Some(SymbolKind::Function) => {
                        return Err(SemanticError::AssignToFunction(name, target.pos))
                    }
                    None => return Err(SemanticError::NotDeclared(name, target.pos)),
                }
                self.visit_expr(value)?;
            }
            Stmt::RunAsm(..) | Stmt::RunAsmBlock(..) => self.raw_asm_used = true,
        }
        Ok(())
    }

    fn visit_expr(&self, expr: &Expr) -> Result<(), SemanticError> {
        match expr {
            Expr::NumberLit(..) => Ok(()),
            Expr::Ident(ident) => match self.symbols.contains(&ident.name) {
                true => Ok(()),
                false => Err(SemanticError::NotDefined(ident.name.clone(), ident.pos)),
            },
            Expr::Binary(_, lhs, rhs, _) => {
                self.visit_expr(lhs)?;
                self.visit_expr(rhs)
            }
        }
    }
}
