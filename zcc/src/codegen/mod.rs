//! Translation of an analyzed program into target assembly.
//!
//! Layout of the output:
//! 1. `.define` for every constant
//! 2. jump to the initialization block
//! 3. every function, each ending in `RET`
//! 4. `_start`: initialize globals, call `main`, halt
//!
//! Everything is emitted in declaration order.

pub mod code;
pub mod pool;

use crate::analyze::symbols::{Symbol, SymbolKind, SymbolTable};
use crate::analyze::ENTRY_POINT;
use crate::error::GenError;
use crate::grammer::ast::{BinaryOp, Block, Decl, Expr, Program, Stmt};
use arch::{Imm, Inst, Ptr, Reg};
use code::{Code, Line};
use pool::RegisterPool;

pub const START_LABEL: &str = "_start";

/// Number of work registers when nothing else is configured.
pub const DEFAULT_REGISTERS: usize = 3;

pub fn generate(program: &Program, symbols: &SymbolTable) -> Result<Code, GenError> {
    Generator::new(symbols, DEFAULT_REGISTERS).run(program)
}

pub struct Generator<'s, 'a> {
    symbols: &'s SymbolTable<'a>,
    pool: RegisterPool,
    code: Code,
}

impl<'s, 'a> Generator<'s, 'a> {
    pub fn new(symbols: &'s SymbolTable<'a>, registers: usize) -> Self {
        Self {
            symbols,
            pool: RegisterPool::new(registers),
            code: Code::default(),
        }
    }

    pub fn run(mut self, program: &Program) -> Result<Code, GenError> {
        self.code.comment("Z++ Compiler Output");

        // 1. Symbol definitions
        let consts: Vec<_> = self.symbols.constants().collect();
        if !consts.is_empty() {
            self.code.comment("--- Symbol Definitions ---");
            for (sym, value) in consts {
                self.code.push(Line::Define(sym.name.to_string(), value));
            }
            self.code.push(Line::Blank);
        }

        // 2. Entry jump
        self.code.inst(Inst::JMP(START_LABEL.to_string()));
        self.code.push(Line::Blank);

        // 3. Functions
        for decl in &program.0 {
            if let Decl::Func(name, _, body, _) = decl {
                self.code.label(name.clone());
                self.gen_block(body)?;
                self.code.inst(Inst::RET());
                self.code.push(Line::Blank);
            }
        }

        // 4. Initialization block
        self.code.label(START_LABEL);
        self.gen_globals()?;

        // 5. Run main
        self.code.remark("--- Main Execution ---");
        self.code.inst(Inst::CAL(ENTRY_POINT.to_string()));
        self.code.inst(Inst::HLT());

        Ok(self.code)
    }

    fn lookup(&self, name: &str) -> Result<&'s Symbol<'a>, GenError> {
        self.symbols
            .get(name)
            .ok_or_else(|| GenError::UnknownSymbol(name.to_string()))
    }
}

// ----------------------------------------------------------------------------
// Globals
// ----------------------------------------------------------------------------

impl<'s, 'a> Generator<'s, 'a> {
    fn gen_globals(&mut self) -> Result<(), GenError> {
        let vars: Vec<_> = self.symbols.variables().collect();
        if vars.is_empty() {
            return Ok(());
        }

        self.code.remark("--- Global Variable Initialization ---");
        for (sym, address) in vars {
            let value = self.fold_initializer(sym)?;
            self.code.remark(format!("Initialize {} to {}", sym.name, value));
            self.code.inst(Inst::LDI(Reg::INIT, Imm::Literal(value)));
            self.code.inst(Inst::API(Ptr::ADDR, address));
            self.code.inst(Inst::MST(Reg::INIT, Ptr::ADDR, 0));
        }
        Ok(())
    }

    /// Compile-time value of a global's initializer. Only a literal or a
    /// constant reference is folded; a missing initializer means 0.
    fn fold_initializer(&self, sym: &Symbol<'a>) -> Result<i64, GenError> {
        let init = match sym.decl {
            Decl::Var(_, _, init, _) => init.as_ref(),
            _ => None,
        };
        match init {
            None => Ok(0),
            Some(Expr::NumberLit(value, _)) => Ok(*value),
            Some(Expr::Ident(ident)) => match self.lookup(&ident.name)?.kind {
                SymbolKind::Constant { value } => Ok(value),
                _ => Err(GenError::NonConstantInitializer(sym.name.to_string())),
            },
            Some(Expr::Binary(..)) => Err(GenError::NonConstantInitializer(sym.name.to_string())),
        }
    }
}

// ----------------------------------------------------------------------------
// Statements
// ----------------------------------------------------------------------------

impl<'s, 'a> Generator<'s, 'a> {
    fn gen_block(&mut self, block: &Block) -> Result<(), GenError> {
        for stmt in &block.0 {
            self.gen_stmt(stmt)?;
        }
        Ok(())
    }

    fn gen_stmt(&mut self, stmt: &Stmt) -> Result<(), GenError> {
        match stmt {
            Stmt::Return(arg, _) => {
                if let Some(arg) = arg {
                    let reg = self.gen_expr(arg)?;
                    if reg != Reg::RET {
                        self.code.inst(Inst::MOV(reg, Reg::RET));
                    }
                    self.pool.release(reg);
                }
            }
            Stmt::Assign(target, value, _) => {
                let SymbolKind::Variable { address } = self.lookup(&target.name)?.kind else {
                    return Err(GenError::UnknownSymbol(target.name.clone()));
                };
                let reg = self.gen_expr(value)?;
                self.code.inst(Inst::API(Ptr::ADDR, address));
                self.code.inst(Inst::MST(reg, Ptr::ADDR, 0));
                self.pool.release(reg);
            }
            Stmt::Call(name, _) => {
                self.code.inst(Inst::CAL(name.clone()));
            }
            Stmt::RunAsm(text, _) => {
                self.code.remark("Run.Asm");
                self.code.push(Line::Raw(format!("    {text}")));
            }
            Stmt::RunAsmBlock(text, _) => {
                self.code.remark("Run.AsmBlock");
                self.code.push(Line::Raw(text.clone()));
            }
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Expressions
// ----------------------------------------------------------------------------

impl<'s, 'a> Generator<'s, 'a> {
    /// Evaluate into a pool register. The caller releases it.
    fn gen_expr(&mut self, expr: &Expr) -> Result<Reg, GenError> {
        match expr {
            Expr::NumberLit(value, _) => {
                let reg = self.pool.acquire()?;
                self.code.inst(Inst::LDI(reg, Imm::Literal(*value)));
                Ok(reg)
            }
            Expr::Ident(ident) => match self.lookup(&ident.name)?.kind {
                // Resolved by the assembler through `.define`
                SymbolKind::Constant { .. } => {
                    let reg = self.pool.acquire()?;
                    self.code.inst(Inst::LDI(reg, Imm::Symbol(ident.name.clone())));
                    Ok(reg)
                }
                SymbolKind::Variable { address } => {
                    let reg = self.pool.acquire()?;
                    self.code.inst(Inst::API(Ptr::ADDR, address));
                    self.code.inst(Inst::MLD(reg, Ptr::ADDR, 0));
                    Ok(reg)
                }
                SymbolKind::Function => Err(GenError::UnsupportedExpression(ident.name.clone())),
            },
            Expr::Binary(op, lhs, rhs, _) => {
                let l = self.gen_expr(lhs)?;
                let r = self.gen_expr(rhs)?;
                self.code.inst(match op {
                    BinaryOp::Add => Inst::ADD(l, r, l),
                    BinaryOp::Sub => Inst::SUB(l, r, l),
                    BinaryOp::Mul => Inst::MUL(l, r, l),
                    BinaryOp::Div => Inst::DIV(l, r, l),
                    BinaryOp::Mod => Inst::MOD(l, r, l),
                });
                self.pool.release(r);
                Ok(l)
            }
        }
    }
}
