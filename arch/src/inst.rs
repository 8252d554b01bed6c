use crate::{op::Op, reg::Ptr, reg::Reg};
use color_print::cformat;
use std::fmt;

/// Immediate operand: a literal, or a symbol resolved by the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(i64),
    Symbol(String),
}

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imm::Literal(value) => write!(f, "{value}"),
            Imm::Symbol(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    LDI(Reg, Imm),
    API(Ptr, usize),
    MLD(Reg, Ptr, u16),
    MST(Reg, Ptr, u16),

    // lhs, rhs, dst
    ADD(Reg, Reg, Reg),
    SUB(Reg, Reg, Reg),
    MUL(Reg, Reg, Reg),
    DIV(Reg, Reg, Reg),
    MOD(Reg, Reg, Reg),

    // src, dst
    MOV(Reg, Reg),

    CAL(String),
    JMP(String),
    RET(),
    HLT(),
    NOP(),
}

impl Inst {
    pub fn op(&self) -> Op {
        match self {
            Inst::LDI(..) => Op::LDI,
            Inst::API(..) => Op::API,
            Inst::MLD(..) => Op::MLD,
            Inst::MST(..) => Op::MST,
            Inst::ADD(..) => Op::ADD,
            Inst::SUB(..) => Op::SUB,
            Inst::MUL(..) => Op::MUL,
            Inst::DIV(..) => Op::DIV,
            Inst::MOD(..) => Op::MOD,
            Inst::MOV(..) => Op::MOV,
            Inst::CAL(..) => Op::CAL,
            Inst::JMP(..) => Op::JMP,
            Inst::RET() => Op::RET,
            Inst::HLT() => Op::HLT,
            Inst::NOP() => Op::NOP,
        }
    }

    fn args(&self) -> Vec<String> {
        match self {
            Inst::LDI(rd, imm) => vec![rd.to_string(), imm.to_string()],
            Inst::API(ap, slot) => vec![ap.to_string(), slot.to_string()],
            Inst::MLD(rd, ap, off) => vec![rd.to_string(), ap.to_string(), off.to_string()],
            Inst::MST(rs, ap, off) => vec![rs.to_string(), ap.to_string(), off.to_string()],
            Inst::ADD(lhs, rhs, rd)
            | Inst::SUB(lhs, rhs, rd)
            | Inst::MUL(lhs, rhs, rd)
            | Inst::DIV(lhs, rhs, rd)
            | Inst::MOD(lhs, rhs, rd) => vec![lhs.to_string(), rhs.to_string(), rd.to_string()],
            Inst::MOV(rs, rd) => vec![rs.to_string(), rd.to_string()],
            Inst::CAL(label) | Inst::JMP(label) => vec![label.clone()],
            Inst::RET() | Inst::HLT() | Inst::NOP() => vec![],
        }
    }

    pub fn cformat(&self) -> String {
        let op = self.op();
        let name = op.to_string();
        let args = self.args().join(", ");
        if op.is_ctrl() {
            cformat!("<m>{:<4}</><g>{}</>", name, args)
        } else if op.is_arith() {
            cformat!("<r>{:<4}</><b>{}</>", name, args)
        } else {
            cformat!("<c>{:<4}</><b>{}</>", name, args)
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.args();
        if args.is_empty() {
            write!(f, "{}", self.op())
        } else {
            write!(f, "{} {}", self.op(), args.join(", "))
        }
    }
}
