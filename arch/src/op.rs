use strum::{Display, EnumString};

/// Instruction mnemonics understood by the target assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Op {
    LDI,
    API,
    MLD,
    MST,
    ADD,
    SUB,
    MUL,
    DIV,
    MOD,
    MOV,
    CAL,
    RET,
    JMP,
    HLT,
    NOP,
}

impl Op {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    /// Three-register arithmetic: `OP lhs, rhs, dst`
    pub fn is_arith(&self) -> bool {
        matches!(self, Op::ADD | Op::SUB | Op::MUL | Op::DIV | Op::MOD)
    }

    /// Transfers control to a label.
    pub fn is_ctrl(&self) -> bool {
        matches!(self, Op::CAL | Op::RET | Op::JMP | Op::HLT)
    }
}

#[test]
fn test() {
    assert_eq!(Op::parse("ldi"), Ok(Op::LDI));
    assert_eq!(Op::parse("Hlt"), Ok(Op::HLT));
    assert!(Op::parse("hoge").is_err());
    assert!(Op::MOD.is_arith());
    assert!(!Op::MOV.is_arith());
    assert!(Op::CAL.is_ctrl());
}
