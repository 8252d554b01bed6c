use num_enum::{FromPrimitive, IntoPrimitive};
use strum::Display;

/// General purpose registers of the target machine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    FromPrimitive,
    IntoPrimitive,
    Display,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Reg {
    #[default]
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

/// Address pointer registers, used as the base of memory loads and stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Ptr {
    #[default]
    AP0,
    AP1,
    AP2,
    AP3,
}

impl Reg {
    /// Holds the result of a function when it returns.
    pub const RET: Reg = Reg::R15;
    /// Scratch register of the global initialization block.
    pub const INIT: Reg = Reg::R1;
    /// First register handed out to expression temporaries.
    pub const WORK_BASE: u8 = 5;
    /// Number of registers available to expression temporaries (r5..r14).
    pub const WORK_MAX: usize = 10;

    /// The first `count` work registers, lowest first.
    pub fn work(count: usize) -> Vec<Reg> {
        (0..count.min(Self::WORK_MAX) as u8)
            .map(|i| Reg::from(Self::WORK_BASE + i))
            .collect()
    }
}

impl Ptr {
    /// Effective address of global variables.
    pub const ADDR: Ptr = Ptr::AP1;
}
