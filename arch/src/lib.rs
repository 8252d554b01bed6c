pub mod inst;
pub mod op;
pub mod reg;

pub use inst::{Imm, Inst};
pub use op::Op;
pub use reg::{Ptr, Reg};
