pub mod analyze;
pub mod codegen;
pub mod error;
pub mod grammer;

pub use analyze::{analyze, Analysis};
pub use codegen::code::{Code, Line};
pub use codegen::{generate, Generator, DEFAULT_REGISTERS};
pub use error::Error;
pub use grammer::lexer::scan;
pub use grammer::parser::parse;
pub use grammer::token::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Size of the work register pool
    pub registers: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            registers: DEFAULT_REGISTERS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub code: Code,
    pub raw_asm_used: bool,
}

impl Compiled {
    pub fn asm(&self) -> String {
        self.code.to_string()
    }
}

/// Compile one source string to assembly.
pub fn compile(source: &str) -> Result<Compiled, Error> {
    compile_with(source, &Options::default())
}

pub fn compile_with(source: &str, options: &Options) -> Result<Compiled, Error> {
    let tokens = scan(source)?;
    let program = parse(tokens)?;
    let analysis = analyze(&program)?;
    let code = Generator::new(&analysis.symbols, options.registers).run(&program)?;
    Ok(Compiled {
        code,
        raw_asm_used: analysis.raw_asm_used,
    })
}
