use arch::{Imm, Inst, Ptr, Reg};
use pretty_assertions::assert_eq;
use zcc::error::{Error, GenError};
use zcc::{analyze, compile, compile_with, generate, parse, scan, Line, Options};

fn asm(code: &str) -> String {
    compile(code).unwrap().asm()
}

macro_rules! case {
    ($code:expr, [$($line:expr),* $(,)?]) => {{
        let output = asm($code);
        println!("{output}");
        let expects: Vec<&str> = vec![$($line),*];
        assert_eq!(output, expects.join("\n"));
    }};
}

#[test]
fn constant_return() {
    case!(
        "const int A = 5; int main() { return A; }",
        [
            "; Z++ Compiler Output",
            "; --- Symbol Definitions ---",
            ".define A = 5",
            "",
            "    JMP _start",
            "",
            "main:",
            "    LDI r5, A",
            "    MOV r5, r15",
            "    RET",
            "",
            "_start:",
            "    ; --- Main Execution ---",
            "    CAL main",
            "    HLT",
        ]
    );
}

#[test]
fn subtraction() {
    case!(
        "int main() { return 10 - 3; }",
        [
            "; Z++ Compiler Output",
            "    JMP _start",
            "",
            "main:",
            "    LDI r5, 10",
            "    LDI r6, 3",
            "    SUB r5, r6, r5",
            "    MOV r5, r15",
            "    RET",
            "",
            "_start:",
            "    ; --- Main Execution ---",
            "    CAL main",
            "    HLT",
        ]
    );
}

#[test]
fn global_variable() {
    case!(
        "int x = 7; int main() { x = x + 1; return x; }",
        [
            "; Z++ Compiler Output",
            "    JMP _start",
            "",
            "main:",
            "    API ap1, 0",
            "    MLD r5, ap1, 0",
            "    LDI r6, 1",
            "    ADD r5, r6, r5",
            "    API ap1, 0",
            "    MST r5, ap1, 0",
            "    API ap1, 0",
            "    MLD r5, ap1, 0",
            "    MOV r5, r15",
            "    RET",
            "",
            "_start:",
            "    ; --- Global Variable Initialization ---",
            "    ; Initialize x to 7",
            "    LDI r1, 7",
            "    API ap1, 0",
            "    MST r1, ap1, 0",
            "    ; --- Main Execution ---",
            "    CAL main",
            "    HLT",
        ]
    );
}

#[test]
fn global_initializers() {
    let output = asm("const int B = 9; int x; int y = B; int z = 4; int main() { return 0; }");
    let init: Vec<_> = output
        .lines()
        .skip_while(|line| *line != "_start:")
        .collect();
    assert_eq!(
        init,
        vec![
            "_start:",
            "    ; --- Global Variable Initialization ---",
            "    ; Initialize x to 0",
            "    LDI r1, 0",
            "    API ap1, 0",
            "    MST r1, ap1, 0",
            "    ; Initialize y to 9",
            "    LDI r1, 9",
            "    API ap1, 1",
            "    MST r1, ap1, 0",
            "    ; Initialize z to 4",
            "    LDI r1, 4",
            "    API ap1, 2",
            "    MST r1, ap1, 0",
            "    ; --- Main Execution ---",
            "    CAL main",
            "    HLT",
        ]
    );
}

#[test]
fn functions_in_declaration_order() {
    case!(
        "void b() { a(); } int main() { b(); return 1; } void a() { return; }",
        [
            "; Z++ Compiler Output",
            "    JMP _start",
            "",
            "b:",
            "    CAL a",
            "    RET",
            "",
            "main:",
            "    CAL b",
            "    LDI r5, 1",
            "    MOV r5, r15",
            "    RET",
            "",
            "a:",
            "    RET",
            "",
            "_start:",
            "    ; --- Main Execution ---",
            "    CAL main",
            "    HLT",
        ]
    );
}

#[test]
fn raw_assembly() {
    case!(
        "int main() {\n  Run.Asm(\"NOP\");\n  Run.AsmBlock {\n    HLT // stop\n  }\n  return 0;\n}",
        [
            "; Z++ Compiler Output",
            "    JMP _start",
            "",
            "main:",
            "    ; Run.Asm",
            "    NOP",
            "    ; Run.AsmBlock",
            "",
            "    HLT ",
            "  ",
            "    LDI r5, 0",
            "    MOV r5, r15",
            "    RET",
            "",
            "_start:",
            "    ; --- Main Execution ---",
            "    CAL main",
            "    HLT",
        ]
    );
}

#[test]
fn raw_assembly_is_not_validated() {
    let compiled = compile("int main() { Run.Asm(\"BOGUS r99\"); return 0; }").unwrap();
    assert!(compiled.raw_asm_used);
    assert!(compiled.asm().contains("\n    BOGUS r99\n"));
}

#[test]
fn operators() {
    let options = Options { registers: 5 };
    let compiled = compile_with("int main() { return 6 * 7 / 2 % 5 + 1; }", &options).unwrap();
    let arith: Vec<_> = compiled
        .code
        .insts()
        .filter(|inst| inst.op().is_arith())
        .cloned()
        .collect();
    // Right-recursive: the innermost operation is emitted first
    assert_eq!(
        arith,
        vec![
            Inst::ADD(Reg::R8, Reg::R9, Reg::R8),
            Inst::MOD(Reg::R7, Reg::R8, Reg::R7),
            Inst::DIV(Reg::R6, Reg::R7, Reg::R6),
            Inst::MUL(Reg::R5, Reg::R6, Reg::R5),
        ]
    );
}

#[test]
fn registers_exactly_enough() {
    // Three operands need all three default registers
    let compiled = compile("int main() { return 1 - 2 - 3; }").unwrap();
    let insts: Vec<_> = compiled.code.insts().cloned().collect();
    assert_eq!(
        insts[1..6].to_vec(),
        vec![
            Inst::LDI(Reg::R5, Imm::Literal(1)),
            Inst::LDI(Reg::R6, Imm::Literal(2)),
            Inst::LDI(Reg::R7, Imm::Literal(3)),
            Inst::SUB(Reg::R6, Reg::R7, Reg::R6),
            Inst::SUB(Reg::R5, Reg::R6, Reg::R5),
        ]
    );
}

#[test]
fn out_of_registers() {
    let code = "int main() { return 1 - 2 - 3 - 4 - 5; }";
    assert_eq!(
        compile(code).unwrap_err(),
        Error::Gen(GenError::OutOfRegisters)
    );

    let options = Options { registers: 5 };
    assert!(compile_with(code, &options).is_ok());

    let options = Options { registers: 4 };
    assert_eq!(
        compile_with(code, &options).unwrap_err().to_string(),
        "Generator error: expression too complex: out of registers"
    );
}

#[test]
fn registers_are_released_between_statements() {
    let compiled =
        compile("int x; int main() { x = 1 - 2 - 3; x = 4 - 5 - 6; return 7 - 8 - 9; }").unwrap();
    let regs: Vec<_> = compiled
        .code
        .insts()
        .filter_map(|inst| match inst {
            Inst::LDI(reg, Imm::Literal(_)) if *reg != Reg::INIT => Some(*reg),
            _ => None,
        })
        .collect();
    assert_eq!(regs, [Reg::R5, Reg::R6, Reg::R7].repeat(3));
}

#[test]
fn binary_initializer() {
    assert_eq!(
        compile("const int A = 1; int x = A + 2; int main() { return x; }").unwrap_err(),
        Error::Gen(GenError::NonConstantInitializer("x".into()))
    );
}

#[test]
fn function_as_value() {
    assert_eq!(
        compile("void f() {} int main() { return f; }").unwrap_err(),
        Error::Gen(GenError::UnsupportedExpression("f".into()))
    );
}

#[test]
fn generate_with_defaults() {
    let program = parse(scan("int g = 3; int main() { g = g * g; return g; }").unwrap()).unwrap();
    let analysis = analyze(&program).unwrap();
    let code = generate(&program, &analysis.symbols).unwrap();

    assert_eq!(code.0.first(), Some(&Line::Comment("Z++ Compiler Output".into())));
    assert_eq!(code.0.last(), Some(&Line::Inst(Inst::HLT())));
    assert!(code
        .insts()
        .any(|inst| *inst == Inst::MST(Reg::R5, Ptr::ADDR, 0)));
    assert!(code.0.contains(&Line::Label("_start".into())));
}

#[test]
fn deterministic() {
    let code = "const int K = 3;\nint a = K;\nint b;\nvoid f() { b = a * K; }\nint main() { f(); Run.Asm(\"NOP\"); return b - a; }";
    assert_eq!(asm(code), asm(code));
    assert_eq!(compile(code).unwrap(), compile(code).unwrap());
}
