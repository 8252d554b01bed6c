use pretty_assertions::assert_eq;
use zcc::analyze::symbols::SymbolKind;
use zcc::error::SemanticError;
use zcc::grammer::ast::{Program, Type};
use zcc::{analyze, parse, scan, Pos};

fn build(code: &str) -> Program {
    parse(scan(code).unwrap()).unwrap()
}

macro_rules! case {
    ($code:expr => Ok) => {{
        let program = build($code);
        let analysis = analyze(&program);
        assert!(analysis.is_ok(), "{:?}", analysis.err());
    }};
    ($code:expr => $err:expr) => {{
        let program = build($code);
        assert_eq!(analyze(&program).err(), Some($err));
    }};
}

#[test]
fn accepts() {
    case!("int main() { return 0; }" => Ok);
    case!("const int A = 1; int x = A; int main() { x = x + A; return x; }" => Ok);
    case!("void f() { return; } int main() { f(); return 0; }" => Ok);
    // Functions may call functions declared later
    case!("int main() { f(); return 0; } void f() {}" => Ok);
    // Constant expressions are fine for variables at this stage
    case!("const int A = 1; int x = A + 2; int main() { return x; }" => Ok);
}

#[test]
fn symbol_table() {
    let program = build(
        "const int A = 5;\nint x = 1;\nvoid f() {}\nint y;\nint main() { return A; }",
    );
    let analysis = analyze(&program).unwrap();
    let symbols = &analysis.symbols;

    let names: Vec<_> = symbols.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["A", "x", "f", "y", "main"]);
    assert_eq!(symbols.len(), 5);

    assert_eq!(symbols.get("A").unwrap().kind, SymbolKind::Constant { value: 5 });
    assert_eq!(symbols.get("f").unwrap().kind, SymbolKind::Function);
    assert_eq!(symbols.get("f").unwrap().ty, Type::Void);
    assert_eq!(symbols.get("main").unwrap().ty, Type::Int);
    assert!(symbols.get("nothing").is_none());

    // Slots count variables only
    let slots: Vec<_> = symbols.variables().map(|(s, a)| (s.name, a)).collect();
    assert_eq!(slots, vec![("x", 0), ("y", 1)]);

    let consts: Vec<_> = symbols.constants().map(|(s, v)| (s.name, v)).collect();
    assert_eq!(consts, vec![("A", 5)]);

    let funcs: Vec<_> = symbols.functions().map(|s| s.name).collect();
    assert_eq!(funcs, vec!["f", "main"]);

    assert!(!analysis.raw_asm_used);
}

#[test]
fn raw_asm_flag() {
    let program = build("int main() { Run.Asm(\"NOP\"); return 0; }");
    assert!(analyze(&program).unwrap().raw_asm_used);

    let program = build("void f() { Run.AsmBlock { anything at all } } int main() { return 0; }");
    assert!(analyze(&program).unwrap().raw_asm_used);
}

#[test]
fn assign_to_constant() {
    case!(
        "const int A = 1; int main() { A = 2; return 0; }"
            => SemanticError::AssignToConstant("A".into(), Pos::new(1, 31))
    );
}

#[test]
fn assign_to_function() {
    case!(
        "void f() {} int main() { f = 2; return 0; }"
            => SemanticError::AssignToFunction("f".into(), Pos::new(1, 26))
    );
}

#[test]
fn assign_to_undeclared() {
    case!(
        "int main() { y = 2; return 0; }"
            => SemanticError::NotDeclared("y".into(), Pos::new(1, 14))
    );
}

#[test]
fn undefined_identifier() {
    case!(
        "int main() { return X; }"
            => SemanticError::NotDefined("X".into(), Pos::new(1, 21))
    );
    case!(
        "int x; int main() { x = 1 + z; return 0; }"
            => SemanticError::NotDefined("z".into(), Pos::new(1, 29))
    );
}

#[test]
fn undefined_function() {
    case!(
        "int main() { g(); return 0; }"
            => SemanticError::FunctionNotDefined("g".into(), Pos::new(1, 14))
    );
    case!(
        "int g; int main() { g(); return 0; }"
            => SemanticError::FunctionNotDefined("g".into(), Pos::new(1, 21))
    );
}

#[test]
fn missing_entry_point() {
    case!("" => SemanticError::MissingEntryPoint);
    case!("void f() {}" => SemanticError::MissingEntryPoint);
    case!("void main() {}" => SemanticError::MissingEntryPoint);
    case!("int main;" => SemanticError::MissingEntryPoint);
}

#[test]
fn redeclaration() {
    case!(
        "int x;\nint x;\nint main() { return 0; }"
            => SemanticError::Redeclared("x".into(), Pos::new(2, 1))
    );
    case!(
        "const int f = 1;\nvoid f() {}\nint main() { return 0; }"
            => SemanticError::Redeclared("f".into(), Pos::new(2, 1))
    );
}

#[test]
fn non_constant_initializer() {
    case!(
        "int y = 1;\nint x = y;\nint main() { return 0; }"
            => SemanticError::NonConstantInitializer(Pos::new(2, 9))
    );
    // Constants must be declared before use
    case!(
        "int x = A;\nconst int A = 1;\nint main() { return 0; }"
            => SemanticError::NonConstantInitializer(Pos::new(1, 9))
    );
}

#[test]
fn constant_values() {
    case!(
        "int y;\nconst int B = y;\nint main() { return 0; }"
            => SemanticError::NonConstantValue(Pos::new(2, 15))
    );
    case!(
        "const int A = 1;\nconst int B = A;\nint main() { return 0; }"
            => SemanticError::NonLiteralConstant(Pos::new(2, 15))
    );
    case!(
        "const int B = 1 + 2;\nint main() { return 0; }"
            => SemanticError::NonLiteralConstant(Pos::new(1, 15))
    );
}

#[test]
fn first_error_wins() {
    case!(
        "int main() { return X; }\nint main;"
            => SemanticError::Redeclared("main".into(), Pos::new(2, 1))
    );
}

#[test]
fn error_message() {
    let program = build("int main() { return X; }");
    let err = analyze(&program).unwrap_err();
    assert_eq!(err.to_string(), "X is not defined at line 1, column 21");
}
