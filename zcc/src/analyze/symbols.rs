use crate::grammer::ast::{Decl, Type};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Variable { address: usize },
    Constant { value: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub kind: SymbolKind,
    pub ty: Type,
    pub decl: &'a Decl,
}

/// Global symbols in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable<'a>(pub IndexMap<&'a str, Symbol<'a>>);

impl<'a> SymbolTable<'a> {
    pub fn get(&self, name: &str) -> Option<&Symbol<'a>> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol<'a>> {
        self.0.values()
    }

    pub fn constants(&self) -> impl Iterator<Item = (&Symbol<'a>, i64)> {
        self.iter().filter_map(|sym| match sym.kind {
            SymbolKind::Constant { value } => Some((sym, value)),
            _ => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = (&Symbol<'a>, usize)> {
        self.iter().filter_map(|sym| match sym.kind {
            SymbolKind::Variable { address } => Some((sym, address)),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &Symbol<'a>> {
        self.iter()
            .filter(|sym| matches!(sym.kind, SymbolKind::Function))
    }

    pub(super) fn insert(&mut self, symbol: Symbol<'a>) {
        self.0.insert(symbol.name, symbol);
    }

    pub fn print(&self) {
        println!("=== Symbol Table ===");
        println!("{:<20} {:<10} {:<6} {:<10}", "Name", "Kind", "Type", "Value");
        println!("{:-<49}", "");
        for sym in self.iter() {
            let (kind, value) = match sym.kind {
                SymbolKind::Function => ("function", String::new()),
                SymbolKind::Variable { address } => ("variable", format!("@{address}")),
                SymbolKind::Constant { value } => ("constant", format!("{value}")),
            };
            println!("{:<20} {:<10} {:<6} {:<10}", sym.name, kind, sym.ty.to_string(), value);
        }
        println!();
    }
}
