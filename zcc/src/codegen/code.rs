use arch::Inst;
use color_print::cformat;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Comment(String),      // ; text
    Remark(String),       //     ; text
    Define(String, i64),  // .define NAME = VALUE
    Label(String),        // name:
    Inst(Inst),           //     OP args
    Raw(String),          // copied verbatim
    Blank,
}

/// Generated assembly, one entry per output line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Code(pub Vec<Line>);

impl Code {
    pub fn push(&mut self, line: Line) {
        self.0.push(line);
    }

    pub fn inst(&mut self, inst: Inst) {
        self.push(Line::Inst(inst));
    }

    pub fn comment(&mut self, text: impl Into<String>) {
        self.push(Line::Comment(text.into()));
    }

    pub fn remark(&mut self, text: impl Into<String>) {
        self.push(Line::Remark(text.into()));
    }

    pub fn label(&mut self, name: impl Into<String>) {
        self.push(Line::Label(name.into()));
    }

    /// Instructions only, without labels, comments and raw text
    pub fn insts(&self) -> impl Iterator<Item = &Inst> {
        self.0.iter().filter_map(|line| match line {
            Line::Inst(inst) => Some(inst),
            _ => None,
        })
    }

    pub fn cformat(&self) -> String {
        self.0
            .iter()
            .map(|line| match line {
                Line::Remark(text) => cformat!("<dim>    ; {}</>", text),
                Line::Comment(text) => cformat!("<dim>; {}</>", text),
                Line::Define(name, value) => cformat!("<y>.define {} = {}</>", name, value),
                Line::Label(name) => cformat!("<g>{}:</>", name),
                Line::Inst(inst) => format!("    {}", inst.cformat()),
                Line::Raw(text) => cformat!("<u>{}</>", text),
                Line::Blank => String::new(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Remark(text) => write!(f, "    ; {text}"),
            Line::Comment(text) => write!(f, "; {text}"),
            Line::Define(name, value) => write!(f, ".define {name} = {value}"),
            Line::Label(name) => write!(f, "{name}:"),
            Line::Inst(inst) => write!(f, "    {inst}"),
            Line::Raw(text) => write!(f, "{text}"),
            Line::Blank => Ok(()),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, line) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}
