use color_print::cprintln;
use zcc::Pos;

#[derive(Debug)]
pub enum Msg {
    Error(String),
    Warn(String),
    Note(String),
}

impl Msg {
    pub fn print(&self) {
        match self {
            Msg::Error(msg) => cprintln!("<red,bold>error</>: {}", msg),
            Msg::Warn(msg) => cprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => cprintln!("<green,bold>note</>: {}", msg),
        }
    }

    /// Print with the offending source line and a caret under the column
    pub fn diag(&self, file: &str, source: &str, pos: Pos) {
        self.print();
        let raw = source.lines().nth(pos.line.saturating_sub(1)).unwrap_or("");
        let caret = format!("{}^", " ".repeat(pos.col.saturating_sub(1)));
        cprintln!("     <blue>--></> <underline>{}:{}:{}</>", file, pos.line, pos.col);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", pos.line, raw);
        cprintln!("      <blue>|</> <red,bold>{}</>", caret);
    }
}
