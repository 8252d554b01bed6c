mod msg;

use msg::Msg;
use std::path::Path;
use zcc::{analyze, parse, scan, Compiled, Error, Generator, Options};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.zpp")]
    input: String,

    /// Output file [default: input with .asm extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Number of work registers available to expressions
    #[clap(short, long, default_value_t = zcc::DEFAULT_REGISTERS as u8,
        value_parser = clap::value_parser!(u8).range(1..=arch::Reg::WORK_MAX as i64))]
    registers: u8,

    /// Dump generated assembly
    #[clap(short, long)]
    dump: bool,

    /// Print each compile stage
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Z++ Compiler by kanade-k-1228");

    if Path::new(&args.input).extension().and_then(|e| e.to_str()) != Some("zpp") {
        Msg::Error(format!("Not a .zpp file: `{}`", args.input)).print();
        std::process::exit(1);
    }

    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            Msg::Error(format!("Failed to open file: {}: {}", args.input, e)).print();
            std::process::exit(1);
        }
    };

    let options = Options {
        registers: usize::from(args.registers),
    };
    let compiled = match build(&source, &options, args.verbose) {
        Ok(compiled) => compiled,
        Err(e) => {
            let msg = Msg::Error(e.to_string());
            match e.pos() {
                Some(pos) => msg.diag(&args.input, &source, pos),
                None => msg.print(),
            }
            std::process::exit(1);
        }
    };

    if compiled.raw_asm_used {
        Msg::Warn("Run.Asm / Run.AsmBlock was used".to_string()).print();
        Msg::Note("Inline assembly is copied as is and has not been validated".to_string()).print();
    }

    let output = args.output.clone().unwrap_or_else(|| {
        Path::new(&args.input)
            .with_extension("asm")
            .to_string_lossy()
            .into_owned()
    });
    if let Err(e) = std::fs::write(&output, compiled.asm()) {
        Msg::Error(format!("Failed to write file: {}: {}", output, e)).print();
        std::process::exit(1);
    }

    if args.dump {
        println!("-------------------+-----------------------------------------------------");
        println!("{}", compiled.code.cformat());
        println!("-------------------+-----------------------------------------------------");
    }

    println!("Successfully compiled {} to {}", args.input, output);
}

fn build(source: &str, options: &Options, verbose: bool) -> Result<Compiled, Error> {
    if verbose {
        println!("1. Lex");
    }
    let tokens = scan(source)?;
    if verbose {
        println!("  {} tokens", tokens.len());
        println!("2. Parse");
    }
    let program = parse(tokens)?;
    if verbose {
        println!("  {} declarations", program.0.len());
        println!("3. Analyze");
    }
    let analysis = analyze(&program)?;
    if verbose {
        analysis.symbols.print();
        println!("4. Generate ({} work registers)", options.registers);
    }
    let code = Generator::new(&analysis.symbols, options.registers).run(&program)?;
    if verbose {
        println!("  {} instructions", code.insts().count());
    }
    Ok(Compiled {
        code,
        raw_asm_used: analysis.raw_asm_used,
    })
}
