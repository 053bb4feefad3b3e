use std::{
    fs,
    io::{self, BufRead, Write},
    panic::{self, AssertUnwindSafe},
    process::ExitCode,
};

use bigcalc::{
    bigmath::{MAX_BASE, MIN_BASE, MathContext, Notation, Precision, RoundingMode},
    interpreter::{
        evaluator::function::core::BUILTIN_FUNCTIONS,
        session::{Session, SessionConfig},
    },
};
use clap::Parser;

/// bigcalc evaluates calculator lines with arbitrary precision in any base
/// from 2 to 36.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number base of the input and of the evaluation.
    #[arg(short, long, default_value_t = 10, value_parser = parse_base)]
    base: u32,

    /// Evaluation precision in decimal digits, 0 for unbounded.
    #[arg(short, long, default_value_t = 30)]
    precision: usize,

    /// Number base results are shown in. Defaults to the input base.
    #[arg(long, value_parser = parse_base)]
    display_base: Option<u32>,

    /// Precision results are shown with, in decimal digits.
    #[arg(long, default_value_t = 10)]
    display_precision: usize,

    /// Rounding mode of evaluation and display.
    #[arg(short, long, default_value = "HalfUp", value_parser = parse_rounding)]
    rounding: RoundingMode,

    /// Result notation: plain, sci, eng or user-friendly.
    #[arg(short, long, default_value = "user-friendly", value_parser = parse_notation)]
    notation: Notation,

    /// Tells bigcalc to read the script from a file.
    #[arg(short, long)]
    file: bool,

    /// Script to evaluate, one calculation per line. Reads lines from
    /// standard input when absent.
    script: Option<String>,
}

fn parse_base(s: &str) -> Result<u32, String> {
    let base: u32 = s.parse().map_err(|e| format!("{e}"))?;
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(base)
    } else {
        Err(format!("base must be from {MIN_BASE} to {MAX_BASE}"))
    }
}

fn parse_rounding(s: &str) -> Result<RoundingMode, String> {
    RoundingMode::ALL.into_iter()
                     .find(|mode| mode.to_string().eq_ignore_ascii_case(s))
                     .ok_or_else(|| format!("unknown rounding mode '{s}'"))
}

fn parse_notation(s: &str) -> Result<Notation, String> {
    s.parse()
}

/// Context with `digits` decimal digits of resolution in `base`.
fn context(base: u32, digits: usize, rounding: RoundingMode) -> MathContext {
    let precision = match digits {
        0 => Precision::Unbounded,
        _ => Precision::Digits(MathContext::relative_precision(base, digits)),
    };
    MathContext::new(base, precision, rounding)
}

impl Args {
    fn config(&self) -> SessionConfig {
        let display_base = self.display_base.unwrap_or(self.base);
        SessionConfig { eval_mc:    context(self.base, self.precision, self.rounding),
                        display_mc: context(display_base, self.display_precision.max(1), self.rounding),
                        notation:   self.notation, }
    }
}

/// Evaluates one line and prints its values or its error.
///
/// Returns whether the line succeeded. A panic inside the evaluation is
/// logged and reported as an internal error.
fn run_line(session: &mut Session, line: &str) -> bool {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| session.evaluate_line(line)));
    match outcome {
        Ok(Ok(values)) => {
            if !values.is_empty() {
                println!("{}", session.format_line(&values));
            }
            true
        },
        Ok(Err(e)) => {
            eprintln!("{e}");
            false
        },
        Err(_) => {
            eprintln!("Internal error");
            false
        },
    }
}

fn repl(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}> ", session.next_line_number());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim() {
            ":quit" | ":q" => return Ok(()),
            ":help" => println!("{}", BUILTIN_FUNCTIONS.join(" ")),
            _ => {
                run_line(session, line.trim_end_matches(['\r', '\n']));
            },
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    panic::set_hook(Box::new(|info| log::error!("{info}")));

    let args = Args::parse();
    let mut session = Session::new(args.config());

    let Some(contents) = &args.script else {
        if let Err(e) = repl(&mut session) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let script = if args.file {
        match fs::read_to_string(contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                return ExitCode::FAILURE;
            },
        }
    } else {
        contents.clone()
    };

    let mut ok = true;
    for line in script.lines() {
        ok &= run_line(&mut session, line);
    }
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
