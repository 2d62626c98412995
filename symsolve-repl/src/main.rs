use ariadne::Source;
use log::LevelFilter;
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::io::{self, IsTerminal, Read};
use symsolve_algebra::{expr::is_numeric_text, parse, simplify, solve, Error, Expr};

/// The environment variable holding the log level.
const LOG_VAR: &str = "SYMSOLVE_LOG";

/// Symbols that are constants, and never solved for.
const CONSTANTS: [&str; 3] = ["e", "i", "pi"];

/// Report the error to stderr, highlighting the parts of the input it came from.
///
/// The `ariadne` crate's [`Report`](ariadne::Report) type does not implement `Display`, so we can
/// only use its `eprint` method.
fn report_to_stderr(err: &Error, input: &str) {
    if err.build_report("input").eprint(("input", Source::from(input))).is_err() {
        eprintln!("error: {}", err);
    }
}

/// Picks the variable to solve for: `x` if the expression contains it, otherwise the first
/// symbol that is neither a number nor a constant.
fn target_variable(expr: &Expr) -> Option<&str> {
    if expr.contains("x") {
        return Some("x");
    }
    expr.symbols()
        .into_iter()
        .find(|symbol| !is_numeric_text(symbol) && !CONSTANTS.contains(symbol))
}

/// Parses, simplifies and solves the input, printing each result.
fn run(input: &str) -> Result<(), Error> {
    let expr = parse(input)?;
    println!("Input: {}", expr);
    println!("Simplified: {}", simplify(&expr)?);

    let Some(variable) = target_variable(&expr) else {
        return Ok(());
    };

    let solutions = solve(&expr, variable);
    if solutions.is_empty() {
        println!("Unable to solve");
    }
    for solution in solutions {
        println!("Solution: {} = {}", variable, solution);
    }
    Ok(())
}

/// Runs the input, reporting any error.
fn execute(input: &str) {
    if let Err(err) = run(input) {
        report_to_stderr(&err, input);
    }
}

/// Installs the terminal logger at the level named by [`LOG_VAR`], defaulting to warnings.
fn init_logger() {
    let level = std::env::var(LOG_VAR)
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn);
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();

    if let Err(err) = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("could not install logger: {}", err);
    }
}

fn main() {
    init_logger();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if !args.is_empty() {
        // one expression from the command line
        execute(&args.join(" "));
    } else if !io::stdin().is_terminal() {
        // one expression per line of stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("{}", err);
            return;
        }

        for line in input.lines().filter(|line| !line.trim().is_empty()) {
            execute(line);
        }
    } else {
        // interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };

        fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            execute(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
