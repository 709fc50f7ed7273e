use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use fia::ast_printer::AstPrinter;
use fia::parser::Parser;
use fia::scanner::Scanner;
use fia::{Diagnostics, Fia};

/// Exit status for lexical, syntax and resolution errors.
const EXIT_STATIC_ERROR: i32 = 65;

/// Exit status for runtime errors.
const EXIT_RUNTIME_ERROR: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Fia language interpreter", long_about = None)]
pub struct Cli {
    /// Without a subcommand, starts an interactive prompt
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to fia.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Emit one JSON object per token
        #[arg(long)]
        json: bool,
    },

    /// Parses a file and prints its syntax tree
    Parse { filename: PathBuf },

    /// Runs a file as a Fia program
    Run { filename: PathBuf },

    /// Starts an interactive prompt
    Repl,
}

/// Reads the contents of a file as UTF‑8 text
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("fia.log").context("Failed to create fia.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("fia::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to fia.log");
    Ok(())
}

fn tokenize(filename: &PathBuf, json: bool) -> Result<i32> {
    let source = read_file(filename)?;
    let mut tokenized = true;

    for token in Scanner::new(&source) {
        match token {
            Ok(token) if json => {
                println!("{}", serde_json::to_string(&token)?);
            }

            Ok(token) => {
                println!("{}", token);
            }

            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    Ok(if tokenized { 0 } else { EXIT_STATIC_ERROR })
}

fn parse(filename: &PathBuf) -> Result<i32> {
    let source = read_file(filename)?;
    let (tokens, lex_errors) = Scanner::new(&source).scan_all();

    let mut diagnostics = Diagnostics::new();
    for e in lex_errors {
        diagnostics.report(e);
    }

    let statements = Parser::new(&tokens, &mut diagnostics).parse();

    println!("{}", AstPrinter::print_program(&statements));

    for e in diagnostics.iter() {
        eprintln!("{}", e);
    }

    Ok(if diagnostics.has_errors() {
        EXIT_STATIC_ERROR
    } else {
        0
    })
}

fn run_file(filename: &PathBuf) -> Result<i32> {
    let source = read_file(filename)?;
    let mut session = Fia::new(io::stdout());

    let report = session.run(&source);

    for e in &report.diagnostics {
        eprintln!("{}", e);
    }

    Ok(if report.had_static_error() {
        EXIT_STATIC_ERROR
    } else if report.had_runtime_error() {
        EXIT_RUNTIME_ERROR
    } else {
        0
    })
}

fn repl() -> Result<i32> {
    info!("Starting REPL");

    let mut session = Fia::new(io::stdout());
    let stdin = io::stdin();
    let mut lines = stdin.lock();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = lines
            .read_line(&mut line)
            .context("Failed to read from stdin")?;

        if read == 0 {
            break;
        }

        let report = session.run(&line);
        debug!("REPL line produced {} diagnostic(s)", report.diagnostics.len());

        for e in &report.diagnostics {
            eprintln!("{}", e);
        }
    }

    Ok(0)
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let code = match &args.commands {
        Some(Commands::Tokenize { filename, json }) => tokenize(filename, *json)?,
        Some(Commands::Parse { filename }) => parse(filename)?,
        Some(Commands::Run { filename }) => run_file(filename)?,
        Some(Commands::Repl) | None => repl()?,
    };

    if code != 0 {
        debug!("Exiting with code {}", code);
        std::process::exit(code);
    }

    Ok(())
}
