//! # Vee
//!
//! Command line driver for the Vee toolchain.
//!

mod term;

use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use vee::lang::{self, Error, Grammar};
use vee::mach::{self, Config, Program, Runtime, GLOBAL_CAPACITY, STACK_CAPACITY};

type Result<T> = std::result::Result<T, Vec<Error>>;

#[derive(Parser)]
#[command(name = "vee", about = "Vee language toolchain", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every executed instruction
    #[arg(long, global = true)]
    trace: bool,

    /// Operand stack capacity in words
    #[arg(long, global = true, default_value_t = STACK_CAPACITY)]
    stack_size: usize,

    /// Number of global variable slots
    #[arg(long, global = true, default_value_t = GLOBAL_CAPACITY)]
    globals: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Source text to a token stream (.vlex)
    Tokenize {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Token stream to assembly text (.vbyt)
    Parse {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the parse tree
        #[arg(long)]
        tree: bool,
    },
    /// Assembly text to integer words (.vcomp)
    Assemble {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a compiled program
    Run { input: PathBuf },
    /// Run comma separated integer words (e.g. "16,2,21,23")
    Exec { words: String },
    /// Compile and run a source file
    #[command(alias = "runsrc")]
    BuildRun { input: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    };
    if let Err(error) = SimpleLogger::new().with_level(level).init() {
        eprintln!("{}", error);
    }
    let config = Config {
        stack_capacity: cli.stack_size,
        global_capacity: cli.globals,
    };
    let success = match dispatch(cli.command, config) {
        Ok(success) => success,
        Err(errors) => {
            term::report(&errors);
            false
        }
    };
    if !success {
        std::process::exit(1);
    }
}

fn dispatch(command: Commands, config: Config) -> Result<bool> {
    match command {
        Commands::Tokenize { input, output } => {
            let tokens = lang::lex(&read(&input)?).map_err(|e| vec![e])?;
            write(&output_path(&input, output, "vlex"), &lang::write_tokens(&tokens))?;
        }
        Commands::Parse {
            input,
            output,
            tree,
        } => {
            let tokens = lang::read_tokens(&read(&input)?).map_err(|e| vec![e])?;
            if tree {
                let grammar = Grammar::new();
                let node = lang::parse_tree(&grammar, &tokens).map_err(|e| vec![e])?;
                print!("{}", node);
            }
            let ast = lang::parse(&tokens).map_err(|e| vec![e])?;
            let listing = mach::codegen(&ast)?;
            write(&output_path(&input, output, "vbyt"), &listing.to_string())?;
        }
        Commands::Assemble { input, output } => {
            let program = mach::assemble(&read(&input)?)?;
            write(&output_path(&input, output, "vcomp"), &program.to_string())?;
        }
        Commands::Run { input } => {
            let program = match read(&input) {
                Ok(text) => Program::from_str(&text).map_err(|e| vec![e])?,
                Err(errors) => {
                    term::report(&errors);
                    Program::halt()
                }
            };
            return execute(program, config);
        }
        Commands::Exec { words } => {
            let program = Program::from_csv(&words).map_err(|e| vec![e])?;
            return execute(program, config);
        }
        Commands::BuildRun { input } => {
            let program = vee::compile(&read(&input)?)?;
            return execute(program, config);
        }
    }
    Ok(true)
}

fn execute(program: Program, config: Config) -> Result<bool> {
    debug!("loaded {} words", program.len());
    let interrupted = term::interrupt_flag();
    let mut runtime = Runtime::with_config(program, config);
    term::run(&mut runtime, &interrupted).map_err(io_error)
}

fn output_path(input: &Path, output: Option<PathBuf>, extension: &str) -> PathBuf {
    output.unwrap_or_else(|| input.with_extension(extension))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        let message = format!("{}: {}", path.display(), e);
        vec![vee::error!(InternalError; &message)]
    })
}

fn write(path: &Path, contents: &str) -> Result<()> {
    debug!("writing {}", path.display());
    std::fs::write(path, contents).map_err(io_error)
}

fn io_error(error: std::io::Error) -> Vec<Error> {
    vec![vee::error!(InternalError; &error.to_string())]
}
