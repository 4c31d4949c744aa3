use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use expression_parser::StringFormat;
use expression_parser::cli::{self, CheckOptions, CheckResult, CliError, EvalOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "exprs")]
#[command(about = "Parse and evaluate boolean/arithmetic expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Quotes {
    Single,
    Double,
    EscapedSingle,
    EscapedDouble,
}

impl From<Quotes> for StringFormat {
    fn from(quotes: Quotes) -> Self {
        match quotes {
            Quotes::Single => StringFormat::SingleQuote,
            Quotes::Double => StringFormat::DoubleQuote,
            Quotes::EscapedSingle => StringFormat::EscapedSingleQuote,
            Quotes::EscapedDouble => StringFormat::EscapedDoubleQuote,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression
    Eval {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// JSON object of variable bindings
        #[arg(short, long)]
        context: Option<String>,

        /// Bind a variable, e.g. --var counter=1 (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// Print each evaluation step to stderr
        #[arg(short, long)]
        trace: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate expression syntax
    Check {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Print the parsed tree
        #[arg(short, long)]
        dump: bool,
    },

    /// Print an expression in normalized form
    Fmt {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Quoting style for string literals
        #[arg(short, long)]
        #[clap(value_enum, default_value_t = Quotes::Single)]
        quotes: Quotes,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            context,
            vars,
            trace,
            json,
        } => run_eval(expression, context, vars, trace, json),
        Commands::Check { expression, dump } => run_check(expression, dump),
        Commands::Fmt { expression, quotes } => read_expression(expression)
            .and_then(|expression| cli::execute_fmt(&expression, quotes.into()))
            .map(|written| println!("{}", written)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim().to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn run_eval(
    expression: Option<String>,
    context: Option<String>,
    bindings: Vec<String>,
    trace: bool,
    json: bool,
) -> Result<(), CliError> {
    let options = EvalOptions {
        expression: read_expression(expression)?,
        context,
        bindings,
        trace,
    };

    let outcome = cli::execute_eval(&options)?;
    for step in &outcome.steps {
        eprintln!("{}", step);
    }

    if json {
        let value = cli::value_to_json(outcome.value);
        println!("{}", serde_json::to_string(&value)?);
    } else {
        println!("{}", outcome.value);
    }
    Ok(())
}

fn run_check(expression: Option<String>, dump: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        expression: read_expression(expression)?,
        dump,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Tree(tree) => print!("{}", tree),
    }
    Ok(())
}
