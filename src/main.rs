use clap::{Parser as ClapParser, Subcommand};
use evitaql_parser::cli::{self, CheckOptions, CliError, Unit};
use evitaql_parser::parser::DEFAULT_MAX_DEPTH;
use evitaql_parser::{ParseMode, ParseOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "evitaql")]
#[command(about = "evitaQL - parse and validate catalog queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query or fragment and print its canonical form
    Check {
        /// The evitaQL text (reads from stdin if not provided)
        query: Option<String>,

        /// Grammar entry point to parse with
        #[arg(short, long, value_enum, default_value_t = Unit::Query)]
        unit: Unit,

        /// Positional parameter value as an evitaQL literal, bound to `?` in order
        #[arg(short, long = "arg", value_name = "LITERAL")]
        args: Vec<String>,

        /// Named parameter as NAME=LITERAL, bound to `@NAME`
        #[arg(short, long, value_name = "NAME=LITERAL")]
        named: Vec<String>,

        /// Parameters as a JSON array (positional) or object (named)
        #[arg(long, value_name = "JSON")]
        params: Option<String>,

        /// Reject literal values; overrides --mode
        #[arg(long)]
        parameters_only: bool,

        /// Parse mode: permissive or parameters-only
        #[arg(long, env = "EVITAQL_MODE", default_value_t = ParseMode::Permissive)]
        mode: ParseMode,

        /// Deepest constraint nesting accepted
        #[arg(long, env = "EVITAQL_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Log parse details to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// List constraint keywords by category
    Keywords {
        /// Category name: head, filter, order or require
        category: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            unit,
            args,
            named,
            params,
            parameters_only,
            mode,
            max_depth,
            pretty,
            verbose,
        } => {
            cli::logging::init(verbose);
            let mode = if parameters_only {
                ParseMode::ParametersOnly
            } else {
                mode
            };
            run_check(
                query,
                unit,
                &args,
                &named,
                params.as_deref(),
                ParseOptions::default()
                    .with_mode(mode)
                    .with_max_depth(max_depth),
                pretty,
            )
        }
        Commands::Keywords { category } => match category {
            Some(category) => cli::get_keyword_category(&category).map(|listing| print!("{}", listing)),
            None => {
                print!("{}", cli::get_keywords_overview());
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: Option<String>,
    unit: Unit,
    args: &[String],
    named: &[String],
    params: Option<&str>,
    parse: ParseOptions,
    pretty: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = CheckOptions {
        query,
        unit,
        arguments: cli::build_arguments(params, args, named)?,
        parse,
        pretty,
    };

    let result = cli::execute_check(&options)?;
    println!("{}", result.render(pretty));
    Ok(())
}
