use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use sniff::paths::{canonical_dir, resolve_base_dir};
use sniff::render::{RenderOptions, render_json, render_notices, render_results};
use sniff::search::{DEFAULT_LIMIT, DEFAULT_NEIGHBORS, SearchOptions, search_files};
use sniff::snippet::{
    DatetimeOptions, QuoteOptions, import_block, list_literal, path_join, quote_japanese,
    to_datetime,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Search files for a word with context, and generate notebook snippets"
)]
struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search files matching a glob for a literal word
    Search {
        /// Literal text to search for
        word: String,

        /// Glob pattern relative to the base directory; `**` spans directories
        pattern: String,

        /// Environment variable holding the base directory (default: HOME, then HOMEPATH)
        #[arg(short, long)]
        environ: Option<String>,

        /// Base directory, overriding any environment variable
        #[arg(long, conflicts_with = "environ")]
        base_dir: Option<PathBuf>,

        /// Number of lines to show before and after each match
        #[arg(short, long, default_value_t = DEFAULT_NEIGHBORS)]
        neighbors: usize,

        /// Stop after this many files with matches
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Search every candidate file
        #[arg(long, conflicts_with = "limit")]
        no_limit: bool,

        /// Case insensitive search
        #[arg(short = 'i', long)]
        ignore_case: bool,

        /// Include hidden files and directories
        #[arg(long)]
        hidden: bool,

        /// Skip files excluded by .gitignore
        #[arg(long)]
        gitignore: bool,

        /// Prefix lines with a hit marker and the line index
        #[arg(short, long)]
        decorate: bool,

        /// Do not append the match count to file names
        #[arg(long)]
        no_count: bool,

        /// Do not print file names
        #[arg(long)]
        no_filename: bool,

        /// Print file names only
        #[arg(long)]
        no_content: bool,

        /// Do not print blank lines between runs and files
        #[arg(long)]
        no_separate: bool,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,

        /// Do not print the candidate count and notices
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print an import block
    Imports {
        /// Modules to import, e.g. "pandas as pd" or "from pathlib import Path"
        modules: Vec<String>,

        /// Print the standard analysis template instead
        #[arg(short, long)]
        template: bool,
    },

    /// Print a pd.to_datetime conversion for a DataFrame column
    Todt {
        /// DataFrame variable name
        df: String,

        /// Column to convert
        col: String,

        /// Date parts in order, e.g. ymd or ym
        #[arg(long, default_value = "ymd")]
        fmt: String,

        /// Separator between date parts in the column ("" for none)
        #[arg(long, default_value = "-")]
        sep: String,

        /// Store the result in a new column
        #[arg(long)]
        new_col: Option<String>,

        /// Raise on unparsable values instead of coercing them to NaT
        #[arg(long)]
        no_coerce: bool,
    },

    /// Print the non-empty lines of a text as a Python list
    Lsplit {
        /// Text to split; read from stdin when omitted
        text: Option<String>,

        /// Keep the list on one line
        #[arg(long)]
        single_line: bool,
    },

    /// Print a path as os.path.join over the best matching environment variable
    Psplit {
        /// Path to rewrite
        path: PathBuf,

        /// Keep the expression on one line
        #[arg(long)]
        single_line: bool,
    },

    /// Quote runs of Japanese text in a piece of code
    Quote {
        /// Code to rewrite; read from stdin when omitted
        code: Option<String>,

        /// Shortest run that gets quoted
        #[arg(long, default_value_t = 2)]
        min_chars: usize,

        /// Do not treat digits as part of a word
        #[arg(long)]
        ignore_digits: bool,

        /// Treat full-width parentheses as part of a word
        #[arg(long)]
        keep_parens: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    sniff::telemetry::init(level)?;

    match cli.command {
        Commands::Search {
            word,
            pattern,
            environ,
            base_dir,
            neighbors,
            limit,
            no_limit,
            ignore_case,
            hidden,
            gitignore,
            decorate,
            no_count,
            no_filename,
            no_content,
            no_separate,
            json,
            quiet,
        } => {
            let base_dir = match base_dir {
                Some(dir) => canonical_dir(&dir)?,
                None => resolve_base_dir(environ.as_deref())?,
            };

            let options = SearchOptions {
                neighbors,
                limit: if no_limit { None } else { Some(limit) },
                case_sensitive: !ignore_case,
                respect_gitignore: gitignore,
                include_hidden: hidden,
            };
            let render_options = RenderOptions {
                show_filename: !no_filename,
                show_count: !no_count,
                show_content: !no_content,
                decorate,
                separate_runs: !no_separate,
            };

            let report = search_files(&word, &pattern, &base_dir, &options)?;

            if json {
                println!("{}", render_json(&report, &render_options)?);
                return Ok(());
            }

            if !quiet {
                for line in render_notices(&report) {
                    println!("{}", line);
                }
            }
            for line in render_results(&report.files, &render_options) {
                println!("{}", line);
            }
        }

        Commands::Imports { modules, template } => {
            println!("{}", import_block(&modules, template));
        }

        Commands::Todt {
            df,
            col,
            fmt,
            sep,
            new_col,
            no_coerce,
        } => {
            let options = DatetimeOptions {
                fmt,
                sep,
                new_col,
                coerce_errors: !no_coerce,
            };
            println!("{}", to_datetime(&df, &col, &options));
        }

        Commands::Lsplit { text, single_line } => {
            let text = text_or_stdin(text)?;
            println!("{}", list_literal(&text, !single_line));
        }

        Commands::Psplit { path, single_line } => {
            let vars: Vec<(String, String)> = std::env::vars().collect();
            match path_join(&path, &vars, !single_line)? {
                Some(code) => println!("{}", code),
                None => println!("No environment variable holds a prefix of {}", path.display()),
            }
        }

        Commands::Quote {
            code,
            min_chars,
            ignore_digits,
            keep_parens,
        } => {
            let code = text_or_stdin(code)?;
            let options = QuoteOptions {
                min_chars,
                ignore_digits,
                ignore_parens: !keep_parens,
            };
            println!("{}", quote_japanese(&code, &options));
        }
    }

    Ok(())
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}
