use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::fs;
use std::process::ExitCode;
use terse_fold::{try_fold_regions, FoldCategory, FoldRegion, FoldSettings};
use terse_lexer::significant_tokens;
use terse_parser::parse_source_file_from_source;
use terse_reporting::DiagnosticContext;
use terse_semantic::SemanticModel;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terse")]
#[command(about = "Fold verbose Java idioms into compact display text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more detail; RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fold regions of Java source files
    Fold {
        /// Source files to fold
        files: Vec<String>,

        /// Leave folds of this category expanded by default
        #[arg(long, value_enum)]
        disable: Vec<Category>,

        /// Show each region as an annotated source snippet
        #[arg(long)]
        explain: bool,
    },
    /// Parse source files and show syntax errors
    Parse {
        /// Source files to parse
        files: Vec<String>,

        /// Print the syntax tree
        #[arg(long)]
        tree: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Category {
    Arithmetic,
    Comparing,
    Slicing,
    Concatenation,
    Range,
    Get,
    Check,
    Cast,
    VariableDeclaration,
    GettersSetters,
}

impl From<Category> for FoldCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Arithmetic => FoldCategory::Arithmetic,
            Category::Comparing => FoldCategory::Comparing,
            Category::Slicing => FoldCategory::Slicing,
            Category::Concatenation => FoldCategory::Concatenation,
            Category::Range => FoldCategory::Range,
            Category::Get => FoldCategory::Get,
            Category::Check => FoldCategory::Check,
            Category::Cast => FoldCategory::Cast,
            Category::VariableDeclaration => FoldCategory::VariableDeclaration,
            Category::GettersSetters => FoldCategory::GettersSetters,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path, e);
            None
        }
    }
}

/// `start..end "source" => "placeholder" [collapsed]`
fn describe(source: &str, region: &FoldRegion) -> String {
    let text = source.get(region.span.clone()).unwrap_or_default();
    format!(
        "{}..{} {:?} => {:?}{}",
        region.span.start,
        region.span.end,
        text,
        region.placeholder,
        if region.collapsed { " [collapsed]" } else { "" }
    )
}

fn run_fold(files: &[String], settings: &FoldSettings, explain: bool) -> ExitCode {
    if files.is_empty() {
        eprintln!("error: no input files");
        return ExitCode::from(1);
    }

    let mut diagnostics = DiagnosticContext::new();
    let mut has_errors = false;

    for file in files {
        let Some(content) = read_source(file) else {
            has_errors = true;
            continue;
        };
        let file_id = diagnostics.add_file(file.clone(), content.clone());

        let result = parse_source_file_from_source(&content, significant_tokens(&content).into_iter());
        if !result.is_ok() {
            // Folding still runs over the recovered tree
            has_errors = true;
        }
        diagnostics.record_parse_errors(&result.errors, file_id);

        let model = SemanticModel::build(&result.tree);
        match try_fold_regions(&result.tree, &content, &model, settings) {
            Ok(regions) => {
                info!(file = %file, regions = regions.len(), "folded");
                println!("=== {} ===", file);
                for region in &regions {
                    println!("{}", describe(&content, region));
                }
                println!();
                diagnostics.record_regions(&regions, file_id, explain);
            }
            Err(error) => {
                has_errors = true;
                diagnostics.record_fold_error(error, file_id);
            }
        }
    }

    info!(files = files.len(), "{}", diagnostics.totals());

    if !diagnostics.is_empty() {
        diagnostics.emit().ok();
    }

    if has_errors {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_parse(files: &[String], show_tree: bool) -> ExitCode {
    if files.is_empty() {
        eprintln!("error: no input files");
        return ExitCode::from(1);
    }

    let mut has_errors = false;

    for file in files {
        let Some(content) = read_source(file) else {
            has_errors = true;
            continue;
        };

        let tokens = significant_tokens(&content);
        debug!(file = %file, tokens = tokens.len(), "lexed");
        let result = parse_source_file_from_source(&content, tokens.into_iter());

        println!("=== {} ===", file);

        if !result.errors.is_empty() {
            has_errors = true;
            for error in &result.errors {
                match &error.span {
                    Some(span) => println!("error: {} at {}..{}", error.message, span.start, span.end),
                    None => println!("error: {}", error.message),
                }
            }
        } else {
            println!("Parsed successfully.");
        }

        if show_tree {
            println!("\n{:#?}", result.tree);
        }

        println!();
    }

    if has_errors {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fold {
            files,
            disable,
            explain,
        } => {
            let settings = disable
                .into_iter()
                .fold(FoldSettings::default(), |settings, category| {
                    settings.without(category.into())
                });
            run_fold(&files, &settings, explain)
        }
        Commands::Parse { files, tree } => run_parse(&files, tree),
    }
}
