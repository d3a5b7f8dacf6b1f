use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use paper_search::config::{default_config_path, find_config_file, get_config, load_config, Config};
use paper_search::engine::SearchEngine;
use paper_search::models::{
    AndGroup, Query, QueryField, SearchMethod, SearchPage, SortField, SortOrder, SEARCH_PRIORITY,
};
use paper_search::sources::JsonFileSource;
use paper_search::utils::{is_terminal, render_plain, render_table};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Paper Search - structured search over a collection of bibliographic records
#[derive(Parser, Debug)]
#[command(name = "paper-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search a JSON collection of papers with structured field queries", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Sort order
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search papers loaded from a JSON file
    ///
    /// Each occurrence of a field flag adds one alternative for that field.
    /// Join statements with `+` to require all of them, e.g.
    /// `--title "parsing+tree-crf" --title "event extraction"`.
    #[command(alias = "s")]
    Search {
        /// JSON file holding an array of paper objects
        #[arg(long, short)]
        input: PathBuf,

        /// Year range (e.g., "2020-2023" or "2021")
        #[arg(long)]
        year: Vec<String>,

        /// Month range (e.g., "1-6" or "12")
        #[arg(long)]
        month: Vec<String>,

        /// Venue statements
        #[arg(long)]
        venue: Vec<String>,

        /// Author statements
        #[arg(long)]
        author: Vec<String>,

        /// Title statements
        #[arg(long)]
        title: Vec<String>,

        /// Abstract statements
        #[arg(long = "abstract")]
        abstract_text: Vec<String>,

        /// JSON query file, combined with the field flags
        #[arg(long)]
        query_file: Option<PathBuf>,

        /// Sort by field (title, author, abstract, url, doi, venue, year, month)
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort order
        #[arg(long, value_enum)]
        order: Option<Order>,

        /// Page number, starting from 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Results per page
        #[arg(long)]
        page_size: Option<usize>,

        /// Search method
        #[arg(long)]
        method: Option<String>,
    },

    /// List searchable and sortable fields
    Fields,

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file (default: per-user config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Initialize tracing, writing to stderr so JSON results stay clean on stdout
fn init_tracing(cli: &Cli, config: &Config) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => config.logging.level.as_str(),
        (false, 1) => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paper_search={}", level)),
    );
    let registry = tracing_subscriber::registry().with(env_filter);

    if config.logging.format.as_deref() == Some("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        load_config(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        get_config()?
    };

    init_tracing(&cli, &config);

    match cli.command {
        Some(Commands::Search {
            input,
            year,
            month,
            venue,
            author,
            title,
            abstract_text,
            query_file,
            sort_by,
            order,
            page,
            page_size,
            method,
        }) => {
            let mut query = Query::new();
            for range in &year {
                query.push(QueryField::Year.as_str(), parse_range(range));
            }
            for range in &month {
                query.push(QueryField::Month.as_str(), parse_range(range));
            }
            for (field, values) in [
                (QueryField::Venue, &venue),
                (QueryField::Author, &author),
                (QueryField::Title, &title),
                (QueryField::Abstract, &abstract_text),
            ] {
                for value in values {
                    query.push(field.as_str(), AndGroup::parse(value));
                }
            }
            if let Some(path) = query_file {
                query = query.merge(read_query_file(&path)?);
            }

            let mut options = config.search.options()?.page(page);
            if let Some(size) = page_size {
                options = options.page_size(size);
            }
            if let Some(field) = sort_by {
                options = options.sort_by(field.parse::<SortField>()?);
            }
            if let Some(order) = order {
                options = options.sort_order(match order {
                    Order::Asc => SortOrder::Ascending,
                    Order::Desc => SortOrder::Descending,
                });
            }
            if let Some(name) = method {
                options = options.method(name.parse::<SearchMethod>()?);
            }

            let engine = SearchEngine::from_source(&JsonFileSource::new(input))?;
            let results = engine.advanced_search(&query, &options)?;
            output_page(&results, cli.output, &config)?;
        }

        Some(Commands::Fields) => {
            println!("Searchable fields (evaluation order):");
            for field in SEARCH_PRIORITY {
                let kind = if field.is_temporal() { "range" } else { "text" };
                println!("  {:<10} {}", field.as_str(), kind);
            }
            println!();
            println!("Sortable fields:");
            for field in SortField::ALL {
                println!("  {}", field);
            }
        }

        Some(Commands::InitConfig { path, force }) => {
            let path = path.unwrap_or_else(default_config_path);
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            if !cli.quiet {
                println!("Wrote default configuration to {}", path.display());
            }
        }

        None => {
            println!("Paper Search v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            println!();
            println!("Quick start:");
            println!("  search -i papers.json --venue ACL --year 2020-2023");
            println!("  fields           - List searchable and sortable fields");
            println!("  init-config      - Write a default configuration file");
        }
    }

    Ok(())
}

/// Turn `"2020-2023"` into a two-bound AND-group; a single value is a one-year range.
///
/// Bounds are validated by the engine, not here.
fn parse_range(text: &str) -> AndGroup {
    match text.split_once('-') {
        Some((low, high)) => AndGroup::new([low.trim(), high.trim()]),
        None => AndGroup::new([text.trim(), text.trim()]),
    }
}

fn read_query_file(path: &Path) -> Result<Query> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read query file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid query file {}", path.display()))
}

fn output_page(page: &SearchPage, format: OutputFormat, config: &Config) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
        OutputFormat::Plain => println!("{}", render_plain(page)),
        OutputFormat::Table => println!("{}", render_table(page, &config.display)),
        OutputFormat::Auto => unreachable!(),
    }
    Ok(())
}
