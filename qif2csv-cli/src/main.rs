use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use qif2csv_export::{
    ConvertOptions, ExtractOptions, ListKind, convert_file, extract_file, load_optional_mapping,
};
use std::path::{Path, PathBuf};

mod config;
mod logging;

use config::{Config, DEFAULT_SUFFIX, load_config};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("QIF2CSV_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "qif2csv",
    version,
    long_version = LONG_VERSION,
    about = "Convert QIF exports into per-account CSV ledgers"
)]
struct Cli {
    /// TOML config file (defaults to ./qif2csv.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write sorted, deduplicated name lists for building mapping files
    Extract(ExtractArgs),

    /// Write one CSV ledger per Bank/CCard account
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Extract category names
    #[arg(long)]
    categories: bool,

    /// Extract payee names
    #[arg(long)]
    payees: bool,

    /// Extract tag names
    #[arg(long)]
    tags: bool,

    /// Extract account names
    #[arg(long)]
    accounts: bool,

    /// QIF file to read
    #[arg(long = "inputfile", value_name = "FILE")]
    input: PathBuf,

    /// Category list file name (default: categoryList.txt)
    #[arg(long, value_name = "FILE")]
    category_list: Option<PathBuf>,

    /// Payee list file name (default: payeeList.txt)
    #[arg(long, value_name = "FILE")]
    payee_list: Option<PathBuf>,

    /// Tag list file name (default: tagsList.txt)
    #[arg(long, value_name = "FILE")]
    tag_list: Option<PathBuf>,

    /// Account list file name (default: AccountsList.txt)
    #[arg(long, value_name = "FILE")]
    account_list: Option<PathBuf>,

    /// Directory to write into (default: current directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// QIF file to read
    #[arg(long = "inputfile", value_name = "FILE")]
    input: PathBuf,

    /// Suffix appended to each account name to form its file name (default: .csv)
    #[arg(long = "outputfile", value_name = "SUFFIX")]
    suffix: Option<String>,

    /// `<old>,<new>` rules applied to category paths
    #[arg(long = "categorymap", value_name = "FILE")]
    category_map: Option<PathBuf>,

    /// `<old>,<new>` rules applied to payees
    #[arg(long = "payeemap", value_name = "FILE")]
    payee_map: Option<PathBuf>,

    /// `<account>,<new name>` rules for the Account column
    #[arg(long = "accountmap", value_name = "FILE")]
    account_map: Option<PathBuf>,

    /// Directory to write into (default: current directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.quiet);

    let cfg = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Extract(args) => run_extract(&args, &cfg),
        Command::Convert(args) => run_convert(&args, &cfg),
    }
}

fn output_dir(flag: Option<&Path>, cfg: &Config) -> PathBuf {
    flag.or(cfg.output_dir.as_deref())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn extract_options(args: &ExtractArgs, cfg: &Config) -> ExtractOptions {
    let selections = [
        (ListKind::Categories, args.categories, &args.category_list, &cfg.extract.categories),
        (ListKind::Payees, args.payees, &args.payee_list, &cfg.extract.payees),
        (ListKind::Tags, args.tags, &args.tag_list, &cfg.extract.tags),
        (ListKind::Accounts, args.accounts, &args.account_list, &cfg.extract.accounts),
    ];

    let mut opts = ExtractOptions::new(output_dir(args.output_dir.as_deref(), cfg));
    for (kind, selected, flag, configured) in selections {
        if !selected {
            continue;
        }
        opts = match flag.as_ref().or(configured.as_ref()) {
            Some(file) => opts.select_as(kind, file),
            None => opts.select(kind),
        };
    }
    opts
}

fn convert_options(args: &ConvertArgs, cfg: &Config) -> Result<ConvertOptions> {
    let pick = |flag: &Option<PathBuf>, configured: &Option<PathBuf>| {
        flag.as_deref().or(configured.as_deref()).map(Path::to_path_buf)
    };
    let category_map = pick(&args.category_map, &cfg.convert.category_map);
    let payee_map = pick(&args.payee_map, &cfg.convert.payee_map);
    let account_map = pick(&args.account_map, &cfg.convert.account_map);

    Ok(ConvertOptions {
        output_dir: output_dir(args.output_dir.as_deref(), cfg),
        suffix: args
            .suffix
            .clone()
            .or_else(|| cfg.convert.suffix.clone())
            .unwrap_or_else(|| DEFAULT_SUFFIX.to_string()),
        category_map: load_optional_mapping(category_map.as_deref())
            .context("loading category mapping")?,
        payee_map: load_optional_mapping(payee_map.as_deref()).context("loading payee mapping")?,
        account_map: load_optional_mapping(account_map.as_deref())
            .context("loading account mapping")?,
    })
}

fn run_extract(args: &ExtractArgs, cfg: &Config) -> Result<()> {
    let opts = extract_options(args, cfg);
    let report = extract_file(&args.input, &opts)
        .with_context(|| format!("extracting from {}", args.input.display()))?;

    for list in &report.lists {
        println!(
            "Extracted {} {} -> {}",
            list.entries,
            list.kind.label(),
            list.path.display()
        );
    }
    Ok(())
}

fn run_convert(args: &ConvertArgs, cfg: &Config) -> Result<()> {
    let opts = convert_options(args, cfg)?;
    let report = convert_file(&args.input, &opts)
        .with_context(|| format!("converting {}", args.input.display()))?;

    for account in &report.accounts {
        println!(
            "{} ({}) -> {}: {} transactions",
            account.account,
            account.output_account,
            account.path.display(),
            account.rows
        );
    }
    println!(
        "\nConverted {} transactions across {} accounts",
        report.total_rows(),
        report.accounts.len()
    );
    Ok(())
}
