use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use invoice_dashboard::api::{decode_envelope, validate_upload, ApiClient, ExportFilters};
use invoice_dashboard::config::{
    clear_session, config_dir, load_config, load_session, resolve_output_dir, save_session,
    Session, CONFIG_TEMPLATE,
};
use invoice_dashboard::dashboard::{DashboardState, Facet, InvoiceRecord, Stats};
use invoice_dashboard::error::{DashboardError, Result};
use invoice_dashboard::render::{page_indicator, page_table, stats_summary};

#[derive(Parser)]
#[command(name = "invdash")]
#[command(version, about = "Invoice dashboard: search, filter and summarize invoice records", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.invdash)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Show config and session information
    Status,

    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show one page of filtered invoices with summary statistics
    List {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Page to show (out-of-range pages are ignored)
        #[arg(long)]
        page: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show summary statistics for the filtered invoices
    Stats {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List distinct values of a field to use as filter values
    Facets {
        /// Field to list
        #[arg(short, long, value_enum)]
        field: Facet,

        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Upload a spreadsheet of invoices (.xlsx, .xls or .csv, max 10 MB)
    Upload {
        /// Spreadsheet to upload
        file: PathBuf,
    },

    /// Download an export of invoices matching the given filters
    Download {
        /// Issuing company
        #[arg(long)]
        issuer: Option<String>,

        /// Receiving company
        #[arg(long)]
        receiver: Option<String>,

        /// Product name
        #[arg(long)]
        product: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Directory to save into (default: [download] output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct FilterArgs {
    /// Case-insensitive search over number, companies and product
    #[arg(short, long)]
    keyword: Option<String>,

    /// Exact product name
    #[arg(long)]
    product: Option<String>,

    /// Exact issuing company
    #[arg(long)]
    issuer: Option<String>,

    /// Exact receiving company
    #[arg(long)]
    receiver: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// End date, inclusive through the end of the day (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,

    /// Minimum amount, inclusive
    #[arg(long, allow_negative_numbers = true)]
    min: Option<String>,

    /// Maximum amount, inclusive
    #[arg(long, allow_negative_numbers = true)]
    max: Option<String>,
}

#[derive(Args)]
struct SourceArgs {
    /// Read records from a JSON file instead of the backend
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    let configured_level = load_config(&cfg_dir).ok().map(|c| c.log.level);
    init_logging(cli.verbose, configured_level.as_deref());

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Login { username, password } => cmd_login(&cfg_dir, &username, password),
        Commands::Logout => cmd_logout(&cfg_dir),
        Commands::List {
            filters,
            source,
            page,
            json,
        } => cmd_list(&cfg_dir, &filters, source.input.as_deref(), page, json),
        Commands::Stats {
            filters,
            source,
            json,
        } => cmd_stats(&cfg_dir, &filters, source.input.as_deref(), json),
        Commands::Facets {
            field,
            source,
            json,
        } => cmd_facets(&cfg_dir, field, source.input.as_deref(), json),
        Commands::Upload { file } => cmd_upload(&cfg_dir, &file),
        Commands::Download {
            issuer,
            receiver,
            product,
            start,
            end,
            output,
        } => {
            let filters = ExportFilters {
                receiving_company: receiver,
                issuing_company: issuer,
                start_date: parse_date(start.as_deref())?,
                end_date: parse_date(end.as_deref())?,
                product_name: product,
            };
            cmd_download(&cfg_dir, &filters, output)
        }
    }
}

fn init_logging(verbose: u8, configured: Option<&str>) {
    use tracing::Level;

    let level = match verbose {
        0 => configured
            .and_then(|l| l.trim().parse::<Level>().ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(DashboardError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized invdash config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your backend:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Log in:                    invdash login --username <name>");
    println!("  3. Browse invoices:           invdash list");

    Ok(())
}

/// Show config and session status
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let session = load_session(cfg_dir)?;

    println!("Dashboard Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Backend:          {}", config.api.base_url);
    println!(
        "Download dir:     {}",
        resolve_output_dir(&config.download.output_dir).display()
    );
    match session {
        Some(s) => println!(
            "Session:          {} (since {})",
            s.username,
            s.logged_in_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => println!("Session:          not logged in"),
    }

    Ok(())
}

fn cmd_login(cfg_dir: &Path, username: &str, password: Option<String>) -> Result<()> {
    let config = load_config(cfg_dir)?;

    let password = match password {
        Some(p) => p,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| DashboardError::Prompt(e.to_string()))?,
    };

    let client = ApiClient::new(&config.api, None);
    let token = client.login(username, &password)?;

    save_session(
        cfg_dir,
        &Session {
            username: username.to_string(),
            token,
            logged_in_at: chrono::Utc::now(),
        },
    )?;

    println!("Logged in as {username}");
    Ok(())
}

fn cmd_logout(cfg_dir: &Path) -> Result<()> {
    if clear_session(cfg_dir)? {
        println!("Logged out");
    } else {
        println!("No active session");
    }
    Ok(())
}

/// Build an authenticated client from config and the stored session.
fn api_client(cfg_dir: &Path) -> Result<ApiClient> {
    let config = load_config(cfg_dir)?;
    let token = load_session(cfg_dir)?.map(|s| s.token);
    Ok(ApiClient::new(&config.api, token))
}

/// A rejected token invalidates the stored session.
fn guard_session<T>(cfg_dir: &Path, result: Result<T>) -> Result<T> {
    if let Err(DashboardError::Unauthorized) = &result {
        tracing::warn!("server rejected the session token");
        clear_session(cfg_dir)?;
    }
    result
}

/// Load the record store from a JSON file or the backend.
///
/// A failed fetch (other than 401) leaves the dashboard empty instead of
/// failing the command.
fn load_dashboard(cfg_dir: &Path, input: Option<&Path>) -> Result<DashboardState> {
    if let Some(path) = input {
        return read_records_file(path).map(DashboardState::new);
    }

    let client = api_client(cfg_dir)?;
    match guard_session(cfg_dir, client.fetch_invoices()) {
        Ok(records) => Ok(DashboardState::new(records)),
        Err(DashboardError::Unauthorized) => Err(DashboardError::Unauthorized),
        Err(e) => {
            tracing::warn!(error = %e, "invoice fetch failed");
            eprintln!("Warning: could not load invoices: {e}");
            Ok(DashboardState::default())
        }
    }
}

/// Accepts a bare JSON array of records or a `{code, message, data}` envelope.
fn read_records_file(path: &Path) -> Result<Vec<InvoiceRecord>> {
    let invalid = |reason: String| DashboardError::InvalidInput {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    if let Ok(records) = serde_json::from_str::<Vec<InvoiceRecord>>(&content) {
        return Ok(records);
    }
    decode_envelope::<Vec<InvoiceRecord>>(200, &content)
        .map(Option::unwrap_or_default)
        .map_err(|e| invalid(e.to_string()))
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| DashboardError::InvalidDate(s.to_string()))
        })
        .transpose()
}

fn parse_amount(value: Option<&str>) -> Result<Option<f64>> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .ok()
                .filter(|v| !v.is_nan())
                .ok_or_else(|| DashboardError::InvalidAmount(s.to_string()))
        })
        .transpose()
}

fn apply_filters(state: &mut DashboardState, args: &FilterArgs) -> Result<()> {
    let start = parse_date(args.start.as_deref())?;
    let end = parse_date(args.end.as_deref())?;
    let min = parse_amount(args.min.as_deref())?;
    let max = parse_amount(args.max.as_deref())?;

    state.set_keyword(args.keyword.clone().unwrap_or_default());
    state.set_product(args.product.clone().unwrap_or_default());
    state.set_issuing_company(args.issuer.clone().unwrap_or_default());
    state.set_receiving_company(args.receiver.clone().unwrap_or_default());
    state.set_date_range(start, end);
    state.set_amount_range(min, max);

    warn_unknown_value(state, Facet::Product, args.product.as_deref());
    warn_unknown_value(state, Facet::Issuer, args.issuer.as_deref());
    warn_unknown_value(state, Facet::Receiver, args.receiver.as_deref());
    Ok(())
}

/// Exact-match filters only hit values that appear in the store.
fn warn_unknown_value(state: &DashboardState, facet: Facet, value: Option<&str>) {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return;
    };
    if !state.facet(facet).iter().any(|v| v == value) {
        tracing::warn!(%facet, value, "filter value does not occur in the loaded invoices");
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput {
    page: usize,
    total_pages: usize,
    filtered_count: usize,
    records: Vec<InvoiceRecord>,
    stats: Stats,
    companies: Vec<String>,
}

#[derive(Serialize)]
struct StatsOutput {
    stats: Stats,
    companies: Vec<String>,
}

fn cmd_list(
    cfg_dir: &Path,
    filters: &FilterArgs,
    input: Option<&Path>,
    page: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut state = load_dashboard(cfg_dir, input)?;
    apply_filters(&mut state, filters)?;

    if let Some(n) = page {
        if !state.go_to_page(n) {
            tracing::debug!(requested = n, "page out of range, staying on page 1");
        }
    }

    let filtered_count = state.filtered().len();
    let output = ListOutput {
        page: state.current_page(),
        total_pages: state.total_pages(),
        filtered_count,
        records: state.page_records(),
        stats: state.stats(),
        companies: state.result_companies(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output.records.is_empty() {
        println!("No invoices match the current filters.");
    } else {
        println!("{}", page_table(&output.records, output.page));
    }
    println!(
        "{}",
        page_indicator(output.page, output.total_pages, output.filtered_count)
    );
    println!();
    println!("{}", stats_summary(&output.stats));
    print_companies(&output.companies);

    Ok(())
}

fn cmd_stats(cfg_dir: &Path, filters: &FilterArgs, input: Option<&Path>, json: bool) -> Result<()> {
    let mut state = load_dashboard(cfg_dir, input)?;
    apply_filters(&mut state, filters)?;

    let output = StatsOutput {
        stats: state.stats(),
        companies: state.result_companies(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", stats_summary(&output.stats));
    print_companies(&output.companies);
    Ok(())
}

fn print_companies(companies: &[String]) {
    if companies.is_empty() {
        return;
    }
    println!();
    println!("Issuing companies in results:");
    for company in companies {
        println!("  {company}");
    }
}

fn cmd_facets(cfg_dir: &Path, field: Facet, input: Option<&Path>, json: bool) -> Result<()> {
    let state = load_dashboard(cfg_dir, input)?;
    let values = state.facet(field);

    if json {
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    println!("{} ({})", field, values.len());
    for value in &values {
        println!("  {value}");
    }
    Ok(())
}

fn cmd_upload(cfg_dir: &Path, path: &Path) -> Result<()> {
    // Validate before touching config or the network
    let file = validate_upload(path)?;

    let client = api_client(cfg_dir)?;
    let added = guard_session(cfg_dir, client.upload(&file))?;

    println!("Uploaded {}", file.file_name);
    println!("  New records: {added}");
    Ok(())
}

fn cmd_download(cfg_dir: &Path, filters: &ExportFilters, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let output_dir = output.unwrap_or_else(|| resolve_output_dir(&config.download.output_dir));

    let client = api_client(cfg_dir)?;
    let (path, bytes) = guard_session(cfg_dir, client.download(filters, &output_dir))?;

    println!("Downloaded export");
    println!("  Saved: {} ({bytes} bytes)", path.display());
    Ok(())
}
