//! `agency` CLI: seed the CMS, send test emails, check local services.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use agency_content::mail::{EmailBody, render_application, render_contact};
use agency_content::{
    AgencyConfig, Collection, ContactSubmission, DocumentStore, HttpMailer, HttpStore,
    JobApplication, MemoryStore, Seeder, WriteMode, send_application, send_contact,
};
use agency_devtools::liveness::{
    HttpProbe, LinkReport, LinkStatus, PollSettings, check_all, spawn_liveness_poller,
};

/// Content and ops tooling for the Northlight Studio site.
#[derive(Parser, Debug)]
#[command(name = "agency", author, version, about)]
struct Cli {
    /// TOML config file (missing file means defaults + environment).
    #[arg(long, global = true, default_value = "agency.toml")]
    config: PathBuf,
    /// Log level (trace|debug|info|warn|error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a JSON array of documents into the CMS.
    Seed(SeedArgs),
    /// Render and send a transactional email from a JSON submission.
    #[command(subcommand)]
    Mail(MailCommand),
    /// Check whether the local site and studio respond.
    Links(LinksArgs),
    /// Print the resolved configuration with secrets redacted.
    Config,
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// jobs | team | case-studies | posts
    collection: Collection,
    /// JSON file holding an array of records.
    #[arg(long)]
    file: PathBuf,
    /// Override the collection's default write mode.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Write into an in-memory dataset instead of the CMS.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Create,
    Upsert,
}

impl From<ModeArg> for WriteMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Create => WriteMode::Create,
            ModeArg::Upsert => WriteMode::Upsert,
        }
    }
}

#[derive(Subcommand, Debug)]
enum MailCommand {
    /// Contact-form enquiry.
    Contact(MailArgs),
    /// Job application.
    Application(MailArgs),
}

#[derive(Args, Debug)]
struct MailArgs {
    /// JSON file with the submission.
    #[arg(long)]
    file: PathBuf,
    /// Print the rendered email instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct LinksArgs {
    /// Keep polling until Ctrl-C.
    #[arg(long)]
    watch: bool,
    /// Seconds between rounds in watch mode.
    #[arg(long, default_value_t = 10)]
    interval_secs: u64,
    /// Per-link timeout in milliseconds.
    #[arg(long, default_value_t = 2000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = AgencyConfig::load(Some(&cli.config))
        .with_context(|| format!("loading {}", cli.config.display()))?;
    tracing::debug!(config = %cli.config.display(), "configuration resolved");

    match cli.command {
        Command::Seed(args) => run_seed(&config, args).await,
        Command::Mail(MailCommand::Contact(args)) => run_contact(&config, args).await,
        Command::Mail(MailCommand::Application(args)) => run_application(&config, args).await,
        Command::Links(args) => run_links(&config, args).await,
        Command::Config => {
            let rendered =
                toml::to_string_pretty(&config.redacted()).context("rendering config")?;
            print!("{rendered}");
            Ok(())
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level: {level}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

// ============================================================================
// seed
// ============================================================================

async fn run_seed(config: &AgencyConfig, args: SeedArgs) -> Result<()> {
    let data = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let docs = args.collection.parse_seed(&data)?;
    let mode = args
        .mode
        .map(WriteMode::from)
        .unwrap_or_else(|| args.collection.default_mode());

    if args.dry_run {
        seed_into(MemoryStore::new(), args.collection, &docs, mode).await
    } else {
        let store = HttpStore::from_config(&config.cms).context("CMS store not configured")?;
        seed_into(store, args.collection, &docs, mode).await
    }
}

async fn seed_into<S: DocumentStore>(
    store: S,
    collection: Collection,
    docs: &[agency_content::NewDocument],
    mode: WriteMode,
) -> Result<()> {
    let report = Seeder::new(store).run(docs, mode).await;
    for receipt in &report.written {
        println!("ok      {} ({:?})", receipt.id, receipt.operation);
    }
    for failure in &report.failed {
        println!("failed  {}: {}", failure.id, failure.error);
    }
    println!(
        "{collection}: {} created, {} replaced, {} failed ({mode})",
        report.created(),
        report.replaced(),
        report.failed.len()
    );
    if !report.is_success() {
        bail!("{} of {} documents failed", report.failed.len(), docs.len());
    }
    Ok(())
}

// ============================================================================
// mail
// ============================================================================

fn print_email(to: &str, body: &EmailBody) {
    println!("To: {to}");
    println!("Subject: {}", body.subject);
    println!();
    print!("{}", body.text);
}

async fn run_contact(config: &AgencyConfig, args: MailArgs) -> Result<()> {
    let submission: ContactSubmission = read_json(&args.file)?;
    if args.dry_run {
        submission.validate()?;
        print_email(&config.mail.to, &render_contact(&submission));
        return Ok(());
    }
    let mailer = HttpMailer::from_config(&config.mail)?;
    let id = send_contact(&mailer, &config.mail, &submission)
        .await
        .context("sending contact email")?;
    println!("sent {id}");
    Ok(())
}

async fn run_application(config: &AgencyConfig, args: MailArgs) -> Result<()> {
    let application: JobApplication = read_json(&args.file)?;
    if args.dry_run {
        application.validate()?;
        print_email(&config.mail.careers_to, &render_application(&application));
        return Ok(());
    }
    let mailer = HttpMailer::from_config(&config.mail)?;
    let id = send_application(&mailer, &config.mail, &application)
        .await
        .context("sending application email")?;
    println!("sent {id}");
    Ok(())
}

// ============================================================================
// links
// ============================================================================

fn print_reports(reports: &[LinkReport]) {
    for report in reports {
        let mark = match report.status {
            LinkStatus::Up => "up",
            LinkStatus::Down => "down",
            LinkStatus::Unknown => "?",
        };
        println!("{:<5} {:<10} {}", mark, report.link.label, report.link.url);
    }
}

async fn run_links(config: &AgencyConfig, args: LinksArgs) -> Result<()> {
    let settings = PollSettings {
        interval: Duration::from_secs(args.interval_secs.max(1)),
        timeout: Duration::from_millis(args.timeout_ms),
    };
    let links = config.overlay.links.clone();

    if !args.watch {
        let reports = check_all(&HttpProbe::default(), &links, settings.timeout).await;
        print_reports(&reports);
        return Ok(());
    }

    let poller = spawn_liveness_poller(HttpProbe::default(), links, settings);
    let mut statuses = poller.statuses();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = statuses.changed() => {
                if changed.is_err() {
                    break;
                }
                let reports = statuses.borrow_and_update().clone();
                print_reports(&reports);
                println!();
            }
        }
    }
    poller.stop();
    poller.wait().await.context("liveness poller panicked")?;
    Ok(())
}
