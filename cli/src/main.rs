//! Inquiry CLI - submit a property inquiry without a browser.
//!
//! ```text
//! main() -> load config -> submit | check-config | params
//!                             |
//!                             v
//!            TerminalSurface + FormController<EmailJs>
//! ```
//!
//! Logs go to `~/.inquiry/logs/inquiry.log` so visitor-facing messages on
//! stdout/stderr stay clean.

mod terminal;

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use inquiry_engine::inquiry_types::validate_form;
use inquiry_engine::{
    Clock, FieldId, FormFields, InquiryConfig, SubmitOutcome, SystemClock, build_template_params,
    emailjs_controller, feedback,
};

use terminal::TerminalSurface;

#[derive(Parser)]
#[command(name = "inquiry")]
#[command(about = "Send property inquiries through EmailJS")]
struct Cli {
    /// Config file to use instead of ~/.inquiry/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and send an inquiry
    Submit(FormArgs),
    /// Report whether email delivery is configured
    CheckConfig,
    /// Print the template parameters that would be sent, without sending
    Params(FormArgs),
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// invest, rent or design
    #[arg(long)]
    purpose: Option<String>,
}

impl FormArgs {
    fn into_fields(self) -> FormFields {
        FormFields {
            full_name: self.name,
            email: self.email,
            phone: self.phone,
            purpose: self.purpose,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.inquiry/logs/inquiry.log
    if let Some(config_path) = InquiryConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("inquiry.log"));
    }

    // Fallback: ./.inquiry/logs/inquiry.log
    candidates.push(PathBuf::from(".inquiry").join("logs").join("inquiry.log"));

    candidates
}

fn load_config(path: Option<&Path>) -> Result<InquiryConfig> {
    match path {
        Some(path) => InquiryConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(InquiryConfig::load()?.unwrap_or_default()),
    }
}

async fn submit(config: &InquiryConfig, args: FormArgs) -> Result<ExitCode> {
    let mut controller = emailjs_controller(config).context("building EmailJS client")?;
    let mut surface = TerminalSurface::new(args.into_fields());

    for field in FieldId::all() {
        feedback::on_blur(&mut surface, *field);
    }
    for field in surface.flagged_fields() {
        tracing::warn!(field = field.element_id(), "Field looks invalid");
    }

    let outcome = controller.submit(&mut surface).await;

    // Nobody is watching the message once the process exits.
    for (_, task) in surface.take_pending() {
        controller.run_deferred(&mut surface, task);
    }

    Ok(match outcome {
        SubmitOutcome::Sent(_) => ExitCode::SUCCESS,
        SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) | SubmitOutcome::Busy => {
            ExitCode::FAILURE
        }
    })
}

fn check_config(config: &InquiryConfig, path: Option<&Path>) -> ExitCode {
    let shown_path = path
        .map(Path::to_path_buf)
        .or_else(InquiryConfig::path)
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    let dispatch = config.dispatch_config();

    println!("config: {shown_path}");
    println!("api base: {}", config.api_base());
    if !config.api_base().to_ascii_lowercase().starts_with("https://") {
        println!("warning: api base is not https; sends will be refused");
    }
    println!("purposes: {}", config.form.purposes.choice_list());
    println!("public key: {:?}", dispatch.public_key());
    println!("service id: {}", dispatch.service_id());
    println!("template id: {}", dispatch.template_id());

    let unconfigured = dispatch.unconfigured_fields();
    if unconfigured.is_empty() {
        println!("email delivery: configured");
        ExitCode::SUCCESS
    } else {
        println!(
            "email delivery: not configured ({} unset)",
            unconfigured.join(", ")
        );
        ExitCode::FAILURE
    }
}

fn params(config: &InquiryConfig, args: FormArgs) -> Result<ExitCode> {
    let inquiry = match validate_form(&args.into_fields(), &config.form.purposes) {
        Ok(inquiry) => inquiry,
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let params = build_template_params(&inquiry, SystemClock.now());
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Submit(args) => submit(&config, args).await,
        Commands::CheckConfig => Ok(check_config(&config, cli.config.as_deref())),
        Commands::Params(args) => params(&config, args),
    }
}
