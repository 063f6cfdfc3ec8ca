use anyhow::Result;
use clap::Parser;
use gmail_triage::cli::{self, Cli, Commands, ProgressReporter};
use gmail_triage::config::Config;
use gmail_triage::error::TriageError;
use gmail_triage::marker::TerminalPrompt;
use indicatif::MultiProgress;
use std::io::Write;
use std::process;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// A writer that prints through MultiProgress to avoid progress bar conflicts
#[derive(Clone)]
struct MultiProgressWriter {
    multi: Arc<MultiProgress>,
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MultiProgressWriter {
    fn new(multi: Arc<MultiProgress>) -> Self {
        Self {
            multi,
            buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Write for MultiProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        if !buffer.is_empty() {
            let msg = String::from_utf8_lossy(&buffer);
            let msg = msg.trim_end_matches('\n');
            if !msg.is_empty() {
                let _ = self.multi.println(msg);
            }
            buffer.clear();
        }
        Ok(())
    }
}

impl Drop for MultiProgressWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// MakeWriter implementation for tracing
#[derive(Clone)]
struct MultiProgressMakeWriter {
    multi: Arc<MultiProgress>,
}

impl MultiProgressMakeWriter {
    fn new(multi: Arc<MultiProgress>) -> Self {
        Self { multi }
    }
}

impl<'a> MakeWriter<'a> for MultiProgressMakeWriter {
    type Writer = MultiProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MultiProgressWriter::new(Arc::clone(&self.multi))
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        display_error(&e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    // On non-Windows platforms, use aws-lc-rs; on Windows, use ring (no NASM/CMake required)
    #[cfg(not(windows))]
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    #[cfg(windows)]
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_triage=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gmail_triage=info,warn"))
    };

    // Shared MultiProgress: logs print above progress bars
    let multi_progress = Arc::new(MultiProgress::new());
    let make_writer = MultiProgressMakeWriter::new(Arc::clone(&multi_progress));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let reporter = ProgressReporter::with_multi_progress((*multi_progress).clone());

    match &cli.command {
        Commands::Auth { force } => {
            let config = Config::load(&cli.config).await?;
            let email = cli::auth_command(&cli, &config, *force, &reporter).await?;

            println!("Successfully authenticated with Gmail API");
            println!("Token cached at: {:?}", cli.token_cache_path(&config));
            println!("Connected to account: {}", email);
            Ok(())
        }

        Commands::Delete { yes, .. } => {
            let mut config = Config::load(&cli.config).await?;
            cli.command.apply_overrides(&mut config);

            let mut prompt = TerminalPrompt::stdio();
            let report = cli::delete_command(&cli, &config, &mut prompt, *yes, &reporter).await?;

            println!();
            for line in report.summary_lines() {
                println!("{}", line);
            }
            Ok(())
        }

        Commands::Filter { .. } => {
            let mut config = Config::load(&cli.config).await?;
            cli.command.apply_overrides(&mut config);

            let mut prompt = TerminalPrompt::stdio();
            let report = cli::filter_command(&cli, &config, &mut prompt, &reporter).await?;

            println!();
            for line in report.summary_lines() {
                println!("{}", line);
            }
            Ok(())
        }

        Commands::InitConfig { output, force } => {
            tracing::info!("Generating example configuration file");

            if output.exists() && !*force {
                return Err(TriageError::ConfigError(format!(
                    "Configuration file already exists at {:?}. Use --force to overwrite.",
                    output
                ))
                .into());
            }

            Config::create_example(output).await?;

            println!("Created example configuration file at: {:?}", output);
            println!("\nKey settings to review:");
            println!("  - auth.credentials_path / auth.token_cache_path: OAuth files");
            println!("  - delete.remove_token_on_success: drop the token after deleting");
            println!("  - filter.accumulation: 'last-page' or 'merge'");
            println!("  - filter.add_label_ids / filter.remove_label_ids: filter actions");
            Ok(())
        }
    }
}

/// Display error with context
fn display_error(error: &anyhow::Error) {
    eprintln!("An error occurred: {}", error);

    for cause in error.chain().skip(1) {
        eprintln!("  Caused by: {}", cause);
    }

    if let Some(hint) = error.downcast_ref::<TriageError>().and_then(TriageError::hint) {
        eprintln!("\nHint: {}", hint);
    }
}
