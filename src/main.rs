use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genpoll::cli::{Cli, Command};
use genpoll::config::GenpollConfig;
use genpoll::error::PollError;
use genpoll::polling::{
    Job, Outcome, PollObserver, PollReport, PollSettings, PollingEngine, Provider, TracingObserver,
};
use genpoll::providers::{DidClient, Options, RunwayClient};
use genpoll::services::{AvatarService, VideoService, polling_budget};
use genpoll::ui::ProgressObserver;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    match run(&cli, &cancel).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "genpoll=debug" } else { "genpoll=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: &Cli, cancel: &CancellationToken) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => GenpollConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => GenpollConfig::load().context("failed to load genpoll.toml")?,
    };

    match &cli.command {
        Command::Poll { provider, job_id } => {
            let provider = Provider::from(*provider);
            let job = Job::new(job_id.as_str());
            let reporter = Reporter::new(cli.verbose, &format!("{provider} job {job}"));

            let report = match provider {
                Provider::Runway => {
                    let client = runway_client(&config)?;
                    let engine = engine(cli, config.runway.poll_settings()?, &reporter)?;
                    engine.settle(&job, &provider.adapter(), &client, cancel).await
                }
                Provider::Did => {
                    let client = did_client(&config)?;
                    let engine = engine(cli, config.did.poll_settings()?, &reporter)?;
                    engine.settle(&job, &provider.adapter(), &client, cancel).await
                }
            };
            reporter.report(&report);
            Ok(exit_code(&report.outcome))
        }

        Command::ImageToVideo {
            image_url,
            prompt,
            wait,
        } => {
            let reporter = Reporter::new(cli.verbose, image_url);
            let service = video_service(cli, &config, &reporter)?;
            let job = service
                .image_to_video(image_url, prompt.as_deref(), Options::new())
                .await?;
            if !wait.wait {
                return Ok(submitted(&reporter, &job));
            }
            let result = service.completed_video_url(&job, cancel).await;
            Ok(reporter.finish(result))
        }

        Command::TextToVideo { prompt, wait } => {
            let reporter = Reporter::new(cli.verbose, prompt);
            let service = video_service(cli, &config, &reporter)?;
            let job = service
                .text_to_video(prompt, Options::new(), Options::new(), cancel)
                .await?;
            if !wait.wait {
                return Ok(submitted(&reporter, &job));
            }
            let result = service.completed_video_url(&job, cancel).await;
            Ok(reporter.finish(result))
        }

        Command::StyleTransfer {
            image_url,
            style_url,
            prompt,
            wait,
        } => {
            let reporter = Reporter::new(cli.verbose, image_url);
            let service = video_service(cli, &config, &reporter)?;
            let job = service
                .style_transfer(image_url, style_url, prompt.as_deref(), Options::new())
                .await?;
            if !wait.wait {
                return Ok(submitted(&reporter, &job));
            }
            let result = service.completed_video_url(&job, cancel).await;
            Ok(reporter.finish(result))
        }

        Command::Avatar {
            image_url,
            text,
            voice,
            voice_provider,
            wait,
        } => {
            let reporter = Reporter::new(cli.verbose, image_url);
            let client = did_client(&config)?;
            let engine = engine(cli, config.did.poll_settings()?, &reporter)?;
            let service =
                AvatarService::new(client, engine).with_default_voice(config.did.default_voice());
            let job = service
                .submit_talk(
                    image_url,
                    text,
                    voice.as_deref(),
                    voice_provider.as_deref(),
                    Options::new(),
                )
                .await?;
            if !wait.wait {
                return Ok(submitted(&reporter, &job));
            }
            let result = service.completed_avatar_video_url(&job, cancel).await;
            Ok(reporter.finish(result))
        }
    }
}

fn runway_client(config: &GenpollConfig) -> Result<RunwayClient> {
    let key = config.runway.api_key()?.to_string();
    Ok(RunwayClient::with_base_url(key, config.runway.base_url.clone())?)
}

fn did_client(config: &GenpollConfig) -> Result<DidClient> {
    let key = config.did.api_key()?.to_string();
    Ok(DidClient::with_base_url(key, config.did.base_url.clone())?)
}

fn video_service(
    cli: &Cli,
    config: &GenpollConfig,
    reporter: &Reporter,
) -> Result<VideoService<RunwayClient>> {
    let client = runway_client(config)?;
    let engine = engine(cli, config.runway.poll_settings()?, reporter)?;
    Ok(VideoService::new(client, engine))
}

/// Build an engine from the configured settings, overridden by CLI flags.
fn engine(cli: &Cli, configured: PollSettings, reporter: &Reporter) -> Result<PollingEngine> {
    let interval = cli
        .interval
        .map(Duration::from_secs)
        .unwrap_or(configured.poll_interval());
    let attempts = cli.max_attempts.unwrap_or(configured.max_attempts());
    let settings = PollSettings::new(interval, attempts)?;
    tracing::debug!(
        interval_secs = interval.as_secs(),
        attempts,
        budget_secs = polling_budget(settings).as_secs(),
        "poll settings",
    );
    Ok(PollingEngine::new(settings).with_observer(reporter.observer()))
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn submitted(reporter: &Reporter, job: &Job) -> ExitCode {
    reporter.clear();
    println!("{job}");
    ExitCode::SUCCESS
}

/// Terminal output: a spinner normally, plain tracing records with --verbose.
struct Reporter {
    progress: Option<Arc<ProgressObserver>>,
}

impl Reporter {
    fn new(verbose: bool, description: &str) -> Self {
        let progress = (!verbose).then(|| Arc::new(ProgressObserver::start(description)));
        Self { progress }
    }

    fn observer(&self) -> Arc<dyn PollObserver> {
        match &self.progress {
            Some(progress) => Arc::clone(progress) as Arc<dyn PollObserver>,
            None => Arc::new(TracingObserver),
        }
    }

    fn clear(&self) {
        if let Some(progress) = &self.progress {
            progress.clear();
        }
    }

    fn finish(&self, result: Result<Outcome, PollError>) -> ExitCode {
        let outcome = result.unwrap_or_else(|err| Outcome::Failure {
            reason: err.to_string(),
        });
        match &self.progress {
            Some(progress) => progress.complete(&outcome),
            None => println!("{outcome}"),
        }
        exit_code(&outcome)
    }

    fn report(&self, report: &PollReport) {
        match &self.progress {
            Some(progress) => {
                progress.complete(&report.outcome);
                progress.print_report(report);
            }
            None => println!(
                "{}",
                serde_json::to_string_pretty(report).unwrap_or_default()
            ),
        }
    }
}
