use anyhow::{Context, anyhow};
use chorus::cli::output::Output;
use chorus::cli::{Cli, read_question};
use chorus::{ChorusConfig, Config, Pipeline, PipelineReport};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Run finished but at least one backend or memory call failed
const EXIT_PARTIAL_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(report) if report.is_complete() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_PARTIAL_FAILURE),
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "chorus=debug" } else { "chorus=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<PipelineReport> {
    // Credentials and backends are validated before anything is asked or sent
    let config = Config::from_env().context("Failed to load credentials")?;
    let mut chorus = ChorusConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    if cli.concurrent {
        chorus.pipeline.concurrent = true;
    }

    let pipeline = Pipeline::from_config(&chorus, &config)?;
    output.banner(pipeline.registry().len());

    let prompt = match cli.prompt {
        Some(prompt) => prompt,
        None => read_question(&mut io::stdin().lock(), &mut io::stdout())?
            .ok_or_else(|| anyhow!("No question given on standard input"))?,
    };

    output.info(&format!(
        "Interacting with {} backends...",
        pipeline.registry().len()
    ));
    let report = pipeline.run(&prompt).await?;
    output.report(&report);
    Ok(report)
}
