mod cli;
mod logging;
mod report;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use poster_core::RunConfig;
use poster_engine::{
    FeedSettings, GitCli, LinkedInClient, ReqwestFeedReader, RunReport, Workflow,
};
use poster_logging::{poster_debug, poster_error};

use crate::cli::Cli;
use crate::logging::LogDestination;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(
        LogDestination::from_log_file(cli.log_file.as_deref()),
        poster_logging::level_from_env(),
    );

    match run(&cli) {
        Ok(outcome) => {
            report::announce(&outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            poster_error!("{:#}", err);
            report::set_failed(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<RunReport> {
    // Validation happens before any network call.
    let config = RunConfig::from_inputs(cli.raw_inputs())?;
    poster_debug!("{:?}", config);

    let reader = ReqwestFeedReader::new(FeedSettings::default());
    let client =
        LinkedInClient::new(cli.api_settings()?).context("failed to build LinkedIn client")?;
    let vcs = GitCli::new(&config.workspace);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let outcome = runtime
        .block_on(Workflow::new(&reader, &client, &vcs).run(&config))
        .context("Action failed")?;
    Ok(outcome)
}
