//! Outcome reporting in GitHub Actions workflow-command syntax.

use poster_engine::RunReport;
use poster_logging::poster_info;

/// Escape a message for a `::command::` line.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

pub fn warning_command(message: &str) -> String {
    format!("::warning::{}", escape_data(message))
}

/// Mark the job step as failed. The caller still exits normally with a failure code.
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}

pub fn announce(report: &RunReport) {
    match report {
        RunReport::Published { item, pushed } => {
            poster_info!("Published {}", item.link);
            if !pushed {
                poster_info!("Marker unchanged in git, nothing pushed");
            }
        }
        RunReport::AlreadyPublished { item } => {
            println!("{}", warning_command("Post was already published"));
            poster_info!(
                "Ending job because post was already published: {}",
                item.link
            );
        }
    }
}
