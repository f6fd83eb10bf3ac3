//! Gitoscope binary entry point.

use std::process::ExitCode;

use gitoscope::cli;
use gitoscope::ui::output;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
