//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each handler calls one facade operation and prints its result: JSON for
//! structured data, raw text for file content unless `--json` is given.

use anyhow::Result;

use super::args::Command;
use crate::backend::RepositoryAccessor;
use crate::facade::Gitoscope;
use crate::ui::output;

/// Run a parsed command against the facade.
pub async fn dispatch<A: RepositoryAccessor>(command: Command, gitoscope: &Gitoscope<A>) -> Result<()> {
    match command {
        Command::Status => output::print_json(&gitoscope.status().await?)?,
        Command::TreeContent { path, json } => {
            print_content(&gitoscope.tree_content(&path).await?, json)?
        }
        Command::CacheContent { path, json } => {
            print_content(&gitoscope.cache_content(&path).await?, json)?
        }
        Command::WorkingContent { path, json } => {
            print_content(&gitoscope.working_copy_content(&path).await?, json)?
        }
        Command::Commit { id } => output::print_json(&gitoscope.commit(&id).await?)?,
        Command::Tree { id } => output::print_json(&gitoscope.tree(&id).await?)?,
        Command::Blob { id } => output::print_json(&gitoscope.blob(&id).await?)?,
        Command::Refs => output::print_json(&gitoscope.references().await?)?,
    }
    Ok(())
}

fn print_content(text: &str, json: bool) -> Result<()> {
    if json {
        output::print_json(&text)?;
    } else {
        output::print_raw(text);
    }
    Ok(())
}
