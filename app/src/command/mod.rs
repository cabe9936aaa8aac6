//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input type, so
//! dispatch in `main` is resolved at compile time.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

mod capture;
mod completion;
mod extract;
mod info;
mod init;
mod summary;
mod version;

pub use capture::{CaptureInput, CaptureStrategy};
pub use completion::{CompletionInput, CompletionStrategy};
pub use extract::{ExtractInput, ExtractStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use summary::{SummaryInput, SummaryStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Read text from a file, or from stdin when no path is given.
async fn read_text(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => tokio::task::spawn_blocking(|| {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok::<_, anyhow::Error>(text)
        })
        .await?,
    }
}

/// Print a value as JSON on stdout.
fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
    Ok(())
}
