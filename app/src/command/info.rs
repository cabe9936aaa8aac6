use arka_config::Config;
use arka_memory::default_catalog;

/// Strategy for displaying configuration and catalog information.
///
/// Outputs:
/// - The config file location and whether it exists
/// - Extraction, capture and logging settings (defaults when no file)
/// - The pattern catalog in evaluation order
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== arka Configuration ===\n");

        println!("Config File:");
        println!("  Path: {}", config_path.display());
        let status = if config_path.exists() {
            "Found"
        } else {
            "Missing (defaults in use, run 'arka init')"
        };
        println!("  Status: {status}");
        println!();

        println!("Extraction:");
        println!(
            "  Default Agent: {}",
            config
                .extraction
                .default_agent_source
                .as_deref()
                .unwrap_or("(not set)")
        );
        println!();

        println!("Capture:");
        println!("  Max Content Bytes: {}", config.capture.max_content_bytes);
        match config.capture.default_project_id {
            Some(project_id) => println!("  Default Project: {project_id}"),
            None => println!("  Default Project: (not set, a new one per run)"),
        }
        println!();

        println!("Logging:");
        println!("  Level: {}", config.logging.level);
        println!();

        println!("Pattern Catalog:");
        for spec in default_catalog() {
            println!(
                "  {:<20} weight={} importance_base={} triggers={}",
                spec.id(),
                spec.weight,
                spec.importance_base,
                spec.triggers.join(", ")
            );
        }

        Ok(())
    }
}
