use crate::config::{toml_config::TomlConfig, AppConfig, ConfigOverrides, API_KEY_ENV};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "shoppies")]
#[command(about = "Search OMDb, nominate up to five movies, and share the list")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML settings file")]
    pub config: Option<String>,

    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    #[arg(long, global = true, help = "Directory holding saved nominations")]
    pub storage_path: Option<String>,

    #[arg(long, global = true, help = "Origin used to build share links")]
    pub origin: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search the catalog and show results next to your nominations
    Search { query: String },
    /// Nominate a movie by catalog identifier (e.g. tt0208092)
    Nominate { id: String },
    /// Remove a nomination
    Remove { id: String },
    /// Show your nominations
    List,
    /// Print the share link once five movies are nominated
    Share {
        #[arg(long, help = "Also copy the link to the clipboard")]
        copy: bool,
    },
    /// Show the list encoded in a received share link
    Open { url: String },
}

impl CliConfig {
    pub fn resolve(&self) -> Result<AppConfig> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };

        AppConfig::resolve(
            ConfigOverrides {
                api_key: self.api_key.clone(),
                api_base_url: self.api_base_url.clone(),
                storage_path: self.storage_path.clone(),
                origin: self.origin.clone(),
            },
            file,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_with_global_flags() {
        let cli = CliConfig::try_parse_from([
            "shoppies",
            "search",
            "Snatch",
            "--api-key",
            "k",
            "--origin",
            "https://shoppies.example",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Command::Search { ref query }) if query == "Snatch"));
        let config = cli.resolve().unwrap();
        assert_eq!(config.origin, "https://shoppies.example");
    }

    #[test]
    fn test_share_copy_flag() {
        let cli = CliConfig::try_parse_from(["shoppies", "share", "--copy"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Share { copy: true })));
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = CliConfig::try_parse_from(["shoppies"]).unwrap();
        assert!(cli.command.is_none());
    }
}
