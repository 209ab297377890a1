//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// linkvault - a small URL shortener backed by an append-only log
#[derive(Parser)]
#[command(name = "linkvault")]
#[command(version)]
#[command(about = "A small URL shortener backed by an append-only log", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Add a short link
    ///
    /// Usage: add [ALIAS] <TARGET_URL>
    /// - If only URL provided, allocates the next short id
    /// - If both provided, uses the alias
    Add {
        /// Positional args: [alias] <target_url>
        #[arg(required = true, num_args = 1..=2)]
        args: Vec<String>,
    },

    /// Print the target URL for a short id
    Resolve {
        /// Short id or alias
        id: String,
    },

    /// List all short links
    List,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Parse add command args into (alias, target_url)
    pub fn parse_add_args(args: &[String]) -> (Option<String>, String) {
        match args {
            [target] => (None, target.clone()),
            [alias, target, ..] => (Some(alias.clone()), target.clone()),
            [] => (None, String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_args() {
        let one = vec!["https://example.com".to_string()];
        assert_eq!(
            Commands::parse_add_args(&one),
            (None, "https://example.com".to_string())
        );

        let two = vec!["docs".to_string(), "https://example.com".to_string()];
        assert_eq!(
            Commands::parse_add_args(&two),
            (Some("docs".to_string()), "https://example.com".to_string())
        );
    }

    #[test]
    fn test_cli_parses_global_config() {
        let cli = Cli::try_parse_from(["linkvault", "-c", "custom.toml", "list"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(matches!(cli.command, Some(Commands::List)));

        let cli = Cli::try_parse_from(["linkvault"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_rejects_three_args() {
        assert!(Cli::try_parse_from(["linkvault", "add", "a", "b", "c"]).is_err());
        assert!(Cli::try_parse_from(["linkvault", "add"]).is_err());
    }
}
