//! CLI mode
//!
//! One-shot commands that work on the data directory directly. `add` takes
//! the data directory lock, so it fails while a server is running.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::open_store;
use crate::services::LinkStore;

pub fn run_cli(command: Commands, config: &StaticConfig) -> Result<()> {
    match command {
        Commands::Serve => bail!("`serve` is handled by the server mode"),
        Commands::Add { args } => {
            let (alias, target) = Commands::parse_add_args(&args);
            add_link(config, alias, target)
        }
        Commands::Resolve { id } => resolve_link(config, &id),
        Commands::List => list_links(config),
        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => config_generate(output_path, force),
        },
    }
}

fn add_link(config: &StaticConfig, alias: Option<String>, target: String) -> Result<()> {
    let (store, _lock) = open_store(&config.storage)?;
    let id = store.create(alias.as_deref(), &target)?;

    if alias.is_none() {
        println!("{} Allocated id: {}", "ℹ".bold().blue(), id.magenta());
    }
    println!(
        "{} Added short link: {} -> {}",
        "✓".bold().green(),
        id.cyan(),
        target.blue().underline()
    );
    println!(
        "  {}/{}",
        config.server.public_url.trim_end_matches('/'),
        id
    );
    Ok(())
}

// Read-only commands skip the lock. A data directory without a link log
// is treated as empty and left untouched.
fn open_read_only(config: &StaticConfig) -> Result<Option<LinkStore>> {
    if !config.storage.links_path().exists() {
        return Ok(None);
    }
    let store = LinkStore::open(&config.storage).with_context(|| {
        format!(
            "Failed to load link store from {}",
            config.storage.links_path().display()
        )
    })?;
    Ok(Some(store))
}

fn resolve_link(config: &StaticConfig, id: &str) -> Result<()> {
    let target = open_read_only(config)?.and_then(|store| store.resolve(id));
    match target {
        Some(target) => {
            println!("{}", target);
            Ok(())
        }
        None => bail!("Short link not found: {}", id),
    }
}

fn list_links(config: &StaticConfig) -> Result<()> {
    let Some(store) = open_read_only(config)? else {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    };
    let links = store.links();

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short link list:".bold().green());
    println!();
    for link in &links {
        println!("  {} -> {}", link.id.cyan(), link.target.blue().underline());
    }
    println!();
    println!(
        "{} Total {} short links, next counter {}",
        "ℹ".bold().blue(),
        links.len().to_string().green(),
        store.next_counter().to_string().dimmed()
    );
    Ok(())
}

/// Generate example configuration file
fn config_generate(output_path: Option<String>, force: bool) -> Result<()> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    // 文件已存在时，非 --force 模式下交互确认
    if !force && Path::new(&path).exists() {
        print!(
            "{} {} {}",
            "File already exists:".yellow(),
            path.blue(),
            "Overwrite? [y/N] ".yellow()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", "Aborted.".red());
            return Ok(());
        }
    }

    StaticConfig::default()
        .save_to_file(&path)
        .with_context(|| format!("Unable to write configuration file {}", path))?;

    println!(
        "{} {}",
        "Configuration file generated successfully:".green(),
        path.blue()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> StaticConfig {
        let mut config = StaticConfig::default();
        config.storage = StorageConfig::in_dir(dir.path().join("data"));
        config
    }

    #[test]
    fn test_add_then_resolve() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        add_link(&config, None, "https://example.com".to_string()).unwrap();
        add_link(&config, Some("docs".to_string()), "https://docs.rs".to_string()).unwrap();

        let store = open_read_only(&config).unwrap().unwrap();
        assert_eq!(store.resolve("0"), Some("https://example.com".to_string()));
        assert_eq!(store.resolve("docs"), Some("https://docs.rs".to_string()));
        assert!(resolve_link(&config, "docs").is_ok());
        assert!(resolve_link(&config, "missing").is_err());
        // lock released after each command
        assert!(!config.storage.lock_path().exists());
    }

    #[test]
    fn test_read_only_commands_leave_fresh_dir_alone() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        assert!(resolve_link(&config, "x").is_err());
        list_links(&config).unwrap();
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn test_add_rejects_bad_target() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        assert!(add_link(&config, None, "not a url".to_string()).is_err());
    }

    #[test]
    fn test_config_generate_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.toml");
        std::fs::write(&path, "old").unwrap();

        config_generate(Some(path.to_string_lossy().into_owned()), true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[server]"));
        assert!(content.contains("[storage]"));
    }
}
