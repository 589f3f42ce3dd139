use anyhow::{Context, Result};
use colored::Colorize;
use tracing::error;

use crate::{
    app::{init_config, load_config, AppState, Config},
    server,
};

use super::{Cli, Commands};

/// Resolve configuration from files, environment and command-line overrides
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = load_config(cli.config.as_deref())?;

    if let Some(data_dir) = &cli.data_dir {
        config.cache.data_dir = data_dir.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    Ok(config)
}

/// Handle CLI subcommands
pub async fn handle_command(cli: &Cli) -> Result<()> {
    match cli.command.clone().unwrap_or(Commands::Serve) {
        Commands::Init => {
            let (path, created) = init_config(cli.config.clone())?;
            if created {
                println!("Created default configuration at: {}", path.display());
            } else {
                println!("Configuration already exists at: {}", path.display());
            }
            Ok(())
        }
        Commands::Version => {
            show_version();
            Ok(())
        }
        Commands::Serve => {
            let state = build_state(cli)?;
            server::serve(state).await
        }
        Commands::Fetch { ids, all } => {
            let state = build_state(cli)?;
            let ids = if all {
                state.catalog.chapters().iter().map(|c| i64::from(c.id)).collect()
            } else {
                ids
            };
            fetch_chapters(&state, &ids).await
        }
        Commands::List => {
            let state = build_state(cli)?;
            list_chapters(&state).await
        }
    }
}

fn build_state(cli: &Cli) -> Result<AppState> {
    let config = resolve_config(cli)?;
    AppState::new(config).context("Failed to initialise application state")
}

/// Populate the cache for the given chapters, reporting each result
pub async fn fetch_chapters(state: &AppState, ids: &[i64]) -> Result<()> {
    let mut failed = 0usize;

    for &id in ids {
        match state.cache.ensure(id).await {
            Ok(paths) => {
                println!("  {} chapter {}", "[OK]".green(), id);
                println!("      {}", paths.json_path.display());
                println!("      {}", paths.audio_path.display());
            }
            Err(e) => {
                failed += 1;
                error!("chapter {}: {}", id, e);
                println!("  {} chapter {}: {}", "[ERROR]".red(), id, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} chapters failed", failed, ids.len());
    }
    Ok(())
}

/// Print the catalog with the local cache state of each chapter
pub async fn list_chapters(state: &AppState) -> Result<()> {
    println!("Chapters (data dir: {}):", state.cache.data_dir().display());

    for record in state.catalog.chapters() {
        let status = state.cache.status(i64::from(record.id)).await?;
        let marker = if status.is_complete() {
            "cached".green()
        } else if status.json_cached || status.audio_cached {
            "partial".yellow()
        } else {
            "remote".dimmed()
        };
        println!("  {:>2}  {:<32} [{}]", record.id, record.name, marker);
    }

    Ok(())
}

/// Show version information
pub fn show_version() {
    println!("gita-server v{}", env!("CARGO_PKG_VERSION"));
    println!("   Lazily cached Gita chapter metadata and audio");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::origin::MockOrigin;
    use clap::Parser;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn state_with(origin: MockOrigin, temp_dir: &TempDir) -> AppState {
        let mut config = Config::default();
        config.cache.data_dir = temp_dir.path().to_path_buf();
        AppState::with_origin(config, Catalog::gita(), Arc::new(origin))
    }

    #[tokio::test]
    async fn test_fetch_reports_unknown_ids() {
        let temp_dir = TempDir::new().unwrap();
        let mut origin = MockOrigin::new();
        origin
            .expect_fetch_text()
            .times(1)
            .returning(|_| Ok("{}".to_string()));
        origin.expect_fetch_to_file().times(1).returning(|_, dest| {
            std::fs::write(dest, b"audio").unwrap();
            Ok(())
        });
        let state = state_with(origin, &temp_dir);

        let result = fetch_chapters(&state, &[1, 99]).await;

        assert!(result.is_err());
        assert!(temp_dir.path().join("01").join("plain_chapter.m4a").is_file());
        assert!(!temp_dir.path().join("99").exists());
    }

    #[tokio::test]
    async fn test_list_does_not_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let mut origin = MockOrigin::new();
        origin.expect_fetch_text().never();
        origin.expect_fetch_to_file().never();

        list_chapters(&state_with(origin, &temp_dir)).await.unwrap();
    }

    #[test]
    fn test_cli_overrides_win() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[cache]\ndata_dir = \"/from/file\"\n").unwrap();

        let cli = Cli::parse_from([
            "gita",
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            "/from/cli",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.cache.data_dir, std::path::PathBuf::from("/from/cli"));
    }
}
