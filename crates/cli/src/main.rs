//! Achievement CLI - inspect, edit and merge achievement save files.

use std::path::{Path, PathBuf};

use achieve_core::{AchievementDefinition, AchievementId, PersistedSnapshot, PolicyMode};
use achieve_registry::AchievementRegistry;
use achieve_storage::{BackendConfig, JsonSnapshotStore, PersistentBackend, SnapshotStore};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "achieve")]
#[command(about = "Achievement state inspection and save reconciliation", long_about = None)]
struct Cli {
    /// Save file to operate on
    #[arg(long, default_value = ".achievements/save.json")]
    save: PathBuf,

    /// JSON file with an array of achievement definitions
    #[arg(long)]
    defs: Option<PathBuf>,

    /// Fail on progress for achievements without stat_max
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show unlocked achievements and progress
    Show,
    /// Unlock an achievement
    Grant {
        /// Achievement ID
        id: String,
    },
    /// Remove an unlock and its progress
    Clear {
        /// Achievement ID
        id: String,
    },
    /// Remove every unlock and all progress
    ClearAll,
    /// Report progress toward an achievement
    Progress {
        /// Achievement ID
        id: String,
        /// Completed units so far
        completed: u64,
    },
    /// Merge another save file into this one
    Merge {
        /// Save file to merge in
        other: PathBuf,
        /// Write the merged result here instead of over --save
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let definitions = match &cli.defs {
        Some(path) => load_definitions(path).await?,
        None => Vec::new(),
    };

    let mut store = JsonSnapshotStore::new(&cli.save).await?;
    let snapshot = store.load().await?.unwrap_or_default();

    let mode = if cli.strict {
        PolicyMode::Strict
    } else {
        PolicyMode::Permissive
    };
    let mut registry = AchievementRegistry::with_local(PersistentBackend::from_snapshot(snapshot))
        .with_config(BackendConfig { mode });
    for definition in &definitions {
        registry.register(definition);
    }

    match cli.command {
        Commands::Show => {
            print!("{}", render(&registry.snapshot(), &definitions));
        }
        Commands::Grant { id } => {
            let id = AchievementId::new(id);
            registry.grant(&id);
            store.save(&registry.snapshot()).await?;
            println!("Granted {}", id);
        }
        Commands::Clear { id } => {
            let id = AchievementId::new(id);
            registry.clear(&id);
            store.save(&registry.snapshot()).await?;
            println!("Cleared {}", id);
        }
        Commands::ClearAll => {
            registry.clear_all();
            store.save(&registry.snapshot()).await?;
            println!("Cleared all achievements");
        }
        Commands::Progress { id, completed } => {
            let id = AchievementId::new(id);
            registry.progress(&id, completed)?;
            store.save(&registry.snapshot()).await?;
            println!(
                "{}: {}{}",
                id,
                registry.get_progress(&id),
                if registry.has(&id) { " (unlocked)" } else { "" }
            );
        }
        Commands::Merge { other, output } => {
            let theirs = JsonSnapshotStore::new(&other)
                .await?
                .load()
                .await?
                .with_context(|| format!("No save found at {}", other.display()))?;
            registry.merge_snapshot(&theirs);

            let merged = registry.snapshot();
            match output {
                Some(path) => JsonSnapshotStore::new(&path).await?.save(&merged).await?,
                None => store.save(&merged).await?,
            }
            info!(
                "Merged {} into {} ({} unlocked, {} tracked)",
                other.display(),
                cli.save.display(),
                merged.unlocked.len(),
                merged.progress.len()
            );
        }
    }

    Ok(())
}

async fn load_definitions(path: &Path) -> Result<Vec<AchievementDefinition>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read definitions from {}", path.display()))?;
    let definitions = serde_json::from_str(&json)
        .with_context(|| format!("Invalid definitions in {}", path.display()))?;
    Ok(definitions)
}

fn render(snapshot: &PersistedSnapshot, definitions: &[AchievementDefinition]) -> String {
    let stat_max = |id: &AchievementId| {
        definitions
            .iter()
            .rev()
            .find(|d| &d.id == id)
            .and_then(|d| d.stat_max)
    };

    let mut out = format!("Unlocked ({})\n", snapshot.unlocked.len());
    for id in snapshot.unlocked.iter() {
        out.push_str(&format!("  {}\n", id));
    }

    out.push_str(&format!("Progress ({})\n", snapshot.progress.len()));
    for (id, completed) in snapshot.progress.iter() {
        match stat_max(id) {
            Some(max) => out.push_str(&format!("  {}: {}/{}\n", id, completed, max)),
            None => out.push_str(&format!("  {}: {}\n", id, completed)),
        }
    }
    out
}
