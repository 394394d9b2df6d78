// Command-line entry point.
// Thin collaborator over the API client: parses the subcommand, prints
// plain rows, and exits non-zero on any failure.

mod error;
mod github;
mod http;
mod storage;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use error::Result;
use github::GitHubApiClient;
use storage::{DiskStore, MemoryStore, Store};

#[derive(Parser)]
#[command(name = "reports", about = "Simple GitHub user and repository reports")]
struct Cli {
    /// Directory for a persistent response cache; in-memory when omitted
    #[arg(long, global = true, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Network timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Get information for a user
    UserInfo { username: String },
    /// List a user's public repositories with language statistics
    Repositories {
        username: String,
        /// Include forked repositories
        #[arg(long)]
        forks: bool,
    },
    /// List a user's recent public activity
    Activity { username: String },
    /// Create a private gist from a single file
    Gist {
        description: String,
        filename: String,
        contents: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("ERROR {err}");
        std::process::exit(1);
    }
}

/// Pick the injected store backend: file-backed when a cache directory
/// was given, otherwise process-local.
fn choose_store(cache_dir: Option<&Path>) -> Arc<dyn Store> {
    match cache_dir {
        Some(dir) => Arc::new(DiskStore::new(dir)),
        None => Arc::new(MemoryStore::new()),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = choose_store(cli.cache_dir.as_deref());
    let timeout = cli.timeout_secs.map(Duration::from_secs);
    let client = GitHubApiClient::from_env(store, timeout)?;

    match cli.command {
        Command::UserInfo { username } => {
            println!("Getting info for {username}...");
            let user = client.get_user(&username).await?;
            println!("name: {}", user.name.as_deref().unwrap_or("-"));
            println!("location: {}", user.location.as_deref().unwrap_or("-"));
            println!("public repos: {}", user.public_repos);
        }
        Command::Repositories { username, forks } => {
            println!("Fetching repository statistics for {username}...");
            let repos = client.public_repos_for_user(&username, forks).await?;
            println!("{username} has {} public repos.", repos.len());
            println!();
            for repo in repos {
                println!("{} - {}", repo.full_name, repo.svn_url);
                for (language, bytes) in &repo.languages {
                    println!("  {language}: {bytes} bytes");
                }
            }
        }
        Command::Activity { username } => {
            println!("Fetching public activity for {username}...");
            let events = client.public_events_for_user(&username).await?;
            for event in events {
                println!("{} - {}", event.event_type, event.repo_name);
            }
        }
        Command::Gist {
            description,
            filename,
            contents,
        } => {
            let url = client
                .create_private_gist(&description, &filename, &contents)
                .await?;
            println!("Created private gist: {url}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::message::{Headers, Response};
    use crate::storage::CacheEntry;
    use tempfile::TempDir;

    fn entry() -> CacheEntry {
        CacheEntry::new(Response::new(200, Headers::new(), b"{}".to_vec()))
    }

    #[test]
    fn cache_dir_selects_the_persistent_backend() {
        let temp_dir = TempDir::new().unwrap();
        let store = choose_store(Some(temp_dir.path()));

        store
            .set("https://api.github.com/users/octocat", entry())
            .unwrap();

        // The entry landed on disk, where a later process can find it.
        let files: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);

        let reopened = choose_store(Some(temp_dir.path()));
        assert!(
            reopened
                .get("https://api.github.com/users/octocat")
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn no_cache_dir_selects_the_in_memory_backend() {
        let store = choose_store(None);

        store
            .set("https://api.github.com/users/octocat", entry())
            .unwrap();

        assert!(
            store
                .get("https://api.github.com/users/octocat")
                .unwrap()
                .is_some()
        );
    }
}
