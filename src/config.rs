//! Configuration
//!
//! CLI arguments and environment variable handling using clap. The two store
//! secrets are normally injected through the environment; everything else has
//! a sensible default.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Backend for The AI Files content site.
#[derive(Parser, Debug, Clone)]
#[command(name = "aifiles-api")]
#[command(about = "Feedback/reaction counters, RSS feed and sitemap for The AI Files")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Canonical site root, used for feed links and the sitemap
    #[arg(long, env = "SITE_URL", default_value = "https://theaifiles.app")]
    pub site_url: String,

    /// The one origin allowed to call the counter resources cross-origin
    #[arg(long, env = "ALLOW_ORIGIN", default_value = "https://theaifiles.app")]
    pub allow_origin: String,

    /// REST endpoint of the hosted hash store
    #[arg(long, env = "KV_REST_API_URL")]
    pub kv_rest_api_url: Option<String>,

    /// Access token for the hosted hash store
    #[arg(long, env = "KV_REST_API_TOKEN")]
    pub kv_rest_api_token: Option<String>,

    /// Path to the static story catalog
    #[arg(long, env = "STORIES_PATH", default_value = "data/stories.json")]
    pub stories: PathBuf,

    /// Run against an in-memory store instead of the hosted one
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// A production start needs both store secrets; dev mode runs without.
    pub fn validate(&self) -> Result<(), String> {
        if self.dev_mode {
            return Ok(());
        }
        if self.kv_rest_api_url.is_none() {
            return Err("KV_REST_API_URL is required outside dev mode".to_string());
        }
        if self.kv_rest_api_token.is_none() {
            return Err("KV_REST_API_TOKEN is required outside dev mode".to_string());
        }
        Ok(())
    }
}
