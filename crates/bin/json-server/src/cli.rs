//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Serve a JSON file as a REST API
#[derive(Parser, Debug)]
#[command(name = "json-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Port to listen on [default: 3000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// JSON document to serve [default: db.json]
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Log every request
    #[arg(short, long)]
    pub logs: bool,

    /// TOML configuration file [default: json-server.toml, if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,
}

impl Cli {
    /// Apply the flags given on the command line over `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(file) = &self.file {
            config.storage.file.clone_from(file);
        }
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if self.logs {
            config.logging.enabled = true;
        }
    }
}
