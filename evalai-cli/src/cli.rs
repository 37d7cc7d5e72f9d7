use std::path::PathBuf;

use clap::Parser;

use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(
    name = "evalai-demo",
    about = "Run a demo evaluation on the AI evaluation platform"
)]
#[command(version)]
pub struct Cli {
    /// Where to write the result JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Platform base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides; flags win over every other layer.
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.client.base_url = base_url.clone();
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
