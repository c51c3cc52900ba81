//! Subcommands and the pieces they share: connection flags, definition kind
//! and the state file.

pub mod apply;
pub mod destroy;
pub mod import;
pub mod plan;
pub mod refresh;

use clap::{Args, ValueEnum};
use condor_client::config::parse_header_arg;
use condor_client::{HttpTransport, ProviderConfig};
use condor_core_types::ResourceKind;
use condor_engine::ResourceState;
use std::path::{Path, PathBuf};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Task definition
    Task,
    /// Workflow definition
    Workflow,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Task => ResourceKind::TaskDef,
            KindArg::Workflow => ResourceKind::WorkflowDef,
        }
    }
}

/// Where and how to reach Conductor
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// TOML file with endpoint, custom_headers and timeout_secs
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Conductor API endpoint, overrides the config file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Extra request header as KEY=VALUE, repeatable
    #[arg(long = "header", global = true)]
    pub headers: Vec<String>,
}

impl ConnectionArgs {
    /// Config file (if any) with command-line overrides applied
    pub fn provider_config(&self) -> Result<ProviderConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ProviderConfig::load(path)?,
            None => ProviderConfig::default(),
        };
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        for header in &self.headers {
            let (key, value) = parse_header_arg(header)?;
            config = config.with_header(key, value);
        }
        Ok(config)
    }

    pub fn transport(&self) -> Result<HttpTransport, Box<dyn std::error::Error>> {
        Ok(HttpTransport::new(&self.provider_config()?)?)
    }
}

/// Read a state file; `None` when it does not exist.
pub fn read_state(path: &Path) -> Result<Option<ResourceState>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)?;
    let state = serde_json::from_str(&text)
        .map_err(|e| format!("state file {} is unreadable: {}", path.display(), e))?;
    Ok(Some(state))
}

/// Read a state file that must exist.
pub fn require_state(path: &Path) -> Result<ResourceState, Box<dyn std::error::Error>> {
    read_state(path)?.ok_or_else(|| format!("no state file at {}", path.display()).into())
}

pub fn write_state(path: &Path, state: &ResourceState) -> CliResult {
    let text = serde_json::to_string_pretty(state)?;
    std::fs::write(path, text + "\n")?;
    Ok(())
}

pub fn remove_state(path: &Path) -> CliResult {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// `name` or `name@version` for user-facing messages
pub fn describe(state: &ResourceState) -> String {
    let name = state.name().unwrap_or("<unnamed>");
    match state.version {
        Some(version) => format!("{}@{}", name, version),
        None => name.to_string(),
    }
}
