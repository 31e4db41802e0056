use crate::config::ExtractorConfig;
use crate::error::{self, ExtractError, Result};
use crate::fetch::{FileSource, HttpSource};
use crate::filter::Scope;
use crate::{Extractor, Report};
use clap::{Args, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Options shared by both tools
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Print the sidebar selection rationale and link counts
    #[arg(short, long)]
    pub verbose: bool,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Connect timeout in seconds [default: 10]
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds [default: 30]
    #[arg(long)]
    pub read_timeout: Option<u64>,

    /// User-Agent header sent with the request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Parse a saved copy of the page instead of fetching it
    #[arg(long, value_name = "HTML")]
    pub from_file: Option<PathBuf>,
}

impl CommonArgs {
    /// Base configuration from `--config` (or defaults) with flag overrides
    pub fn load_config(&self) -> Result<ExtractorConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractorConfig::from_file(path)?,
            None => ExtractorConfig::default(),
        };
        if let Some(secs) = self.connect_timeout {
            config.connect_timeout_secs = secs;
        }
        if let Some(secs) = self.read_timeout {
            config.read_timeout_secs = secs;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        Ok(config)
    }
}

/// Arguments of `sidebar-links`
#[derive(Parser, Debug)]
#[command(name = "sidebar-links")]
#[command(about = "Extract sidebar navigation links from a documentation page")]
#[command(version)]
pub struct SidebarArgs {
    /// Documentation page to extract sidebar links from [default: https://docs.molt.bot/]
    #[arg(long)]
    pub start_url: Option<String>,

    /// Output file path [default: links.txt]
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl SidebarArgs {
    pub fn config(&self) -> Result<ExtractorConfig> {
        let mut config = self.common.load_config()?;
        if let Some(start_url) = &self.start_url {
            config.start_url = start_url.clone();
        }
        if let Some(out) = &self.out {
            config.output = out.clone();
        }
        config.filter.scope = Some(Scope::Sidebar);
        config.include_text = false;
        Ok(config)
    }
}

/// Arguments of `scrape-links`
#[derive(Parser, Debug)]
#[command(name = "scrape-links")]
#[command(about = "Scrape hyperlinks from a webpage")]
#[command(version)]
pub struct ScrapeArgs {
    /// URL of the webpage to scrape
    pub url: String,

    /// Output file path
    pub output: PathBuf,

    /// Scope of links to extract [default: all, or the config file's scope]
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,

    /// Include link text in output (format: URL | Text)
    #[arg(long)]
    pub include_text: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ScrapeArgs {
    pub fn config(&self) -> Result<ExtractorConfig> {
        let mut config = self.common.load_config()?;
        config.start_url = self.url.clone();
        config.output = self.output.clone();
        let scope = self.scope.map(Scope::from).or(config.filter.scope);
        config.filter.scope = Some(scope.unwrap_or(Scope::All));
        if self.include_text {
            config.include_text = true;
        }
        Ok(config)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    All,
    Internal,
    External,
    Sidebar,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => Scope::All,
            ScopeArg::Internal => Scope::Internal,
            ScopeArg::External => Scope::External,
            ScopeArg::Sidebar => Scope::Sidebar,
        }
    }
}

/// Initialize logging; `verbose` raises this crate to debug level
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,sidebar_links=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();
}

/// Run one extraction, reading the page from `from_file` when given
pub async fn run(config: &ExtractorConfig, from_file: Option<&Path>) -> Result<Report> {
    let extractor = Extractor::new(config.clone());
    match from_file {
        Some(path) => extractor.run(&FileSource::new(path)).await,
        None => {
            let source = HttpSource::new(config).map_err(ExtractError::from)?;
            extractor.run(&source).await
        }
    }
}

/// Print a fatal error and its causes as a single line and pick the exit code
pub fn fail(err: &ExtractError) -> ExitCode {
    eprintln!("error: {}", error::report(err));
    ExitCode::FAILURE
}
