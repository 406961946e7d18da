//! Command-line front end: extract normalized MathML from text files.

use clap::Parser;
use mathml_extract::{assemble_many, Error, ExtractConfig, MathBackend, Result};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mathml-extract",
    version,
    about = "Extract the $...$ / $$...$$ math in text documents as clean MathML."
)]
struct Cli {
    /// Input documents; reads stdin when none are given
    files: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Renderer backend (overrides the config file)
    #[arg(short, long, value_parser = parse_backend)]
    backend: Option<MathBackend>,

    /// Normalize spans on worker threads
    #[arg(long)]
    parallel: bool,

    /// Treat \$ as literal text instead of a delimiter
    #[arg(long)]
    skip_escaped_dollars: bool,

    /// Text printed for a document without usable math
    #[arg(long)]
    sentinel: Option<String>,
}

fn parse_backend(name: &str) -> std::result::Result<MathBackend, String> {
    match name {
        "mathml" => Ok(MathBackend::MathML),
        "katex" => Ok(MathBackend::KaTeX),
        other => Err(format!("unknown backend '{}' (expected mathml or katex)", other)),
    }
}

impl Cli {
    fn extract_config(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::load(path)?,
            None => ExtractConfig::default(),
        };

        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(sentinel) = &self.sentinel {
            config.sentinel = sentinel.clone();
        }
        config.parallel |= self.parallel;
        config.scan.skip_escaped_dollars |= self.skip_escaped_dollars;

        config.validate()?;
        Ok(config)
    }

    fn read_documents(&self) -> Result<Vec<String>> {
        if self.files.is_empty() {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            return Ok(vec![input]);
        }

        self.files
            .iter()
            .map(|path| {
                tracing::debug!(path = %path.display(), "reading document");
                std::fs::read_to_string(path).map_err(Error::from)
            })
            .collect()
    }

    fn run(&self) -> Result<()> {
        let config = self.extract_config()?;
        let renderer = config.renderer()?;
        let documents = self.read_documents()?;

        let assemblies = assemble_many(documents.iter().map(String::as_str), &renderer, &config);

        let failed: usize = assemblies.iter().map(|a| a.failures.len()).sum();
        for failure in assemblies.iter().flat_map(|a| &a.failures) {
            tracing::debug!("{}", failure);
        }
        if failed > 0 {
            tracing::info!(failed, "some math spans were skipped");
        }

        let output: Vec<&str> = assemblies.iter().map(|a| a.output.as_str()).collect();
        println!("{}", output.join("\n\n"));
        Ok(())
    }
}

/// Route panics to the log instead of stderr. Renderer panics are caught per
/// span and already reported as span failures.
fn init_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::debug!(%location, "panic caught: {}", info);
    }));
}

fn main() -> Result<()> {
    init_panic_hook();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mathml_extract=info")),
        )
        .init();

    Cli::parse().run()
}
