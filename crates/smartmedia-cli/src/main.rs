//! smartmedia - process one file the way a chat host would.
//!
//! Reads a file from disk, runs it through classification, validation and
//! the matching transform, and prints the outcome as JSON on stdout.
//!
//! # Usage
//!
//! ```text
//! smartmedia <FILE> [--config PATH] [--env] [--store DIR] [--no-chat] [--no-analysis] [--as pdf|json|text]
//! ```
//!
//! Without `--config` or `--env`, settings are read from
//! `~/.smartmedia/settings.json` and merged over the defaults.
//!
//! # Environment
//!
//! - `SMARTMEDIA_DATA_DIR` - Optional, defaults to `~/.smartmedia/data`
//! - `RUST_LOG` - Log filter, logs go to stderr

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use smartmedia_core::{
    DocumentOptions, DocumentSubtype, FileHandle, FsBinaryStore, JsonFileSettingsStore,
    MediaConfig, MediaProcessor, ProcessOutcome, TransformResult,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod surface;

use surface::{StderrSurface, TranscriptSurface};

#[derive(Debug, Default, PartialEq)]
struct Args {
    file: PathBuf,
    config: Option<PathBuf>,
    env: bool,
    store: Option<PathBuf>,
    no_chat: bool,
    no_analysis: bool,
    subtype: Option<DocumentSubtype>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut file = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--env" => parsed.env = true,
            "--store" => {
                let value = args.next().ok_or_else(|| anyhow!("--store needs a directory"))?;
                parsed.store = Some(PathBuf::from(value));
            }
            "--no-chat" => parsed.no_chat = true,
            "--no-analysis" => parsed.no_analysis = true,
            "--as" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("--as needs one of pdf, json, text"))?;
                let subtype = DocumentSubtype::from_str(&value)
                    .map_err(|_| anyhow!("unknown document subtype: {}", value))?;
                parsed.subtype = Some(subtype);
            }
            flag if flag.starts_with("--") => bail!("unknown option: {}", flag),
            path => {
                if file.is_some() {
                    bail!("only one file can be processed at a time");
                }
                file = Some(PathBuf::from(path));
            }
        }
    }

    parsed.file = file.ok_or_else(|| anyhow!("usage: smartmedia <FILE> [options]"))?;
    Ok(parsed)
}

fn load_config(args: &Args) -> Result<MediaConfig> {
    if let Some(path) = &args.config {
        return MediaConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }
    if args.env {
        return Ok(MediaConfig::from_env());
    }
    let store = JsonFileSettingsStore::default_location()?;
    tracing::debug!(path = %store.path().display(), "Reading host settings");
    Ok(MediaConfig::load_merged(&store)?)
}

fn data_dir(args: &Args) -> PathBuf {
    if let Some(dir) = &args.store {
        return dir.clone();
    }
    std::env::var("SMARTMEDIA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".smartmedia")
                .join("data")
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = load_config(&args)?;

    let data_dir = data_dir(&args);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let processor = MediaProcessor::builder()
        .config(config)
        .store(Arc::new(FsBinaryStore::new(&data_dir)))
        .chat_surface(Arc::new(TranscriptSurface::new(data_dir.join("chat.jsonl"))))
        .chat_surface(Arc::new(StderrSurface))
        .build();

    let file = FileHandle::from_path(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut options = DocumentOptions::default();
    if args.no_chat {
        options = options.without_chat();
    }
    if args.no_analysis {
        options = options.without_analysis();
    }

    let outcome = match args.subtype {
        Some(subtype) => match processor
            .process_document_as(&file, subtype, &options)
            .await
        {
            Ok(doc) => {
                ProcessOutcome::succeeded(&file.name, file.size_bytes, TransformResult::Document(doc))
            }
            Err(e) => ProcessOutcome::failed(
                &file.name,
                file.size_bytes,
                processor.classify(&file).kind(),
                &e,
            ),
        },
        None => processor.process_any_file(&file, &options).await,
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
