//! notegraph CLI

use anyhow::{Context, bail};
use clap::Parser;
use notegraph::{
    OutputFormat, WatcherConfig, Workspace, WorkspaceConfig, WorkspaceWatcher, render_graph,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Build the link graph of a notes directory and print it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Workspace root directory
    #[arg(env = "NOTEGRAPH_ROOT")]
    root: Option<PathBuf>,

    /// YAML workspace configuration file
    #[arg(short, long, env = "NOTEGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Document extensions, comma separated (overrides the config file)
    #[arg(long, value_delimiter = ',')]
    file_types: Vec<String>,

    /// Maximum title length in characters
    #[arg(long)]
    title_max_length: Option<usize>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Skip unreadable documents instead of failing
    #[arg(long, action = clap::ArgAction::SetTrue)]
    keep_going: bool,

    /// Keep running and update the graph as files change
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    watch: bool,

    /// Log filter used when NOTEGRAPH_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, action = clap::ArgAction::SetTrue)]
    log_json: bool,
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_env("NOTEGRAPH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load_config(args: &Args) -> anyhow::Result<WorkspaceConfig> {
    let mut config = match &args.config {
        Some(path) => WorkspaceConfig::load(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => WorkspaceConfig::default(),
    };

    match &args.root {
        Some(root) => config.root = root.clone(),
        None if args.config.is_none() => bail!("No workspace root given"),
        None => {}
    }

    if !args.file_types.is_empty() {
        config.set_file_types(args.file_types.iter().cloned());
    }
    if let Some(max) = args.title_max_length {
        config.title_max_length = max;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    log::info!("notegraph v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args).await?;
    let workspace = Workspace::new(config)?;

    let summary = if args.keep_going {
        workspace.initialize_isolated().await?
    } else {
        workspace.initialize().await?
    };
    log::info!(
        "Indexed {}/{} documents",
        summary.succeeded,
        summary.discovered
    );

    print_graph(&workspace, args.format).await?;

    if !args.watch {
        return Ok(());
    }

    let config = workspace.config();
    let (mut watcher, mut events) =
        WorkspaceWatcher::new(config.root.clone(), WatcherConfig::from(config));
    watcher.start()?;

    while let Some(event) = events.recv().await {
        log::debug!("File event: {:?}", event);
        if let Err(e) = workspace.handle_event(&event).await {
            log::warn!("Failed to apply {:?}: {}", event, e);
            continue;
        }
        print_graph(&workspace, args.format).await?;
    }

    watcher.stop();
    Ok(())
}

async fn print_graph(workspace: &Workspace, format: OutputFormat) -> anyhow::Result<()> {
    let graph = workspace.graph();
    let rendered = render_graph(&*graph.read().await, format)?;
    println!("{}", rendered);
    Ok(())
}
