mod cmd;
mod config;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(about, author, version)]
struct Args {
    /// Path to the configuration file. Default to ~/.config/gallery/config.json when it exists.
    #[clap(short, long, env = "GALLERY_CONFIG")]
    config: Option<PathBuf>,
    /// Directory holding the cached payloads
    #[clap(long, env = "GALLERY_CACHE_DIR")]
    cache_dir: Option<PathBuf>,
    /// Log what is happening, overridden by RUST_LOG
    #[clap(short, long)]
    verbose: bool,
    #[clap(subcommand)]
    command: cmd::Command,
}

impl Args {
    fn set_log_level(&self) {
        let default = if self.verbose { "info" } else { "warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.set_log_level();

    let ctx = if args.command.needs_context() {
        let config = config::Config::load(args.config.as_deref())?;
        let ctx = config.build(args.cache_dir)?;
        tracing::debug!("using cache directory {:?}", ctx.cache_dir());
        Some(ctx)
    } else {
        None
    };
    args.command.execute(ctx.as_ref()).await
}
