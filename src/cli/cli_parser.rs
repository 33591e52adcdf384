use crate::cli::{Commands, HELP_TEMPLATE};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
   // Obtain during build time, not runtime
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
#[command(
    after_help = HELP_TEMPLATE.replace("%BINARY_NAME%", env!("CARGO_PKG_NAME"))
)]
pub struct Cli {
    /// Base path for the store (automatically created if it does not exist).
    #[arg(
        value_name = "storage",
        help = "Base path for the store. Shard files are created alongside it."
    )]
    pub storage: PathBuf,

    /// Number of shards to open the store with.
    #[arg(long = "shard-count", default_value_t = 1)]
    pub shard_count: usize,

    /// fsync/fdatasync after every durable write instead of relying on the
    /// OS page cache alone.
    #[arg(long = "write-through", default_value_t = false)]
    pub write_through: bool,

    /// Buffer size used when streaming bytes between stdin and the store
    /// (e.g. "64KB", "1MB"). Defaults to 64KB.
    #[arg(short = 'b', long = "buffer-size", value_name = "SIZE")]
    pub buffer_size: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}
