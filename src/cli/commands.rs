use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read the value associated with a key
    Get {
        /// The key to read
        key: String,
    },

    /// Write a value for a given key
    Put {
        /// The key to write
        key: String,

        /// The value to store (optional; reads from stdin if not provided)
        value: Option<String>,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },

    /// List every live key, one per line
    Scan,

    /// Compact every shard, removing overwritten values and tombstones
    Compact,

    /// Show storage size, shard count, and estimated compaction savings
    Info,
}
