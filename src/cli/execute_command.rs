use crate::cli::{Cli, Commands};
use crate::codec::{BytesValueCodec, StringKeyCodec};
use crate::format_bytes;
use crate::storage_engine::ShardedStore;
use crate::utils::parse_buffer_size;
use std::io::{self, IsTerminal, Read, Write};
use tracing::{error, info, warn};

type Store = ShardedStore<StringKeyCodec, BytesValueCodec>;

fn open(cli: &Cli) -> Store {
    Store::open(&cli.storage, cli.shard_count, StringKeyCodec, BytesValueCodec, cli.write_through).unwrap_or_else(
        |err| {
            error!("failed to open storage at {:?}: {}", cli.storage, err);
            std::process::exit(1);
        },
    )
}

fn read_stdin(buffer_size: Option<&str>) -> Vec<u8> {
    let chunk_size = buffer_size
        .map(parse_buffer_size)
        .transpose()
        .unwrap_or_else(|err| {
            error!("{}", err);
            std::process::exit(1);
        })
        .unwrap_or(64 * 1024);

    let mut stdin = io::stdin().lock();
    let mut buf = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    loop {
        let n = stdin.read(&mut chunk).expect("failed to read stdin");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    buf
}

/// Executes one CLI command against a freshly opened store.
///
/// Mirrors the teacher crate's dispatch style: a single match over
/// `Commands`, each arm opening the store, performing the operation, and
/// printing or exiting on error.
pub fn execute_command(cli: &Cli) {
    match &cli.command {
        Commands::Get { key } => {
            let storage = open(cli);
            match storage.get(key) {
                Ok(Some(value)) => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    let is_terminal = handle.is_terminal();
                    match std::str::from_utf8(&value) {
                        Ok(text) if is_terminal => {
                            handle.write_all(text.as_bytes()).unwrap();
                            handle.write_all(b"\n").unwrap();
                        }
                        _ => handle.write_all(&value).unwrap(),
                    }
                }
                Ok(None) => {
                    error!("key '{}' not found", key);
                    std::process::exit(1);
                }
                Err(e) => {
                    error!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Put { key, value } => {
            let storage = open(cli);
            let bytes = match value {
                Some(value) => value.clone().into_bytes(),
                None if !io::stdin().is_terminal() => read_stdin(cli.buffer_size.as_deref()),
                None => {
                    error!("no value provided and stdin is a terminal");
                    std::process::exit(1);
                }
            };

            storage.put(key, &bytes).unwrap_or_else(|err| {
                error!("failed to write entry: {}", err);
                std::process::exit(1);
            });
            info!("stored '{}'", key);
        }

        Commands::Delete { key } => {
            let storage = open(cli);
            match storage.delete(key) {
                Ok(true) => warn!("deleted key '{}'", key),
                Ok(false) => warn!("key '{}' was not present", key),
                Err(e) => {
                    error!("failed to delete entry: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Scan => {
            let storage = open(cli);
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for result in storage.scan_live() {
                match result {
                    Ok((key, _value)) => writeln!(handle, "{key}").unwrap(),
                    Err(e) => {
                        error!("scan failed: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }

        Commands::Compact => {
            let storage = open(cli);
            info!("starting compaction across {} shard(s)...", storage.shard_count());
            match storage.compact_all(None) {
                Ok(stats) => {
                    let reclaimed: u64 = stats.iter().map(|s| s.bytes_reclaimed()).sum();
                    info!("compaction complete, reclaimed {}", format_bytes(reclaimed));
                }
                Err(e) => {
                    error!("compaction failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Info => {
            let storage = open(cli);
            let storage_size = storage.get_storage_size();
            let entry_count = storage.len();

            println!("\n{:=^50}", " STORAGE INFO ");
            println!("{:<25} {:?}", "STORAGE BASE PATH:", cli.storage);
            println!("{:-<50}", "");
            println!("{:<25} {}", "SHARD COUNT:", storage.shard_count());
            println!("{:<25} {}", "TOTAL SIZE:", format_bytes(storage_size));
            println!("{:<25} {}", "ACTIVE ENTRIES:", entry_count);
            println!("{:=<50}", "");
        }
    }
}
