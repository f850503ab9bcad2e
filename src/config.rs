//! Command-line and environment configuration for the server binary.

use camino::Utf8PathBuf;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::board::domain::OrderingPolicy;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Serve a single Kanban board from JSON files.
#[derive(Debug, Clone, Parser)]
#[command(name = "kanban-sync", version, about)]
pub struct Cli {
    /// Directory holding tasks.json, columns.json and archived_tasks.json.
    #[arg(long, env = "KANBAN_DATA_DIR", default_value = ".", value_name = "DIR")]
    pub data_dir: Utf8PathBuf,

    /// Address to bind.
    #[arg(long, env = "KANBAN_BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "KANBAN_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// How column orderings are settled: `preserve` or `derive`.
    #[arg(long, env = "KANBAN_ORDERING", default_value_t = OrderingPolicy::Preserve)]
    pub ordering: OrderingPolicy,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Data directory.
    pub data_dir: Utf8PathBuf,
    /// Socket address to listen on.
    pub listen: SocketAddr,
    /// Column ordering policy.
    pub ordering: OrderingPolicy,
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        let level = if cli.verbose { "debug" } else { "info" };
        Self {
            data_dir: cli.data_dir,
            listen: SocketAddr::new(cli.bind, cli.port),
            ordering: cli.ordering,
            log_filter: format!("{level},tower_http=info"),
        }
    }
}
