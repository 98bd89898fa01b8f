use clap::{Parser, ValueEnum};
use rangelink_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "RANGELINK_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "RANGELINK_PUBLIC_BASE_URL";
pub const START_ID_ENV: &str = "RANGELINK_START_ID";
pub const BLOCK_SIZE_ENV: &str = "RANGELINK_BLOCK_SIZE";
pub const STORAGE_BACKEND_ENV: &str = "RANGELINK_STORAGE_BACKEND";
pub const SQLITE_URL_ENV: &str = "RANGELINK_SQLITE_URL";
pub const LOG_FORMAT_ENV: &str = "RANGELINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rangelink")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix of the short links handed back to clients.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    /// First id the range coordinator hands out.
    #[arg(
        long,
        env = START_ID_ENV,
        default_value_t = rangelink_lease::DEFAULT_START_ID
    )]
    pub start_id: u64,

    /// Number of ids in each leased block.
    #[arg(
        long,
        env = BLOCK_SIZE_ENV,
        default_value_t = rangelink_lease::DEFAULT_BLOCK_SIZE
    )]
    pub block_size: u64,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_URL_ENV, required_if_eq("storage", "sqlite"))]
    pub sqlite_url: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}
