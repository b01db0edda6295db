// ⚙️ Server configuration - CLI flags with environment fallbacks

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

pub const DEFAULT_LOG_FILTER: &str = "expense_tracker=info,tower_http=info";

/// Personal expense tracker - REST API server
#[derive(Debug, Clone, Parser)]
#[command(name = "expense-server", version, about)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "EXPENSE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "EXPENSE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Tracing filter used when RUST_LOG is not set
    #[arg(long, env = "EXPENSE_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
