use anyhow::{Context, bail};
use clap::Parser;
use core::time::Duration;
use std::net::SocketAddr;

/// Runtime configuration for the `shippy-server` binary.
///
/// Every value can be given as a CLI flag or an environment variable (a `.env`
/// file is loaded first). Nothing about the listener is fixed at compile time,
/// so several servers can run side by side with different bindings.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shippy-server",
    version,
    about = "A gRPC service that stores shipping consignments"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix
    /// socket).
    ///
    /// Example: "0.0.0.0:50051" or "/tmp/shippy.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:50051"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a
    /// file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Number of consignments to pre-allocate room for in the repository.
    ///
    /// Only avoids early reallocations; the repository grows past it freely.
    ///
    /// Environment variable: `INITIAL_CAPACITY`
    #[arg(long, env = "INITIAL_CAPACITY", default_value_t = 0)]
    pub initial_capacity: usize,

    /// Seconds to wait for in-flight calls to finish after a shutdown signal.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT`
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 5)]
    pub shutdown_timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub initial_capacity: usize,
    pub shutdown_timeout: Duration,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.server_addr.trim().is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        if !args.uds {
            args.server_addr
                .parse::<SocketAddr>()
                .with_context(|| format!("SERVER_ADDR ({}) is not a valid socket address", args.server_addr))?;
        }

        if args.shutdown_timeout == 0 {
            bail!("SHUTDOWN_TIMEOUT must be greater than 0");
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            initial_capacity: args.initial_capacity,
            shutdown_timeout: Duration::from_secs(args.shutdown_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ServerConfig> {
        let args = CliArgs::try_parse_from(std::iter::once("shippy-server").chain(args.iter().copied()))?;
        ServerConfig::try_from(args)
    }

    #[test]
    fn explicit_flags_are_carried_over() {
        let config = parse(&[
            "--server-addr",
            "127.0.0.1:6000",
            "--initial-capacity",
            "128",
            "--shutdown-timeout",
            "2",
        ])
        .unwrap();

        assert_eq!(
            config,
            ServerConfig {
                server_addr: "127.0.0.1:6000".to_string(),
                uds: false,
                initial_capacity: 128,
                shutdown_timeout: Duration::from_secs(2),
            }
        );
    }

    #[test]
    fn tcp_address_must_parse() {
        let err = parse(&["--server-addr", "not-an-address"]).unwrap_err();
        assert!(err.to_string().contains("not a valid socket address"));
    }

    #[test]
    fn unix_socket_path_is_accepted_with_uds() {
        let config = parse(&["--uds", "--server-addr", "/tmp/shippy.sock"]).unwrap();
        assert!(config.uds);
        assert_eq!(config.server_addr, "/tmp/shippy.sock");
    }

    #[test]
    fn empty_address_is_rejected() {
        let err = parse(&["--uds", "--server-addr", "  "]).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn zero_shutdown_timeout_is_rejected() {
        let err = parse(&["--server-addr", "127.0.0.1:6000", "--shutdown-timeout", "0"]).unwrap_err();
        assert!(err.to_string().contains("SHUTDOWN_TIMEOUT"));
    }
}
