//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;

/// Runtime settings for the `welcome` binary.
///
/// Every flag can also be set through the environment variable shown.
#[derive(Debug, Clone, Parser)]
#[command(name = "welcome", version, about = "Validating welcome/product API")]
pub struct Config {
    /// Socket address to listen on.
    #[arg(long, env = "WELCOME_ADDR", default_value = "127.0.0.1:8000")]
    pub addr: SocketAddr,

    /// Log filter directives, e.g. `welcome=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "welcome=info")]
    pub log_filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "welcome",
            "--addr",
            "0.0.0.0:9000",
            "--log-filter",
            "welcome=debug",
        ])
        .unwrap();
        assert_eq!(config.addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.log_filter, "welcome=debug");
    }

    #[test]
    fn rejects_malformed_address() {
        assert!(Config::try_parse_from(["welcome", "--addr", "localhost"]).is_err());
    }
}
