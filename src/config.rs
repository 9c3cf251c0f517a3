use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::serpapi::client::DEFAULT_BASE_URL;

/// Searches Dcard, PTT and Mobile01 through SerpApi.
///
/// Every option can also be set through its environment variable or a `.env` file.
#[derive(Parser)]
#[command(version, about)]
pub struct Config {
    /// SerpApi credential. Without it every forum returns an empty list.
    #[arg(long, env = "SERPAPI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Address to bind.
    #[arg(long, env = "BIND_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Upper bound on one forum's SerpApi call, in seconds.
    #[arg(
        long,
        env = "SOURCE_TIMEOUT_SECS",
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub source_timeout_secs: u64,

    /// Directory served for paths no API route matches.
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    #[arg(long, env = "SERPAPI_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub serpapi_base_url: String,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("forum-search").chain(args.iter().copied()))
    }

    #[test]
    fn explicit_flags_are_applied() {
        let config = parse(&[
            "--api-key",
            "abc",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--source-timeout-secs",
            "3",
            "--static-dir",
            "public",
        ])
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.source_timeout(), Duration::from_secs(3));
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse(&["--source-timeout-secs", "0"]).is_err());
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(parse(&["--port", "70000"]).is_err());
    }
}
