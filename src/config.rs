use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;
use url::Url;

#[derive(Debug, Clone, Parser)]
pub struct Config {
    /// Base URL of the backend, e.g. `http://localhost:8000/`
    #[arg(long, env = "BASE_URL")]
    base_url: Url,
    /// User id attached to submitted reports
    #[arg(long, default_value = "anonymous", env = "UID")]
    uid: String,
    /// Device latitude
    #[arg(long, default_value = "0.0", env = "LATITUDE")]
    latitude: f64,
    /// Device longitude
    #[arg(long, default_value = "0.0", env = "LONGITUDE")]
    longitude: f64,
    /// Imgur API client id, needed only when reporting with an image
    #[arg(long, env = "IMGUR_CLIENT_ID")]
    imgur_client_id: Option<String>,
    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Config {
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .init();
    }
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
    pub fn uid(&self) -> &str {
        &self.uid
    }
    pub const fn location(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
    pub fn imgur_client_id(&self) -> Option<&str> {
        self.imgur_client_id.as_deref()
    }
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Parse the configuration from the environment and command line arguments
pub fn parse_args<T: Parser>() -> T {
    dotenv().ok();
    T::parse()
}
