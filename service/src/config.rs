use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Default LiveKit Cloud API base URL used when `LIVEKIT_ANALYTICS_BASE_URL` is not set.
pub const DEFAULT_LIVEKIT_ANALYTICS_BASE_URL: &str = "https://cloud-api.livekit.io";

/// Default lifetime, in seconds, of the bearer token minted for each analytics request.
pub const DEFAULT_LIVEKIT_TOKEN_TTL_SECS: u64 = 600;

/// Upper bound accepted for `LIVEKIT_TOKEN_TTL_SECS`: one day.
pub const MAX_LIVEKIT_TOKEN_TTL_SECS: u64 = 86_400;

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The API key used as the issuer of analytics access tokens.
    #[arg(long, env)]
    livekit_api_key: Option<String>,

    /// The API secret used to sign analytics access tokens.
    #[arg(long, env, hide_env_values = true)]
    livekit_api_secret: Option<String>,

    /// The LiveKit Cloud project whose session history is queried.
    #[arg(long, env)]
    livekit_project_id: Option<String>,

    /// The base URL of the LiveKit Cloud analytics API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_LIVEKIT_ANALYTICS_BASE_URL)]
    livekit_analytics_base_url: String,

    /// Lifetime in seconds of each minted analytics access token
    #[arg(
        long,
        env,
        default_value_t = DEFAULT_LIVEKIT_TOKEN_TTL_SECS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_LIVEKIT_TOKEN_TTL_SECS)
    )]
    pub livekit_token_ttl_secs: u64,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Returns the analytics API key, if configured.
    pub fn livekit_api_key(&self) -> Option<String> {
        self.livekit_api_key.clone()
    }

    /// Returns the analytics API secret, if configured.
    pub fn livekit_api_secret(&self) -> Option<String> {
        self.livekit_api_secret.clone()
    }

    /// Returns the analytics project identifier, if configured.
    pub fn livekit_project_id(&self) -> Option<String> {
        self.livekit_project_id.clone()
    }

    /// Returns the analytics API base URL without a trailing slash.
    pub fn livekit_analytics_base_url(&self) -> &str {
        self.livekit_analytics_base_url.trim_end_matches('/')
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }
}
