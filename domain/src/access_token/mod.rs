//! Short-lived bearer tokens for the LiveKit Cloud analytics API.
//!
//! Every analytics request is authenticated with a freshly minted token. Tokens
//! are never cached or reused: a new one is signed for each call and dropped
//! when the call completes.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::access_token::{AccessTokenMinter, LiveKitTokenMinter};
//! use secrecy::SecretString;
//!
//! let minter = LiveKitTokenMinter::new("APIkey".to_string(), SecretString::new("secret".into()), 600);
//! let token = minter.mint()?;
//! ```

use crate::error::Error;
use chrono::Utc;
use claims::{AnalyticsClaims, VideoGrant};
use jsonwebtoken::{encode, EncodingKey, Header};
use log::*;
use secrecy::{ExposeSecret, SecretString};
use service::config::Config;

pub(crate) mod claims;

/// Issues the bearer credential for one upstream call.
pub trait AccessTokenMinter: Send + Sync {
    fn mint(&self) -> Result<SecretString, Error>;
}

/// Signs HS256 LiveKit access tokens with a project API key and secret.
pub struct LiveKitTokenMinter {
    api_key: String,
    api_secret: SecretString,
    ttl_secs: u64,
}

impl LiveKitTokenMinter {
    pub fn new(api_key: String, api_secret: SecretString, ttl_secs: u64) -> Self {
        Self {
            api_key,
            api_secret,
            ttl_secs,
        }
    }

    /// Builds a minter from the API key and secret in `config`.
    ///
    /// Fails with a configuration error when either value is missing or blank.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let api_key = required(config.livekit_api_key(), "LIVEKIT_API_KEY")?;
        let api_secret = required(config.livekit_api_secret(), "LIVEKIT_API_SECRET")?;

        Ok(Self::new(
            api_key,
            SecretString::new(api_secret),
            config.livekit_token_ttl_secs,
        ))
    }
}

impl AccessTokenMinter for LiveKitTokenMinter {
    fn mint(&self) -> Result<SecretString, Error> {
        let now = Utc::now().timestamp().max(0) as usize;

        let claims = AnalyticsClaims {
            exp: now.saturating_add(self.ttl_secs as usize),
            nbf: now,
            iss: self.api_key.clone(),
            sub: self.api_key.clone(),
            video: VideoGrant { room_list: true },
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.api_secret.expose_secret().as_bytes()),
        )?;

        trace!("Minted analytics access token valid for {}s", self.ttl_secs);

        Ok(SecretString::new(token))
    }
}

pub(crate) fn required(value: Option<String>, name: &str) -> Result<String, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            warn!("Failed to get {name} from config");
            Err(Error::config(format!("{name} is not configured")))
        }
    }
}
