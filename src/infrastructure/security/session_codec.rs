//! Signed session cookie values.
//!
//! A token is `base64url(timestamp|user_id)` followed by `.` and
//! `base64url(HMAC-SHA256(cookie_name|timestamp|user_id))`. Binding the cookie
//! name into the MAC means a value minted for one cookie is rejected under
//! another.
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{security::SessionCodec, time::Clock},
    },
    domain::user::UserId,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Duration;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

pub const MIN_KEY_LENGTH: usize = 32;
const MAX_CLOCK_SKEW_SECS: i64 = 60;

pub struct HmacSessionCodec {
    name: String,
    key: Vec<u8>,
    max_age: Duration,
    clock: Arc<dyn Clock>,
}

impl HmacSessionCodec {
    pub fn new(
        name: impl Into<String>,
        key: &[u8],
        max_age: Duration,
        clock: Arc<dyn Clock>,
    ) -> ApplicationResult<Self> {
        if key.len() < MIN_KEY_LENGTH {
            return Err(ApplicationError::infrastructure(format!(
                "session key must be at least {MIN_KEY_LENGTH} bytes"
            )));
        }

        Ok(Self {
            name: name.into(),
            key: key.to_vec(),
            max_age,
            clock,
        })
    }

    fn mac(&self, payload: &str) -> ApplicationResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        mac.update(self.name.as_bytes());
        mac.update(b"|");
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}

impl SessionCodec for HmacSessionCodec {
    fn encode(&self, user_id: UserId) -> ApplicationResult<String> {
        let payload = format!("{}|{}", self.clock.now().timestamp(), user_id);
        let signature = self.mac(&payload)?.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    fn decode(&self, token: &str) -> ApplicationResult<UserId> {
        let invalid = || ApplicationError::unauthorized("invalid session cookie");

        let (encoded_payload, encoded_signature) = token.split_once('.').ok_or_else(invalid)?;
        let payload = URL_SAFE_NO_PAD
            .decode(encoded_payload)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(invalid)?;
        let signature = URL_SAFE_NO_PAD
            .decode(encoded_signature)
            .map_err(|_| invalid())?;

        self.mac(&payload)?
            .verify_slice(&signature)
            .map_err(|_| invalid())?;

        let (timestamp, user_id) = payload.split_once('|').ok_or_else(invalid)?;
        let issued_at: i64 = timestamp.parse().map_err(|_| invalid())?;

        let now = self.clock.now().timestamp();
        if issued_at > now + MAX_CLOCK_SKEW_SECS {
            return Err(ApplicationError::unauthorized("session cookie from the future"));
        }
        if now - issued_at > self.max_age.num_seconds() {
            return Err(ApplicationError::unauthorized("session cookie expired"));
        }

        user_id.parse::<UserId>().map_err(|_| invalid())
    }
}
