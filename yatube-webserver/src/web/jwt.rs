use std::{collections::HashSet, time::Duration};

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The username
    sub: String,
    /// Expiry time as Unix timestamp
    exp: u64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    // A new secret on every start invalidates all
    // previously issued tokens.
    fn random() -> Self {
        let secret = BASE64.encode(rand::random::<[u8; 32]>());
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

pub struct JwtState {
    keys: Keys,
    validity: Duration,
    blacklist: Mutex<HashSet<String>>,
}

impl JwtState {
    pub fn new(validity: Duration) -> Self {
        Self {
            keys: Keys::random(),
            validity,
            blacklist: Mutex::new(HashSet::new()),
        }
    }

    pub fn generate_token(&self, username: &str) -> Result<String> {
        let now = u64::try_from(OffsetDateTime::now_utc().unix_timestamp())?;
        let claims = Claims {
            sub: username.to_owned(),
            exp: now + self.validity.as_secs(),
        };
        Ok(encode(&Header::default(), &claims, &self.keys.encoding)?)
    }

    pub fn validate_token_and_get_username(&self, token: &str) -> Result<String> {
        if self.is_on_blacklist(token) {
            return Err(anyhow!("Token is no longer valid"));
        }
        Ok(self.decode(token)?.sub)
    }

    pub fn blacklist_token(&self, token: String) {
        self.remove_expired_tokens();
        self.lock().insert(token);
    }

    fn decode(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())?;
        Ok(data.claims)
    }

    fn is_on_blacklist(&self, token: &str) -> bool {
        self.lock().contains(token)
    }

    // Tokens that fail to decode are rejected anyway
    fn remove_expired_tokens(&self) {
        let mut blacklist = self.lock();
        blacklist.retain(|token| self.decode(token).is_ok());
    }

    fn lock(&self) -> MutexGuard<HashSet<String>> {
        self.blacklist.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_state() -> JwtState {
        JwtState::new(Duration::from_secs(60 * 60))
    }

    #[test]
    fn issued_tokens_carry_the_username() {
        let jwt_state = jwt_state();
        let token = jwt_state.generate_token("leo").unwrap();
        assert_eq!("leo", jwt_state.validate_token_and_get_username(&token).unwrap());
    }

    #[test]
    fn blacklisted_tokens_are_rejected() {
        let jwt_state = jwt_state();
        let token = jwt_state.generate_token("leo").unwrap();
        jwt_state.blacklist_token(token.clone());
        assert!(jwt_state.is_on_blacklist(&token));
        assert!(jwt_state.validate_token_and_get_username(&token).is_err());
    }

    #[test]
    fn tokens_of_other_instances_are_rejected() {
        let token = jwt_state().generate_token("leo").unwrap();
        assert!(jwt_state().validate_token_and_get_username(&token).is_err());
    }

    #[test]
    fn undecodable_tokens_are_dropped_from_the_blacklist() {
        let jwt_state = jwt_state();
        let token = jwt_state.generate_token("leo").unwrap();
        jwt_state.blacklist_token("garbage".to_string());
        jwt_state.blacklist_token(token.clone());
        assert!(jwt_state.is_on_blacklist(&token));
        assert!(!jwt_state.is_on_blacklist("garbage"));
    }
}
