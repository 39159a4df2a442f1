use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Claims we read back out of a verified access token.
///
/// Validation itself (signature, `exp`, `aud`) happens inside
/// [`verify_access_token`]; this struct only carries what the app looks at.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(default)]
    pub sub: String,
    pub exp: i64,
}

/// Verify the session's access token against the configured algorithm,
/// key material and audience.
///
/// # Errors
///
/// Returns an error if the configured algorithm is unknown, the key
/// material does not fit it, or the token fails signature/claim checks.
pub fn verify_access_token(token: &str, config: &Config) -> anyhow::Result<AccessClaims> {
    let algorithm = Algorithm::from_str(&config.jwt_algorithm)
        .map_err(|_| anyhow::anyhow!("Unknown JWT algorithm: {}", config.jwt_algorithm))?;

    let key = decoding_key(algorithm, &config.jwt_secret)?;

    let mut validation = Validation::new(algorithm);
    if config.oauth_audience.is_empty() {
        validation.validate_aud = false;
    } else {
        validation.set_audience(&[&config.oauth_audience]);
    }

    let token_data = decode::<AccessClaims>(token, &key, &validation)
        .map_err(|e| anyhow::anyhow!("Invalid access token: {e}"))?;

    Ok(token_data.claims)
}

/// Build the decoding key matching the algorithm family. HMAC algorithms
/// treat the secret as raw bytes, the rest expect PEM.
fn decoding_key(algorithm: Algorithm, secret: &str) -> anyhow::Result<DecodingKey> {
    let key = match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            DecodingKey::from_secret(secret.as_bytes())
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid RSA key material: {e}"))?,
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid EC key material: {e}"))?,
        Algorithm::EdDSA => DecodingKey::from_ed_pem(secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid Ed25519 key material: {e}"))?,
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn test_config() -> Config {
        Config {
            database_url: String::new(),
            server_host: std::net::IpAddr::from([127, 0, 0, 1]),
            server_port: 0,
            environment: Environment::Development,
            log_level: "warn".to_string(),
            oauth_client_id: String::new(),
            oauth_client_secret: String::new(),
            oauth_auth_url: String::new(),
            oauth_token_url: String::new(),
            oauth_redirect_uri: String::new(),
            oauth_audience: "catalog-api".to_string(),
            jwt_algorithm: "HS256".to_string(),
            jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
        }
    }

    fn sign(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap_or_default()
    }

    #[test]
    fn accepts_a_valid_token() {
        let config = test_config();
        let token = sign(
            &json!({
                "sub": "user-1",
                "aud": "catalog-api",
                "exp": Utc::now().timestamp() + 600,
            }),
            &config.jwt_secret,
        );

        let claims = verify_access_token(&token, &config);
        assert!(claims.is_ok());
        assert_eq!(claims.map(|c| c.sub).unwrap_or_default(), "user-1");
    }

    #[test]
    fn rejects_an_expired_token() {
        let config = test_config();
        let token = sign(
            &json!({
                "sub": "user-1",
                "aud": "catalog-api",
                "exp": Utc::now().timestamp() - 600,
            }),
            &config.jwt_secret,
        );

        assert!(verify_access_token(&token, &config).is_err());
    }

    #[test]
    fn rejects_a_wrong_audience() {
        let config = test_config();
        let token = sign(
            &json!({
                "sub": "user-1",
                "aud": "someone-else",
                "exp": Utc::now().timestamp() + 600,
            }),
            &config.jwt_secret,
        );

        assert!(verify_access_token(&token, &config).is_err());
    }

    #[test]
    fn rejects_a_bad_signature() {
        let config = test_config();
        let token = sign(
            &json!({
                "sub": "user-1",
                "aud": "catalog-api",
                "exp": Utc::now().timestamp() + 600,
            }),
            "a-completely-different-secret",
        );

        assert!(verify_access_token(&token, &config).is_err());
    }
}
