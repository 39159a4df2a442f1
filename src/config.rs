use std::net::{IpAddr, SocketAddr};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    /// OAuth2 client credentials for the configured identity provider.
    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    /// Provider endpoints: authorization URL and token URL.
    pub oauth_auth_url: String,
    pub oauth_token_url: String,
    pub oauth_redirect_uri: String,
    /// Expected `aud` claim of access tokens issued by the provider.
    pub oauth_audience: String,
    /// JWT signature algorithm used to verify access tokens (e.g. `HS256`).
    pub jwt_algorithm: String,
    pub jwt_secret: String,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`
    /// Optional with defaults: `SERVER_HOST`, `SERVER_PORT`, `ENVIRONMENT`,
    /// `LOG_LEVEL`, `CLIENT_ID`, `CLIENT_SECRET`, `AUDIENCE`,
    /// `JWT_ALGORITHM`, `JWT_SECRET`, `OAUTH_AUTH_URL`, `OAUTH_TOKEN_URL`,
    /// `OAUTH_REDIRECT_URI`
    ///
    /// On Railway, `PORT` overrides `SERVER_PORT` and host defaults to `0.0.0.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not set, or if `SERVER_HOST` /
    /// `SERVER_PORT` contain invalid values.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT must be a valid u16"))?;

        // In production, default to 0.0.0.0 so the platform can route traffic
        let default_host = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| default_host.to_string())
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST must be a valid IP address"))?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let oauth_client_id = std::env::var("CLIENT_ID").unwrap_or_default();
        let oauth_client_secret = std::env::var("CLIENT_SECRET").unwrap_or_default();
        let oauth_auth_url = std::env::var("OAUTH_AUTH_URL").unwrap_or_default();
        let oauth_token_url = std::env::var("OAUTH_TOKEN_URL").unwrap_or_default();
        let oauth_redirect_uri = std::env::var("OAUTH_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/oauth/callback".to_string());
        let oauth_audience = std::env::var("AUDIENCE").unwrap_or_default();
        let jwt_algorithm = std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level,
            oauth_client_id,
            oauth_client_secret,
            oauth_auth_url,
            oauth_token_url,
            oauth_redirect_uri,
            oauth_audience,
            jwt_algorithm,
            jwt_secret,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}
