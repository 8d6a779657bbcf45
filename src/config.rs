use serde::Deserialize;

pub const DEFAULT_AUTH_URL: &str = "https://auth.tracker.delivery/oauth2/token";
pub const DEFAULT_API_URL: &str = "https://apis.tracker.delivery/graphql";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// OAuth2 client-credentials token endpoint.
    pub auth_url: String,
    /// GraphQL tracking endpoint.
    pub api_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Extra allowed CORS origin for a deployed frontend.
    /// Localhost origins are always allowed.
    pub frontend_origin: Option<String>,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let client_id = std::env::var("DELIVERY_TRACKER_CLIENT_ID").ok();
    let client_secret = std::env::var("DELIVERY_TRACKER_CLIENT_SECRET").ok();

    if client_id.is_none() || client_secret.is_none() {
        eprintln!(
            "⚠️  DELIVERY_TRACKER_CLIENT_ID / DELIVERY_TRACKER_CLIENT_SECRET are not set — \
             tracking lookups will fail until both are configured."
        );
    }

    Ok(Config {
        port: std::env::var("TRACKGATE_PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .unwrap_or(3001),
        auth_url: std::env::var("TRACKGATE_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.into()),
        api_url: std::env::var("TRACKGATE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
        client_id,
        client_secret,
        frontend_origin: std::env::var("FRONTEND_ORIGIN").ok(),
    })
}
