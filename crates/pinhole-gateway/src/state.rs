use pinhole_generator::RandomGenerator;
use pinhole_shortener::ShortenerService;
use pinhole_storage::AnyRepository;
use std::sync::Arc;

/// The concrete service the gateway runs: one backend chosen at startup,
/// random alias generation.
pub type GatewayShortener = ShortenerService<AnyRepository, RandomGenerator>;

/// Shared state for the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<GatewayShortener>,
    auth_token: Arc<str>,
}

impl AppState {
    pub fn new(shortener: GatewayShortener, auth_token: impl Into<String>) -> Self {
        Self {
            shortener: Arc::new(shortener),
            auth_token: auth_token.into().into(),
        }
    }

    pub fn shortener(&self) -> &GatewayShortener {
        &self.shortener
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }
}
