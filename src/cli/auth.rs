use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    config, error, info, management::TokenManager, success, types::Credentials, warning,
};

/// Refreshes the cached token, or verifies it if it is still valid and no
/// refresh is forced.
pub async fn refresh(force: bool) {
    let client = super::connect_client(force).await;
    let credentials = client.tokens().credentials();
    success!(
        "Token valid (created {}, lifetime {}s)",
        credentials.token_creation,
        credentials.token_duration
    );
}

/// Encodes `client_id:client_secret` and writes a fresh credentials record
/// with an empty token. The first query (or `auth refresh`) will perform the
/// initial token exchange.
pub async fn set_key(client_id: String, client_secret: String) {
    let credentials = Credentials {
        client_key: STANDARD.encode(format!("{}:{}", client_id, client_secret)),
        token: String::new(),
        token_creation: String::new(),
        token_duration: 0,
    };

    let path = config::credentials_path();
    if let Err(e) = TokenManager::persist(&path, &credentials).await {
        error!("Failed to write credentials store: {}", e);
    }

    success!("Credentials written to {}", path.display());
    info!("Run `spotkit auth refresh` to obtain a token.");
}

/// Reports whether the cached token is currently usable, without touching
/// the network.
pub async fn status() {
    let manager =
        match TokenManager::load(config::credentials_path(), config::spotify_token_url()).await {
            Ok(manager) => manager,
            Err(e) => {
                error!(
                    "No credentials store found. Run `spotkit auth set-key` first.\n Error: {}",
                    e
                );
            }
        };

    let credentials = manager.credentials();
    if manager.is_expired() {
        warning!("Cached token is empty or stale; the next query will refresh it.");
    } else {
        success!(
            "Cached token is valid (created {}, lifetime {}s)",
            credentials.token_creation,
            credentials.token_duration
        );
    }
}
