use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::models::accounts::entities::{AccountRole, ProfileRef};
use crate::models::accounts::requests::CreateAccountRequest;
use crate::recognition::{RecognitionClient, create_recognition_client};
use crate::storage::Storage;
use crate::utils::password::hash_password;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub recognition: Arc<dyn RecognitionClient>,
}

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Create the default admin account when none exists yet. The password comes
/// from ADMIN_PASSWORD or is generated and printed once; either way the
/// account starts with must_change_password set.
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.get_account_by_username_or_email("admin").await {
        Ok(Some(_)) => {
            debug!("Admin account already exists, skipping seed");
            return;
        }
        Ok(None) => {
            info!("No admin account found, creating default admin...");
        }
        Err(e) => {
            warn!("Failed to look up admin account: {}, skipping seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping seed", e);
            return;
        }
    };

    let admin_request = CreateAccountRequest {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password_hash,
        role: AccountRole::Admin,
        profile: ProfileRef::None,
        must_change_password: true,
    };

    match storage.create_account(admin_request).await {
        Ok(account) => {
            info!(
                "Default admin account created (ID: {}, username: {})",
                account.id, account.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// Prepare everything the HTTP server needs before binding.
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let recognition = create_recognition_client(config);
    warn!("Recognition client initialized");

    StartupContext {
        storage,
        recognition,
    }
}
