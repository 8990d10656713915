//! Stored OAuth credential: load, refresh, persist.
//!
//! The credential lives in a single JSON file (by default `token.json` in
//! the working directory). It is rewritten whenever a new or refreshed
//! token is obtained.

use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::app_config::ClientSecret;
use crate::authenticate;
use crate::error::{ProviderError, ProviderResult};

/// Read-only access to calendars and task lists.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar.readonly",
    "https://www.googleapis.com/auth/tasks.readonly",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Copied from the client secret so refreshes don't need that file
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

/// What has to happen before a stored credential can be used.
#[derive(Debug, PartialEq)]
pub enum CredentialState {
    Valid(StoredCredential),
    NeedsRefresh(StoredCredential),
    NeedsConsent,
}

impl StoredCredential {
    pub fn from_access_token(
        token: &AccessToken,
        secret: &ClientSecret,
        previous_refresh_token: Option<&str>,
    ) -> Self {
        let expires_at = if token.expires_in > 0 {
            Some(Utc::now() + Duration::seconds(token.expires_in))
        } else {
            None
        };

        // Google typically doesn't return a new refresh_token on refresh
        let refresh_token = if token.refresh_token.is_empty() {
            previous_refresh_token.map(str::to_string)
        } else {
            Some(token.refresh_token.clone())
        };

        StoredCredential {
            access_token: token.access_token.clone(),
            refresh_token,
            expires_at,
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
            client_id: secret.client_id.clone(),
            client_secret: secret.client_secret.clone(),
        }
    }

    /// `Ok(None)` when there is no saved credential yet.
    pub fn load(path: &Path) -> ProviderResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let credential = serde_json::from_str(&contents).map_err(|e| {
            ProviderError::Auth(format!(
                "Failed to parse saved credential from {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(credential))
    }

    pub fn save(&self, path: &Path) -> ProviderResult<()> {
        let io_err = |source| ProviderError::Io {
            path: path.display().to_string(),
            source,
        };

        let contents = serde_json::to_string(self).map_err(|e| {
            ProviderError::Auth(format!("Failed to serialize credential: {e}"))
        })?;

        std::fs::write(path, contents).map_err(io_err)?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }

        Ok(())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn has_scopes(&self, required: &[&str]) -> bool {
        required
            .iter()
            .all(|scope| self.scopes.iter().any(|granted| granted == scope))
    }

    fn client_secret(&self) -> Option<ClientSecret> {
        (!self.client_id.is_empty() && !self.client_secret.is_empty()).then(|| ClientSecret {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        })
    }
}

/// Decide between reusing, refreshing, or re-consenting.
pub fn classify(stored: Option<StoredCredential>, now: DateTime<Utc>) -> CredentialState {
    let Some(credential) = stored else {
        return CredentialState::NeedsConsent;
    };

    if credential.access_token.is_empty() || !credential.has_scopes(SCOPES) {
        return CredentialState::NeedsConsent;
    }

    if !credential.is_expired_at(now) {
        return CredentialState::Valid(credential);
    }

    match credential.refresh_token.as_deref() {
        Some(token) if !token.is_empty() => CredentialState::NeedsRefresh(credential),
        _ => CredentialState::NeedsConsent,
    }
}

/// Produce a usable credential, refreshing or asking the user for consent
/// as needed. Any new credential is written back to `token_path`.
pub async fn obtain_credential(
    token_path: &Path,
    client_secret_path: &Path,
) -> ProviderResult<StoredCredential> {
    let stored = match StoredCredential::load(token_path) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("Ignoring saved credential: {}", e);
            None
        }
    };

    let credential = match classify(stored, Utc::now()) {
        CredentialState::Valid(credential) => return Ok(credential),
        CredentialState::NeedsRefresh(credential) => {
            tracing::info!("Access token expired, refreshing");
            let secret = match credential.client_secret() {
                Some(secret) => secret,
                None => ClientSecret::load(client_secret_path)?,
            };
            refresh(&secret, &credential).await?
        }
        CredentialState::NeedsConsent => {
            tracing::info!("No usable saved credential, starting browser consent");
            let secret = ClientSecret::load(client_secret_path)?;
            authenticate::run_consent_flow(&secret).await?
        }
    };

    credential.save(token_path)?;
    tracing::info!(path = %token_path.display(), "Saved credential");

    Ok(credential)
}

async fn refresh(
    secret: &ClientSecret,
    credential: &StoredCredential,
) -> ProviderResult<StoredCredential> {
    let refresh_token = credential.refresh_token.clone().unwrap_or_default();

    let client = Client::new(
        secret.client_id.clone(),
        secret.client_secret.clone(),
        String::new(),
        credential.access_token.clone(),
        refresh_token.clone(),
    );

    let token = client
        .refresh_access_token()
        .await
        .map_err(|e| ProviderError::Auth(format!("Failed to refresh token: {e}")))?;

    Ok(StoredCredential::from_access_token(
        &token,
        secret,
        Some(refresh_token.as_str()),
    ))
}
