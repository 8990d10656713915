//! OAuth client secret, provisioned out of band.
//!
//! Accepts the JSON file downloaded from the Google Cloud console
//! (`{"installed": {...}}` or `{"web": {...}}`) as well as a flat
//! `{"client_id": ..., "client_secret": ...}` object.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ProviderError, ProviderResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClientSecretFile {
    Installed { installed: ClientSecret },
    Web { web: ClientSecret },
    Flat(ClientSecret),
}

impl ClientSecret {
    pub fn load(path: &Path) -> ProviderResult<Self> {
        if !path.exists() {
            return Err(ProviderError::Auth(format!(
                "Google client secret not found.\n\n\
                Download an OAuth client (type \"Desktop app\") from\n\
                https://console.cloud.google.com/apis/credentials\n\
                and save it as {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&contents).map_err(|e| {
            ProviderError::Auth(format!(
                "Failed to parse client secret from {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let file: ClientSecretFile = serde_json::from_str(contents)?;

        Ok(match file {
            ClientSecretFile::Installed { installed } => installed,
            ClientSecretFile::Web { web } => web,
            ClientSecretFile::Flat(secret) => secret,
        })
    }
}
