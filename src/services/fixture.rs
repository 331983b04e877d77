use crate::models::Atm;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when loading the ATM fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only set of ATM records
///
/// Cloning is cheap; all clones share the same records.
#[derive(Debug, Clone)]
pub struct AtmStore {
    atms: Arc<[Atm]>,
}

impl AtmStore {
    /// Load a flat JSON array of ATM records
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let store = Self::from_json(&json)?;
        tracing::info!("Loaded {} ATMs from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let atms: Vec<Atm> = serde_json::from_str(json)?;
        Ok(Self::from_records(atms))
    }

    /// Build a store from records. Stored distances are dropped.
    pub fn from_records(atms: Vec<Atm>) -> Self {
        let atms: Vec<Atm> = atms
            .into_iter()
            .map(|atm| Atm { distance: None, ..atm })
            .collect();

        Self { atms: atms.into() }
    }

    pub fn all(&self) -> &[Atm] {
        &self.atms
    }

    pub fn get(&self, id: &str) -> Option<&Atm> {
        self.atms.iter().find(|atm| atm.id == id)
    }

    pub fn len(&self) -> usize {
        self.atms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atms.is_empty()
    }
}
