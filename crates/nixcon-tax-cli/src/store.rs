use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use nixcon_tax_core::simulation::Simulation;

/// Error types for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Whole-file JSON persistence for simulations. Every operation reads the
/// full collection, mutates it in memory, and writes it back; there is no
/// locking (single-user tool).
pub struct SimulationStore {
    path: PathBuf,
}

impl SimulationStore {
    /// Store backed by an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store backed by the default data file.
    pub fn open_default() -> Self {
        Self::with_path(Self::default_path())
    }

    /// The default data file location (~/.nixcon/simulations.json).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nixcon")
            .join("simulations.json")
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored simulation. A missing backing file is an empty
    /// collection, not an error.
    pub fn list(&self) -> Result<Vec<Simulation>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            StoreError::Io(format!("Failed to read '{}': {}", self.path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            StoreError::Parse(format!("Failed to parse '{}': {}", self.path.display(), e))
        })
    }

    /// Persist a simulation. Assigns a timestamp id on first save; a
    /// simulation that already carries an id replaces the stored record
    /// with the same id.
    pub fn save(&self, mut simulation: Simulation) -> Result<Simulation, StoreError> {
        let mut simulations = self.list()?;

        let id = simulation
            .id
            .clone()
            .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());
        simulation.id = Some(id.clone());

        match simulations
            .iter_mut()
            .find(|s| s.id.as_deref() == Some(id.as_str()))
        {
            Some(existing) => *existing = simulation.clone(),
            None => simulations.push(simulation.clone()),
        }

        self.write_back(&simulations)?;
        Ok(simulation)
    }

    /// Remove the simulation with the given id. Returns whether a record
    /// was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut simulations = self.list()?;
        let before = simulations.len();
        simulations.retain(|s| s.id.as_deref() != Some(id));

        if simulations.len() == before {
            return Ok(false);
        }

        self.write_back(&simulations)?;
        Ok(true)
    }

    fn write_back(&self, simulations: &[Simulation]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Io(format!("Failed to create '{}': {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(simulations).map_err(|e| {
            StoreError::Serialize(format!("Failed to serialize simulations: {}", e))
        })?;

        fs::write(&self.path, json).map_err(|e| {
            StoreError::Io(format!("Failed to write '{}': {}", self.path.display(), e))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
