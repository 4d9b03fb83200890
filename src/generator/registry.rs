use crate::config::Config;
use crate::constants::GENERATOR_FILE;
use crate::error::WorkflowError;
use crate::generator::{
    AiContentGenerator, ContentGenerator, InstagramDmGenerator, NewsletterGenerator,
    YoutubeRepurposer,
};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Registry for looking up generators by kind. When opened over a file it
/// also carries each generator's rotation position between runs.
pub struct GeneratorRegistry {
    generators: Vec<Arc<dyn ContentGenerator>>,
    /// Stored position per kind, applied as generators are registered
    positions: BTreeMap<String, usize>,
    path: Option<PathBuf>,
}

impl GeneratorRegistry {
    /// Create a registry with the built-in generators
    pub fn new(delay: Duration) -> Self {
        Self::with_positions(delay, BTreeMap::new(), None)
    }

    /// Create a registry whose rotation positions are mirrored to `path`.
    /// An unreadable file is ignored and rotation starts over.
    pub fn open<P: AsRef<Path>>(delay: Duration, path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut positions = BTreeMap::new();

        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read generator state: {}", path.display()))?;
            match serde_json::from_str::<BTreeMap<String, usize>>(&content) {
                Ok(stored) => positions = stored,
                Err(e) => log::warn!("Ignoring unreadable generator state {}: {}", path.display(), e),
            }
        }

        Ok(Self::with_positions(delay, positions, Some(path)))
    }

    /// Registry for the configured data directory, or an in-memory one when
    /// persistence is off
    pub fn from_config(config: &Config) -> Result<Self> {
        if !config.storage.persist {
            return Ok(Self::new(config.generator_delay()));
        }
        Self::open(config.generator_delay(), config.data_dir()?.join(GENERATOR_FILE))
    }

    fn with_positions(delay: Duration, positions: BTreeMap<String, usize>, path: Option<PathBuf>) -> Self {
        let mut registry = Self {
            generators: Vec::new(),
            positions,
            path,
        };

        registry.register(Arc::new(NewsletterGenerator::new(delay)));
        registry.register(Arc::new(YoutubeRepurposer::new(delay)));
        registry.register(Arc::new(InstagramDmGenerator::new(delay)));
        registry.register(Arc::new(AiContentGenerator::new(delay)));

        registry
    }

    /// Register a generator, replacing any with the same kind
    pub fn register(&mut self, generator: Arc<dyn ContentGenerator>) {
        if let Some(position) = self.positions.get(generator.kind()) {
            generator.resume_at(*position);
        }
        self.generators.retain(|g| g.kind() != generator.kind());
        self.generators.push(generator);
    }

    pub fn get(&self, kind: &str) -> Result<Arc<dyn ContentGenerator>, WorkflowError> {
        self.generators
            .iter()
            .find(|g| g.kind() == kind)
            .cloned()
            .ok_or_else(|| WorkflowError::UnknownGenerator(kind.to_string()))
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.kind()).collect()
    }

    /// Write every generator's rotation position (no-op when in memory)
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let positions: BTreeMap<&str, usize> = self
            .generators
            .iter()
            .map(|g| (g.kind(), g.position()))
            .collect();
        let json = serde_json::to_string_pretty(&positions)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write generator state: {}", path.display()))?;
        Ok(())
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
