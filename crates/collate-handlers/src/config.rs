//! Handler configuration.
//!
//! ```toml
//! sequence-handlers = ["keyed", "typed"]
//! merge-chain = ["keyed", "typed"]
//! ```
//!
//! `sequence-handlers` is the registration order. `merge-chain` lists the
//! merge decorators outermost first; the default merge handler always
//! terminates the chain and is not listed.

use crate::registry::{HandlerRegistry, merge_chain, sequence_handler};
use collate_kernel::CollectionFlavor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("`{list}` lists `{flavor}` more than once")]
    Duplicate {
        list: &'static str,
        flavor: CollectionFlavor,
    },

    #[error("failed to render config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HandlersConfig {
    #[serde(default = "all_flavors")]
    pub sequence_handlers: Vec<CollectionFlavor>,
    #[serde(default = "all_flavors")]
    pub merge_chain: Vec<CollectionFlavor>,
}

fn all_flavors() -> Vec<CollectionFlavor> {
    CollectionFlavor::ALL.to_vec()
}

impl Default for HandlersConfig {
    fn default() -> Self {
        Self {
            sequence_handlers: all_flavors(),
            merge_chain: all_flavors(),
        }
    }
}

impl HandlersConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, "<inline>")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unique("sequence-handlers", &self.sequence_handlers)?;
        check_unique("merge-chain", &self.merge_chain)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn build_registry(&self) -> Result<HandlerRegistry, ConfigError> {
        self.validate()?;
        let mut builder = HandlerRegistry::builder();
        for flavor in &self.sequence_handlers {
            builder = builder.register_sequence_handler(sequence_handler(*flavor));
        }
        let registry = builder.merge_handler(merge_chain(&self.merge_chain)).build();
        tracing::debug!(?registry, merge_chain = ?self.merge_chain, "handler registry built");
        Ok(registry)
    }
}

fn check_unique(list: &'static str, flavors: &[CollectionFlavor]) -> Result<(), ConfigError> {
    for (position, flavor) in flavors.iter().enumerate() {
        if flavors[..position].contains(flavor) {
            return Err(ConfigError::Duplicate {
                list,
                flavor: *flavor,
            });
        }
    }
    Ok(())
}
