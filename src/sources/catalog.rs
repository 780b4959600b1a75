use std::io;
use std::path::PathBuf;

use super::{DefinitionSource, PaletteSource, SourceError, SourceOutcome};
use crate::assets::AssetLoader;
use crate::models::AlphaRule;

/// A named definition resolved through the [`AssetLoader`] when loaded.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    loader: AssetLoader,
    name: String,
}

impl CatalogSource {
    pub fn new(loader: AssetLoader, name: &str) -> Self {
        Self {
            loader,
            name: lut_compress::normalize_name(name),
        }
    }
}

impl PaletteSource for CatalogSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self, alpha: AlphaRule) -> Result<SourceOutcome, SourceError> {
        let text = self.loader.read_colormap(&self.name).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::UnknownColormap(self.name.clone()),
            _ => SourceError::Io {
                path: PathBuf::from(format!("{}.yaml", self.name)),
                source: e,
            },
        })?;
        DefinitionSource::new(&self.name, text).load(alpha)
    }
}
