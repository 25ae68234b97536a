use adf_core::{AdfFile, Decoder, Document, MergePolicy, TypeCatalog, TypeLibrary, XmlRenderer};
use anyhow::{Context, Result};
use std::path::Path;

use crate::config::OutputFormat;

/// Owns the merged type catalog and turns instance containers into text.
pub struct Converter {
    catalog: TypeCatalog,
}

impl Converter {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            catalog: TypeCatalog::with_policy(policy),
        }
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Returns the number of new type definitions.
    pub fn load_library(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let library = TypeLibrary::load(path)
            .with_context(|| format!("failed to load type library {}", path.display()))?;
        let added = self
            .catalog
            .add(library.definitions)
            .with_context(|| format!("failed to merge type library {}", path.display()))?;
        log::info!("{}: {} new type(s)", path.display(), added);
        Ok(added)
    }

    pub fn export(&self, input: impl AsRef<Path>, output: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let file = AdfFile::open(input).with_context(|| format!("failed to read {}", input.display()))?;
        let data = self
            .render(&file, format)
            .with_context(|| format!("failed to convert {}", input.display()))?;
        std::fs::write(output, data).with_context(|| format!("failed to write {}", output.display()))?;
        Ok(())
    }

    pub fn render(&self, file: &AdfFile, format: OutputFormat) -> Result<Vec<u8>> {
        let decoder = Decoder::new(&self.catalog);
        let mut instances = Vec::with_capacity(file.instance_infos.len());
        for info in &file.instance_infos {
            let instance = decoder
                .decode_instance(file, info)
                .with_context(|| format!("failed to decode instance '{}'", info.name))?;
            log::info!("decoded '{}' ({} events)", instance.name, instance.events.len());
            instances.push(instance);
        }

        let data = match format {
            OutputFormat::Xml => XmlRenderer::new(Vec::new()).render(&instances)?,
            OutputFormat::Yaml => {
                let document = Document::from_instances(&instances)?;
                let mut data = Vec::new();
                serde_yaml::to_writer(&mut data, &document)?;
                data
            }
        };
        Ok(data)
    }
}
