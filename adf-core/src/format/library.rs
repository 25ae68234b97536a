use std::path::{Path, PathBuf};

use super::container::AdfFile;
use super::types::TypeDefinition;
use crate::error::{AdfError, Result};

/// A container used purely as a schema source.
#[derive(Debug, Clone)]
pub struct TypeLibrary {
    pub path: Option<PathBuf>,
    pub definitions: Vec<TypeDefinition>,
}

impl TypeLibrary {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = AdfFile::open(path.as_ref())?;
        let mut library = Self::from_file(file)?;
        library.path = Some(path.as_ref().to_path_buf());
        log::debug!(
            "loaded {} type definition(s) from {:?}",
            library.definitions.len(),
            path.as_ref()
        );
        Ok(library)
    }

    /// Libraries must not expose instances.
    pub fn from_file(file: AdfFile) -> Result<Self> {
        if !file.instance_infos.is_empty() {
            return Err(AdfError::UnexpectedInstances(file.instance_infos.len()));
        }
        Ok(Self {
            path: None,
            definitions: file.type_definitions,
        })
    }
}
