//! Output file naming

use std::path::{Path, PathBuf};

/// Locations of the OBJ document and its companion MTL document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub obj: PathBuf,
    pub mtl: PathBuf,
}

impl OutputPaths {
    /// Derive both paths by extension substitution on `output` when given,
    /// else on `source`.
    pub fn derive(source: &Path, output: Option<&Path>) -> Self {
        let base = output.unwrap_or(source);
        Self {
            obj: base.with_extension("obj"),
            mtl: base.with_extension("mtl"),
        }
    }

    /// Bare MTL file name, as referenced by `mtllib`
    pub fn mtl_file_name(&self) -> String {
        self.mtl
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
