//! Conversion session: parsed models and the names already handed out

use crate::mdl::MdlScanner;
use crate::obj::{ObjWriteOptions, ObjWriter};
use crate::paths::OutputPaths;
use crate::ModelWriter;
use mdltoobj_core::{Error, Model, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// State of one MDL to OBJ conversion
#[derive(Debug, Default)]
pub struct ConversionSession {
    models: Vec<Model>,
    names: HashSet<String>,
    source_path: Option<PathBuf>,
}

impl ConversionSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed models in source order
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Consume the session, returning its models
    pub fn into_models(self) -> Vec<Model> {
        self.models
    }

    /// Path of the MDL file this session was read from
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Whether a model name has already been assigned
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Reserve a unique model name for a component and surface.
    ///
    /// The surface is appended when it is non-empty and differs from the
    /// component. Collisions fall back to `component_0`, `component_1`, …
    pub fn unique_name(&mut self, component: &str, surface: &str) -> String {
        let mut name = if !surface.is_empty() && surface != component {
            format!("{component}_{surface}")
        } else {
            component.to_string()
        };

        let mut suffix = 0u32;
        while self.names.contains(&name) {
            name = format!("{component}_{suffix}");
            suffix += 1;
        }

        self.names.insert(name.clone());
        name
    }

    /// Append a completed model, discarding it when it has no vertex or no face.
    ///
    /// UVs not paired one-to-one with vertices are dropped, as are faces
    /// whose indices fall outside the model's vertex array.
    pub fn push_model(&mut self, mut model: Model) -> bool {
        if !model.has_paired_uvs() {
            warn!(
                mesh = %model.name,
                vertices = model.vertex_count(),
                uvs = model.uv_count(),
                "Dropping texture coordinates not paired with vertices"
            );
            model.uvs.clear();
        }

        let dropped = model.retain_valid_faces();
        if dropped > 0 {
            debug!(mesh = %model.name, dropped, "Dropped faces with out-of-range indices");
        }

        if model.is_empty() {
            warn!(mesh = %model.name, "Discarding mesh without vertices or faces");
            return false;
        }
        self.models.push(model);
        true
    }

    /// Parse MDL source text into this session.
    ///
    /// Returns whether the session holds at least one usable model.
    pub fn parse_source(&mut self, source: &str) -> bool {
        let mut scanner = MdlScanner::new();
        for line in source.split('\n') {
            scanner.scan_line(line, self);
        }
        !self.models.is_empty()
    }

    /// Read and parse an MDL file
    pub fn open_mdl_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        self.source_path = Some(path.to_path_buf());
        let source = std::fs::read_to_string(path)?;
        if self.parse_source(&source) {
            info!(path = %path.display(), models = self.models.len(), "Parsed MDL file");
            Ok(())
        } else {
            Err(Error::NoGeometry {
                path: path.display().to_string(),
            })
        }
    }

    /// Write the OBJ and MTL documents.
    ///
    /// Output names derive from `output` when given, else from the source
    /// path.
    pub fn save_obj_file(
        &self,
        output: Option<&Path>,
        options: &ObjWriteOptions,
    ) -> Result<OutputPaths> {
        let source = self.source_path.as_deref().unwrap_or_else(|| Path::new("out.mdl"));
        let paths = OutputPaths::derive(source, output);
        ObjWriter::write_models(&self.models, &paths, options)?;
        Ok(paths)
    }
}
