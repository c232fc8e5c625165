//! STK/MDL to Wavefront OBJ/MTL conversion
//!
//! The conversion runs in two phases: a line scanner extracts named models
//! from MDL text into a [`ConversionSession`], then the emitter writes the
//! models out as one OBJ document and its companion MTL document.

pub mod tokens;
pub mod faces;
pub mod mdl;
pub mod session;
pub mod obj;
pub mod paths;

#[cfg(test)]
mod tests;

pub use faces::{PolygonRun, RunMode};
pub use mdl::{MdlReader, MdlScanner, ScanState};
pub use obj::{emit_documents, ObjDocuments, ObjWriteOptions, ObjWriter};
pub use paths::OutputPaths;
pub use session::ConversionSession;

use mdltoobj_core::{Model, Result};
use std::path::Path;

/// Trait for reading models from files
pub trait ModelReader {
    fn read_models<P: AsRef<Path>>(path: P) -> Result<Vec<Model>>;
}

/// Trait for writing models to files
pub trait ModelWriter {
    fn write_models(models: &[Model], paths: &OutputPaths, options: &ObjWriteOptions) -> Result<()>;
}

/// Convert an MDL file into an OBJ/MTL pair.
///
/// Output names derive from `output` when given, else from `input`.
pub fn convert_file<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
    options: &ObjWriteOptions,
) -> Result<OutputPaths> {
    let input = input.as_ref();
    let models = MdlReader::read_models(input)?;
    let paths = OutputPaths::derive(input, output);
    ObjWriter::write_models(&models, &paths, options)?;
    Ok(paths)
}
