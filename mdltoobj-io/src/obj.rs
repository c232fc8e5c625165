//! Wavefront OBJ/MTL emission
//!
//! All models share one OBJ index space. Each model's vertices and texture
//! coordinates occupy their own sub-range, so local face indices are shifted
//! by the number of items written for the models before it.

use crate::paths::OutputPaths;
use crate::ModelWriter;
use mdltoobj_core::{Color, Material, Model, Result};
use std::fmt::{self, Write};
use tracing::info;

const GENERATOR_LINE: &str = "# MdlToObj : https://github.com/aiekick/MdlToObj";

/// Configuration for OBJ/MTL output
#[derive(Debug, Clone, PartialEq)]
pub struct ObjWriteOptions {
    /// Digits after the decimal point for every float
    pub precision: usize,
    /// Write `map_Ka` lines with a literal `\n` token before the line break
    pub literal_texture_newline: bool,
    /// Comment lines opening the OBJ document
    pub obj_header: Vec<String>,
    /// Comment lines opening the MTL document
    pub mtl_header: Vec<String>,
}

impl Default for ObjWriteOptions {
    fn default() -> Self {
        Self {
            precision: 6,
            literal_texture_newline: true,
            obj_header: vec![
                "# OBJ File generated with MdlToObj from a STK/MDL file".to_string(),
                GENERATOR_LINE.to_string(),
            ],
            mtl_header: vec![
                "# MTL File generated with MdlToObj from a STK/MDL file".to_string(),
                GENERATOR_LINE.to_string(),
            ],
        }
    }
}

impl ObjWriteOptions {
    /// Set the number of fractional digits
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Write plain `map_Ka <path>` lines
    pub fn with_clean_texture_lines(mut self) -> Self {
        self.literal_texture_newline = false;
        self
    }

    /// Replace the OBJ header comment lines
    pub fn with_obj_header(mut self, lines: Vec<String>) -> Self {
        self.obj_header = lines;
        self
    }

    /// Replace the MTL header comment lines
    pub fn with_mtl_header(mut self, lines: Vec<String>) -> Self {
        self.mtl_header = lines;
        self
    }
}

/// The two emitted text documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjDocuments {
    pub obj: String,
    pub mtl: String,
}

/// Resolve a local face index to its 1-based OBJ position.
///
/// Non-negative indices count from the model's first item, negative ones
/// from past its last item.
pub fn resolve_index(index: i32, offset: usize, item_count: usize) -> i64 {
    let base = i64::from(index) + 1 + offset as i64;
    if index < 0 {
        base + item_count as i64
    } else {
        base
    }
}

fn write_header(out: &mut String, lines: &[String]) -> fmt::Result {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_color(out: &mut String, key: &str, color: &Color, precision: usize) -> fmt::Result {
    writeln!(
        out,
        "{key} {:.p$} {:.p$} {:.p$}",
        color[0],
        color[1],
        color[2],
        p = precision
    )
}

/// Append one `newmtl` record
pub fn write_material(out: &mut String, material: &Material, options: &ObjWriteOptions) -> fmt::Result {
    let p = options.precision;
    writeln!(out)?;
    writeln!(out, "newmtl {}", material.name)?;
    writeln!(out, "Ns {:.p$}", material.specular_exponent)?;
    write_color(out, "Ka", &material.ambient, p)?;
    write_color(out, "Kd", &material.diffuse, p)?;
    write_color(out, "Ks", &material.specular, p)?;
    write_color(out, "Ke", &material.emissive, p)?;
    writeln!(out, "Ni {:.p$}", material.refraction_index)?;
    writeln!(out, "d {:.p$}", material.opacity)?;
    writeln!(out, "illum {}", material.illumination.code())?;

    if material.has_ambient_texture() {
        if options.literal_texture_newline {
            writeln!(out, "map_Ka {}\\n", material.ambient_texture)?;
        } else {
            writeln!(out, "map_Ka {}", material.ambient_texture)?;
        }
    }
    Ok(())
}

/// Append one model block using the given cross-model offsets
pub fn write_model(
    out: &mut String,
    model: &Model,
    mtl_file_name: &str,
    vertex_offset: usize,
    uv_offset: usize,
    options: &ObjWriteOptions,
) -> fmt::Result {
    let p = options.precision;
    writeln!(out, "mtllib {mtl_file_name}")?;
    writeln!(out, "o {}", model.name)?;
    for v in &model.vertices {
        writeln!(out, "v {:.p$} {:.p$} {:.p$}", v.x, v.y, v.z)?;
    }
    for uv in &model.uvs {
        writeln!(out, "vt {:.p$} {:.p$}", uv.x, uv.y)?;
    }
    writeln!(out, "s {}", if model.smooth_shading { 1 } else { 0 })?;
    writeln!(out, "usemtl {}", model.material.name)?;

    let vertex_count = model.vertex_count();
    let uv_count = model.uv_count();
    let with_uvs = model.has_uvs();
    for face in &model.faces {
        out.push('f');
        for &index in face {
            let vertex = resolve_index(index, vertex_offset, vertex_count);
            if with_uvs {
                let uv = resolve_index(index, uv_offset, uv_count);
                write!(out, " {vertex}/{uv}")?;
            } else {
                write!(out, " {vertex}")?;
            }
        }
        out.push('\n');
    }
    Ok(())
}

/// Build the MTL document
pub fn mtl_document(models: &[Model], options: &ObjWriteOptions) -> Result<String> {
    let mut out = String::new();
    write_header(&mut out, &options.mtl_header)?;
    for model in models {
        write_material(&mut out, &model.material, options)?;
    }
    Ok(out)
}

/// Build the OBJ document referencing `mtl_file_name`
pub fn obj_document(models: &[Model], mtl_file_name: &str, options: &ObjWriteOptions) -> Result<String> {
    let mut out = String::new();
    write_header(&mut out, &options.obj_header)?;

    let mut vertex_offset = 0;
    let mut uv_offset = 0;
    for model in models {
        write_model(&mut out, model, mtl_file_name, vertex_offset, uv_offset, options)?;
        vertex_offset += model.vertex_count();
        uv_offset += model.uv_count();
    }
    Ok(out)
}

/// Build both documents
pub fn emit_documents(models: &[Model], mtl_file_name: &str, options: &ObjWriteOptions) -> Result<ObjDocuments> {
    Ok(ObjDocuments {
        obj: obj_document(models, mtl_file_name, options)?,
        mtl: mtl_document(models, options)?,
    })
}

/// Writer producing OBJ/MTL file pairs
pub struct ObjWriter;

impl ModelWriter for ObjWriter {
    fn write_models(models: &[Model], paths: &OutputPaths, options: &ObjWriteOptions) -> Result<()> {
        let documents = emit_documents(models, &paths.mtl_file_name(), options)?;

        std::fs::write(&paths.mtl, documents.mtl)?;
        info!(path = %paths.mtl.display(), materials = models.len(), "Wrote MTL file");

        std::fs::write(&paths.obj, documents.obj)?;
        info!(path = %paths.obj.display(), objects = models.len(), "Wrote OBJ file");
        Ok(())
    }
}
