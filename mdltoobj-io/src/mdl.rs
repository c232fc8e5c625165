//! STK/MDL scanner
//!
//! The source is read one line at a time by a small state machine. Lines
//! that are not understood are ignored, so unknown syntax never stops a
//! conversion.

use crate::faces::PolygonRun;
use crate::session::ConversionSession;
use crate::tokens::{
    color_for_key, count_for_key, f64_for_key, has_key, parse_vertex, parse_vertex_uv,
    trim_line_end, value_for_key,
};
use crate::ModelReader;
use mdltoobj_core::{Model, Result};
use std::path::Path;
use tracing::{debug, info};

/// Literal markers recognized in MDL sources
pub mod markers {
    pub const COMPONENT: &str = "Component ";
    pub const SURFACE: &str = "Surface: ";
    pub const POLYGON_MESH: &str = "PolygonMesh";
    pub const END_POLYGON_MESH: &str = "EndPolygonMesh";
    pub const NUM_VERTS: &str = "NumVerts ";
    pub const NUM_POLYS: &str = "NumPolys ";
    pub const TEXTURE: &str = "Texture";
    pub const END_TEXTURE: &str = "EndTexture";
    pub const TEXTURE_PATH: &str = "FRGB ";
    pub const POLYS: &str = "Polys";
    pub const DATA: &str = "Data";
    pub const DATA_TX: &str = "DataTx";
    pub const FACE_COLOR: &str = "FaceColor %";
    pub const FACE_EMISSION_COLOR: &str = "FaceEmissionColor %";
    pub const SMOOTH_SHADING: &str = "SmoothShading ";
    pub const SHININESS: &str = "Shininess ";
    pub const TRANSLUCENCY: &str = "Translucency ";
    pub const SPECULARITY: &str = "Specularity ";
}

use markers::*;

/// Upper bound on capacity reserved from a declared count
const MAX_RESERVED_ITEMS: usize = 1 << 16;

/// Flags describing where the scanner currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Between a mesh-begin and a mesh-end marker
    pub inside_component: bool,
    /// Reading vertex rows
    pub inside_mesh_data: bool,
    /// Vertex rows carry `u v` after `x y z`
    pub has_uv_columns: bool,
    /// Reading polygon lines
    pub inside_polygon_list: bool,
    /// Between texture begin and end markers
    pub inside_texture_block: bool,
}

/// Line-by-line MDL scanner feeding a [`ConversionSession`]
#[derive(Debug, Default)]
pub struct MdlScanner {
    state: ScanState,
    component_name: String,
    surface_name: String,
    model: Model,
    declared_vertices: usize,
}

impl MdlScanner {
    /// Create a scanner positioned before any component
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flag configuration
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Model being assembled by the open mesh block
    pub fn current_model(&self) -> &Model {
        &self.model
    }

    /// Feed one source line
    pub fn scan_line(&mut self, line: &str, session: &mut ConversionSession) {
        let line = trim_line_end(line);
        if self.state.inside_component {
            self.scan_mesh_line(line, session);
        } else {
            self.scan_outer_line(line, session);
        }
    }

    fn scan_outer_line(&mut self, line: &str, session: &mut ConversionSession) {
        if let Some(name) = value_for_key(line, COMPONENT) {
            self.component_name = name.to_string();
        } else if let Some(name) = value_for_key(line, SURFACE) {
            self.surface_name = name.to_string();
        } else if has_key(line, POLYGON_MESH) {
            self.begin_mesh(session);
        }
    }

    fn scan_mesh_line(&mut self, line: &str, session: &mut ConversionSession) {
        let state = &mut self.state;
        let model = &mut self.model;

        if let Some(count) = count_for_key(line, NUM_POLYS) {
            state.inside_mesh_data = false;
            state.inside_polygon_list = true;
            model.faces.reserve(count.min(MAX_RESERVED_ITEMS));
            debug!(mesh = %model.name, declared = count, "Faces section found");
        } else if let Some(count) = count_for_key(line, NUM_VERTS) {
            model.vertices.reserve(count.min(MAX_RESERVED_ITEMS));
            self.declared_vertices = count;
        } else if state.inside_mesh_data {
            if state.has_uv_columns {
                if let Some((vertex, uv)) = parse_vertex_uv(line) {
                    model.push_vertex_uv(vertex, uv);
                }
            } else if let Some(vertex) = parse_vertex(line) {
                model.push_vertex(vertex);
            }
        } else if has_key(line, END_POLYGON_MESH) {
            self.end_mesh(session);
        } else if has_key(line, END_TEXTURE) {
            state.inside_texture_block = false;
        } else if has_key(line, TEXTURE) {
            state.inside_texture_block = true;
        } else if state.inside_polygon_list {
            match PolygonRun::parse(line) {
                Some(run) => model.faces.extend(run.triangles()),
                None => debug!(mesh = %model.name, line, "Skipping malformed polygon line"),
            }
        } else if state.inside_texture_block {
            if let Some(path) = value_for_key(line, TEXTURE_PATH) {
                model.material.ambient_texture = path.to_string();
                debug!(mesh = %model.name, texture = path, "Ka texture found");
            }
        } else if let Some(color) = color_for_key(line, FACE_COLOR) {
            model.material.ambient = color;
        } else if let Some(color) = color_for_key(line, FACE_EMISSION_COLOR) {
            model.material.emissive = color;
        } else if let Some(value) = value_for_key(line, SMOOTH_SHADING) {
            model.smooth_shading = value.trim() != "No";
        } else if let Some(value) = f64_for_key(line, SHININESS) {
            model.material.specular_exponent = value;
        } else if let Some(value) = f64_for_key(line, TRANSLUCENCY) {
            model.material.opacity = value;
        } else if let Some(value) = f64_for_key(line, SPECULARITY) {
            model.material.set_specularity(value);
        } else if has_key(line, POLYS) {
            state.inside_polygon_list = true;
        } else if has_key(line, DATA_TX) {
            state.inside_mesh_data = true;
            state.has_uv_columns = true;
            debug!(mesh = %model.name, "Vertices/Uvs section found");
        } else if has_key(line, DATA) {
            state.inside_mesh_data = true;
            debug!(mesh = %model.name, "Vertices section found");
        } else if !model.has_uvs() && model.vertices.len() < self.declared_vertices {
            // bare coordinate rows right after a vertex count
            if let Some(vertex) = parse_vertex(line) {
                model.push_vertex(vertex);
            }
        }
    }

    fn begin_mesh(&mut self, session: &mut ConversionSession) {
        let name = session.unique_name(&self.component_name, &self.surface_name);
        info!(mesh = %name, "Mesh found");

        self.state = ScanState {
            inside_component: true,
            ..ScanState::default()
        };
        self.model = Model::named(name);
        self.declared_vertices = 0;
    }

    fn end_mesh(&mut self, session: &mut ConversionSession) {
        let model = std::mem::take(&mut self.model);
        info!(
            mesh = %model.name,
            vertices = model.vertex_count(),
            uvs = model.uv_count(),
            faces = model.face_count(),
            "Mesh closed"
        );

        self.state = ScanState::default();
        session.push_model(model);
    }
}

/// Reader producing models from MDL files
pub struct MdlReader;

impl ModelReader for MdlReader {
    fn read_models<P: AsRef<Path>>(path: P) -> Result<Vec<Model>> {
        let mut session = ConversionSession::new();
        session.open_mdl_file(path)?;
        Ok(session.into_models())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(lines: &[&str]) -> (MdlScanner, ConversionSession) {
        let mut scanner = MdlScanner::new();
        let mut session = ConversionSession::new();
        for line in lines {
            scanner.scan_line(line, &mut session);
        }
        (scanner, session)
    }

    fn in_mesh() -> ScanState {
        ScanState {
            inside_component: true,
            ..ScanState::default()
        }
    }

    #[test]
    fn test_outer_markers() {
        let (scanner, _) = scan(&["Component Body"]);
        assert_eq!(scanner.state(), ScanState::default());
        assert_eq!(scanner.component_name, "Body");

        let (scanner, _) = scan(&["Surface: Hull"]);
        assert_eq!(scanner.state(), ScanState::default());
        assert_eq!(scanner.surface_name, "Hull");

        let (scanner, _) = scan(&["Component Body", "PolygonMesh"]);
        assert_eq!(scanner.state(), in_mesh());
        assert_eq!(scanner.current_model().name, "Body");
    }

    #[test]
    fn test_data_markers() {
        let (scanner, _) = scan(&["PolygonMesh", "Data"]);
        assert_eq!(
            scanner.state(),
            ScanState { inside_mesh_data: true, ..in_mesh() }
        );

        let (scanner, _) = scan(&["PolygonMesh", "DataTx"]);
        assert_eq!(
            scanner.state(),
            ScanState { inside_mesh_data: true, has_uv_columns: true, ..in_mesh() }
        );
    }

    #[test]
    fn test_count_markers() {
        let (scanner, _) = scan(&["PolygonMesh", "NumVerts 12"]);
        assert_eq!(scanner.state(), in_mesh());
        assert!(scanner.current_model().vertices.capacity() >= 12);

        let (scanner, _) = scan(&["PolygonMesh", "Data", "NumPolys 3"]);
        assert_eq!(
            scanner.state(),
            ScanState { inside_polygon_list: true, ..in_mesh() }
        );
        assert!(scanner.current_model().faces.capacity() >= 3);
    }

    #[test]
    fn test_polys_and_texture_markers() {
        let (scanner, _) = scan(&["PolygonMesh", "Polys"]);
        assert_eq!(
            scanner.state(),
            ScanState { inside_polygon_list: true, ..in_mesh() }
        );

        let (scanner, _) = scan(&["PolygonMesh", "Texture"]);
        assert_eq!(
            scanner.state(),
            ScanState { inside_texture_block: true, ..in_mesh() }
        );

        let (scanner, _) = scan(&["PolygonMesh", "Texture", "EndTexture"]);
        assert_eq!(scanner.state(), in_mesh());
    }

    #[test]
    fn test_mesh_end_marker() {
        let (scanner, session) = scan(&[
            "PolygonMesh",
            "Data",
            "0 0 0",
            "1 0 0",
            "0 1 0",
            "NumPolys 1",
            "3 0 1 2",
            "EndPolygonMesh",
        ]);
        assert_eq!(scanner.state(), ScanState::default());
        assert_eq!(session.models().len(), 1);
        assert_eq!(session.models()[0].faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_vertex_rows() {
        let (scanner, _) = scan(&["PolygonMesh", "Data", "1 2 3", "bogus row", "4 5 6 7", "7 8 9"]);
        let model = scanner.current_model();
        assert_eq!(model.vertex_count(), 2);
        assert!(!model.has_uvs());

        let (scanner, _) = scan(&["PolygonMesh", "DataTx", "1 2 3 0.5 0.5", "1 2 3"]);
        let model = scanner.current_model();
        assert_eq!(model.vertex_count(), 1);
        assert_eq!(model.uv_count(), 1);
    }

    #[test]
    fn test_data_section_swallows_other_lines() {
        let (scanner, _) = scan(&["PolygonMesh", "Data", "Shininess 9", "EndPolygonMesh"]);
        assert_eq!(scanner.current_model().material.specular_exponent, 0.0);
        assert!(scanner.state().inside_component);
    }

    #[test]
    fn test_material_fields() {
        let (scanner, _) = scan(&[
            "PolygonMesh",
            "FaceColor %255000000",
            "FaceEmissionColor %000255000",
            "SmoothShading Yes",
            "Shininess 32",
            "Translucency 0.75",
            "Specularity 0.5",
        ]);
        let model = scanner.current_model();
        assert_eq!(model.material.ambient, [1.0, 0.0, 0.0]);
        assert_eq!(model.material.emissive, [0.0, 1.0, 0.0]);
        assert!(model.smooth_shading);
        assert_eq!(model.material.specular_exponent, 32.0);
        assert_eq!(model.material.opacity, 0.75);
        assert_eq!(model.material.specular, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_malformed_color_leaves_material_untouched() {
        let (scanner, _) = scan(&["PolygonMesh", "FaceColor %25500"]);
        assert_eq!(scanner.current_model().material.ambient, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_smooth_shading_no() {
        let (scanner, _) = scan(&["PolygonMesh", "SmoothShading Yes", "SmoothShading No"]);
        assert!(!scanner.current_model().smooth_shading);
    }

    #[test]
    fn test_texture_path_only_inside_texture_block() {
        let (scanner, _) = scan(&["PolygonMesh", "FRGB outside.bmp"]);
        assert!(scanner.current_model().material.ambient_texture.is_empty());

        let (scanner, _) = scan(&["PolygonMesh", "Texture", "FRGB hull.bmp", "EndTexture"]);
        assert_eq!(scanner.current_model().material.ambient_texture, "hull.bmp");
    }

    #[test]
    fn test_polygon_lines_skip_malformed_runs() {
        let (scanner, _) = scan(&["PolygonMesh", "Polys", "4 0 1 2 3", "5 0 1", "-1 3 0 1 2"]);
        assert_eq!(
            scanner.current_model().faces,
            vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 1, 2]]
        );
    }

    #[test]
    fn test_bare_rows_after_vertex_count() {
        let (scanner, _) = scan(&["PolygonMesh", "NumVerts 2", "0 0 0", "1 1 1", "2 2 2"]);
        assert_eq!(scanner.current_model().vertex_count(), 2);

        let (scanner, _) = scan(&["PolygonMesh", "0 0 0"]);
        assert_eq!(scanner.current_model().vertex_count(), 0);
    }

    #[test]
    fn test_huge_declared_counts() {
        let (scanner, session) = scan(&[
            "PolygonMesh",
            "NumVerts 18446744073709551615",
            "0 0 0",
            "1 0 0",
            "0 1 0",
            "NumPolys 18446744073709551615",
            "3 0 1 2",
            "EndPolygonMesh",
        ]);
        assert_eq!(scanner.state(), ScanState::default());
        assert_eq!(session.models().len(), 1);
        assert_eq!(session.models()[0].vertex_count(), 3);
        assert_eq!(session.models()[0].faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_bare_rows_then_uv_rows_keep_pairing() {
        let (_, session) = scan(&[
            "PolygonMesh",
            "NumVerts 3",
            "0 0 0",
            "DataTx",
            "1 0 0 1 0",
            "0 1 0 0 1",
            "NumPolys 1",
            "3 0 1 -1",
            "EndPolygonMesh",
        ]);
        let model = &session.models()[0];
        assert_eq!(model.vertex_count(), 3);
        assert!(!model.has_uvs());
        assert_eq!(model.faces, vec![vec![0, 1, -1]]);
    }

    #[test]
    fn test_out_of_range_faces_dropped_at_mesh_end() {
        let (_, session) = scan(&[
            "PolygonMesh",
            "Data",
            "0 0 0",
            "1 0 0",
            "0 1 0",
            "NumPolys 2",
            "3 0 1 2",
            "3 0 1 7",
            "EndPolygonMesh",
        ]);
        assert_eq!(session.models()[0].faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_surface_suffix() {
        let (_, session) = scan(&[
            "Component Body",
            "Surface: Hull",
            "PolygonMesh",
            "EndPolygonMesh",
        ]);
        assert!(session.contains_name("Body_Hull"));

        let (_, session) = scan(&[
            "Component Body",
            "Surface: Body",
            "PolygonMesh",
            "EndPolygonMesh",
        ]);
        assert!(session.contains_name("Body"));
    }

    #[test]
    fn test_empty_mesh_is_discarded() {
        let (_, session) = scan(&["Component Body", "PolygonMesh", "EndPolygonMesh"]);
        assert!(session.models().is_empty());
    }
}
