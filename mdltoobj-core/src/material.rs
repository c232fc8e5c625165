//! Material parameters attached to each model

use serde::{Deserialize, Serialize};

/// RGB color with channels in `[0, 1]`
pub type Color = [f64; 3];

/// MTL illumination models (`illum` statement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IlluminationModel {
    /// Color on, ambient off
    ColorOnAmbientOff,
    /// Color on, ambient on
    ColorOnAmbientOn,
    /// Highlight on
    HighlightOn,
    /// Reflection on, ray trace on
    ReflectionRayTrace,
    /// Glass on, ray trace on
    GlassRayTrace,
    /// Fresnel reflection on, ray trace on
    FresnelRayTrace,
    /// Refraction on, Fresnel off, ray trace on
    RefractionRayTrace,
    /// Refraction on, Fresnel on, ray trace on
    RefractionFresnelRayTrace,
    /// Reflection on, ray trace off
    Reflection,
    /// Glass on, ray trace off
    Glass,
    /// Casts shadows onto invisible surfaces
    ShadowOnInvisible,
}

impl IlluminationModel {
    const ALL: [IlluminationModel; 11] = [
        IlluminationModel::ColorOnAmbientOff,
        IlluminationModel::ColorOnAmbientOn,
        IlluminationModel::HighlightOn,
        IlluminationModel::ReflectionRayTrace,
        IlluminationModel::GlassRayTrace,
        IlluminationModel::FresnelRayTrace,
        IlluminationModel::RefractionRayTrace,
        IlluminationModel::RefractionFresnelRayTrace,
        IlluminationModel::Reflection,
        IlluminationModel::Glass,
        IlluminationModel::ShadowOnInvisible,
    ];

    /// Integer code written after `illum`
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Look up a model by its integer code
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

impl Default for IlluminationModel {
    fn default() -> Self {
        IlluminationModel::HighlightOn
    }
}

/// Surface material of one model.
///
/// The diffuse color is never read from MDL sources and stays black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Specular exponent (`Ns`)
    pub specular_exponent: f64,
    /// Ambient color (`Ka`)
    pub ambient: Color,
    /// Diffuse color (`Kd`)
    pub diffuse: Color,
    /// Specular color (`Ks`)
    pub specular: Color,
    /// Emissive color (`Ke`)
    pub emissive: Color,
    /// Refraction index (`Ni`)
    pub refraction_index: f64,
    /// Opacity in `[0, 1]` (`d`)
    pub opacity: f64,
    pub illumination: IlluminationModel,
    /// Ambient texture path (`map_Ka`), empty when absent
    pub ambient_texture: String,
}

impl Material {
    /// Create a material with default parameters and the given name
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether an ambient texture is referenced
    pub fn has_ambient_texture(&self) -> bool {
        !self.ambient_texture.is_empty()
    }

    /// Set all three specular channels to the same value
    pub fn set_specularity(&mut self, value: f64) {
        self.specular = [value; 3];
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            specular_exponent: 0.0,
            ambient: [1.0, 1.0, 1.0],
            diffuse: [0.0, 0.0, 0.0],
            specular: [1.0, 1.0, 1.0],
            emissive: [1.0, 1.0, 1.0],
            refraction_index: 0.0,
            opacity: 1.0,
            illumination: IlluminationModel::default(),
            ambient_texture: String::new(),
        }
    }
}
