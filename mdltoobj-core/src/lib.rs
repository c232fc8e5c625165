//! Core data structures for mdltoobj
//!
//! This crate holds the models extracted from STK/MDL scene descriptions
//! (geometry, texture coordinates, faces and their material) together with
//! the error type shared by the rest of the workspace.

pub mod model;
pub mod material;
pub mod error;

pub use model::*;
pub use material::*;
pub use error::*;

/// Re-export the nalgebra point types used for geometry
pub use nalgebra::{Point2, Point3};

/// Common result type for mdltoobj operations
pub type Result<T> = std::result::Result<T, Error>;
