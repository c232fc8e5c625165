//! End-to-end tests for mdltoobj-io
//!
//! These run whole MDL sources through the scanner and the emitter, and
//! exercise the file-level conversion entry points.
