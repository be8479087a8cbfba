//! Imports: an account's requests to mount another account's subjects.
//!
//! The import module provides:
//! - The `Import` declaration and its type (stream or service)
//! - The ordered `Imports` collection with canonical sorting
//! - Per-import validation against an activation token
//! - Set validation (mount collisions between service imports)

pub mod imports;
#[allow(clippy::module_inception)]
pub mod import;
pub mod validate;

pub use import::{Import, ImportType};
pub use imports::Imports;
pub use validate::{validate_import, validate_imports, validate_imports_concurrent};
