// photoview shared type definitions
// Each submodule defines types used across the host, the bridge and the display surfaces.

pub mod errors;
pub mod image;
pub mod window;
