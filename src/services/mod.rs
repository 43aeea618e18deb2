// photoview services
// Services do the I/O: image files, the persisted window state, and log output.

pub mod image_loader;
pub mod logging;
pub mod window_state;
