pub mod app;
pub mod pages;
pub mod routes;
pub mod static_files;
pub mod templates;

pub use app::*;
pub use templates::{Flash, Templates};
