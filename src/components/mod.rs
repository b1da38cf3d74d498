pub mod app;
pub mod artwork_display;
pub mod gallery;
pub mod viewer_controls;
pub mod zoom_viewer;

pub use app::App;
