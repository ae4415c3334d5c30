//! Terminal front end: home screen, generation form and slide viewer.

pub mod app;
pub mod form;
mod highlight;
pub mod home;
pub mod icons;
pub mod markdown;
mod text_input;
pub mod theme;
pub mod toast;
pub mod viewer;
pub mod widgets;

pub use app::{run_app, App, AppOptions, Screen};
pub use markdown::render_markdown;
pub use theme::Theme;
