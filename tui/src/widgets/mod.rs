pub mod banner;
pub mod status_bar;

pub use status_bar::StatusBar;
