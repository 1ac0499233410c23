pub mod app;
pub mod event;
pub mod input;
pub mod widgets;

pub use app::App;
