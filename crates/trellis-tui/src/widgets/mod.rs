mod nav;
mod sections;
mod status_bar;

pub use nav::NavWidget;
pub use sections::SectionsWidget;
pub use status_bar::StatusBarWidget;
