mod canvas_view;
mod status_bar;

pub use canvas_view::CanvasWidget;
pub use status_bar::StatusBarWidget;
