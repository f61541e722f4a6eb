pub mod app;
pub mod canvas;
pub mod event;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use canvas::CanvasSurface;
pub use theme::Theme;
