//! Charts module - Chart geometry and rendering

mod plotter;
mod renderer;

pub use plotter::ChartData;
pub use renderer::{ChartRenderer, RenderError};
