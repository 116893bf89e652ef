//! Charts module - chart description and rendering

mod builder;
mod plotter;
mod renderer;

pub use builder::{
    build_chart, ChartOutcome, ChartSpec, FilterSelection, RenderError, SexFilter,
};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
