// Colour mapping for expression plots. Pure functions of their inputs: no IO, no shared state.
pub mod color_scale;
pub mod colorizer;
pub mod legend;

pub use color_scale::{AxisStyle, ColorScale, Rgb, Rgba, ScaleError};
pub use colorizer::{ColorizedPoint, ColorizedSeries, SeriesColorizer};
pub use legend::{Legend, LegendAxis, LegendStop, LegendTick, legend_stops, legend_ticks};
