//! Expression level -> colour interpolation over a list of breakpoints.

use std::fmt;

use crate::config::{GRADIENT, GradientConfig};
use crate::domain::ColorBreakpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse any CSS colour spec colorgrad understands (named, hex, `rgb()`, `hsl()`, ...).
    /// A translucent spec keeps its channels; its alpha is dropped.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let color = colorgrad::Color::from_html(spec).map_err(|e| e.to_string())?;
        let [r, g, b, _] = color.to_rgba8();
        Ok(Self { r, g, b })
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

/// A colour ready to hand to the renderer.
/// Displays as `rgba(r, g, b, a)`, or `rgb(r, g, b)` when fully opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.rgb;
        if self.alpha >= 1.0 {
            write!(f, "rgb({}, {}, {})", r, g, b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", r, g, b, self.alpha)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// Interpolation needs at least one interval
    TooFewBreakpoints(usize),
    NonFiniteThreshold { index: usize },
    /// Thresholds must be strictly increasing
    NonAscendingThreshold {
        index: usize,
        previous: f64,
        threshold: f64,
    },
    /// Legend stop positions must be non-decreasing and within 0-100
    InvalidStopPosition { index: usize, stop_position: f64 },
    InvalidColour { colour: String, reason: String },
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleError::TooFewBreakpoints(n) => {
                write!(f, "At least 2 breakpoints are required, got {}", n)
            }
            ScaleError::NonFiniteThreshold { index } => {
                write!(f, "Breakpoint {} has a non-finite threshold", index)
            }
            ScaleError::NonAscendingThreshold {
                index,
                previous,
                threshold,
            } => write!(
                f,
                "Breakpoint {} threshold {} is not above the previous threshold {}",
                index, threshold, previous
            ),
            ScaleError::InvalidStopPosition {
                index,
                stop_position,
            } => write!(
                f,
                "Breakpoint {} stop position {} is out of order or outside 0-100",
                index, stop_position
            ),
            ScaleError::InvalidColour { colour, reason } => {
                write!(f, "Invalid colour '{}': {}", colour, reason)
            }
        }
    }
}

impl std::error::Error for ScaleError {}

fn parse_colour(spec: &str) -> Result<Rgb, ScaleError> {
    Rgb::parse(spec).map_err(|reason| ScaleError::InvalidColour {
        colour: spec.to_string(),
        reason,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    threshold: f64,
    colour: Rgb,
}

/// Colours of the logarithmic legend axis, one schema entry per decade.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    pub schema: Vec<String>,
    pub min: f64,
    pub min_colour: String,
}

impl AxisStyle {
    fn from_config(config: &GradientConfig) -> Self {
        Self {
            schema: config.legend_schema.iter().map(|c| c.to_string()).collect(),
            min: config.legend_min,
            min_colour: config.legend_min_colour.to_string(),
        }
    }
}

/// Validated breakpoints plus the fixed colours of the special cases.
/// Built once at setup; every lookup afterwards is infallible.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    breakpoints: Vec<ColorBreakpoint>,
    anchors: Vec<Anchor>,
    neutral: Rgb,
    deep: Rgb,
    fallback: Rgb,
    saturation_ceiling: f64,
    default_alpha: f64,
    neutral_alpha: f64,
    axis: AxisStyle,
}

impl ColorScale {
    /// Scale over `breakpoints` with the compiled-in special colours.
    pub fn new(breakpoints: Vec<ColorBreakpoint>) -> Result<Self, ScaleError> {
        Self::with_config(breakpoints, &GRADIENT)
    }

    pub fn with_config(
        breakpoints: Vec<ColorBreakpoint>,
        config: &GradientConfig,
    ) -> Result<Self, ScaleError> {
        if breakpoints.len() < 2 {
            return Err(ScaleError::TooFewBreakpoints(breakpoints.len()));
        }

        let mut anchors = Vec::with_capacity(breakpoints.len());
        for (index, bp) in breakpoints.iter().enumerate() {
            if !bp.threshold.is_finite() {
                return Err(ScaleError::NonFiniteThreshold { index });
            }
            if index > 0 {
                let prev = &breakpoints[index - 1];
                if bp.threshold <= prev.threshold {
                    return Err(ScaleError::NonAscendingThreshold {
                        index,
                        previous: prev.threshold,
                        threshold: bp.threshold,
                    });
                }
                if bp.stop_position < prev.stop_position {
                    return Err(ScaleError::InvalidStopPosition {
                        index,
                        stop_position: bp.stop_position,
                    });
                }
            }
            if !(0.0..=100.0).contains(&bp.stop_position) {
                return Err(ScaleError::InvalidStopPosition {
                    index,
                    stop_position: bp.stop_position,
                });
            }
            anchors.push(Anchor {
                threshold: bp.threshold,
                colour: parse_colour(&bp.colour)?,
            });
        }

        Ok(Self {
            breakpoints,
            anchors,
            neutral: parse_colour(config.neutral_colour)?,
            deep: parse_colour(config.deep_colour)?,
            fallback: parse_colour(config.default_colour)?,
            saturation_ceiling: config.saturation_ceiling,
            default_alpha: config.default_alpha,
            neutral_alpha: config.neutral_alpha,
            axis: AxisStyle::from_config(config),
        })
    }

    /// The scale every plot uses unless the page supplies its own gradient.
    pub fn default_gradient() -> Result<Self, ScaleError> {
        Self::new(GRADIENT.default_breakpoints())
    }

    pub fn breakpoints(&self) -> &[ColorBreakpoint] {
        &self.breakpoints
    }

    /// Colour of zero expression, also used to grey out unselected series.
    pub fn neutral(&self) -> Rgb {
        self.neutral
    }

    pub fn fallback(&self) -> Rgb {
        self.fallback
    }

    pub fn default_alpha(&self) -> f64 {
        self.default_alpha
    }

    /// The explicit grey attached to desaturated points.
    pub fn neutral_grey(&self) -> Rgba {
        self.neutral.with_alpha(self.neutral_alpha)
    }

    pub fn axis_style(&self) -> &AxisStyle {
        &self.axis
    }

    /// Colour for `value`.
    ///
    /// - missing / NaN: `default` at `alpha`
    /// - exactly zero: the neutral grey
    /// - above the saturation ceiling: the deep colour
    /// - otherwise: per-channel linear interpolation inside the breakpoint
    ///   interval containing `value`, floored to integers. Values past the last
    ///   threshold (but under the ceiling) take the last breakpoint's colour;
    ///   values at or below the first threshold take the first one's.
    pub fn color_for_value(&self, value: Option<f64>, default: Rgb, alpha: f64) -> Rgba {
        let value = match value {
            Some(v) if !v.is_nan() => v,
            _ => return default.with_alpha(alpha),
        };
        if value == 0.0 {
            return self.neutral.with_alpha(alpha);
        }
        if value > self.saturation_ceiling {
            return self.deep.with_alpha(alpha);
        }

        let index = self.interval_index(value);
        let lo = self.anchors[index];
        let hi = self.anchors[index + 1];
        let fraction = ((value - lo.threshold) / (hi.threshold - lo.threshold)).clamp(0.0, 1.0);

        Rgb {
            r: lerp_channel(lo.colour.r, hi.colour.r, fraction),
            g: lerp_channel(lo.colour.g, hi.colour.g, fraction),
            b: lerp_channel(lo.colour.b, hi.colour.b, fraction),
        }
        .with_alpha(alpha)
    }

    /// `color_for_value` with the configured fallback colour and alpha.
    pub fn paint(&self, value: Option<f64>) -> Rgba {
        self.color_for_value(value, self.fallback, self.default_alpha)
    }

    // Index of the lower anchor of the interval used for `value`.
    // Always in 0..=len-2.
    fn interval_index(&self, value: f64) -> usize {
        if value <= 0.0 {
            return 0;
        }
        match self.anchors.iter().position(|a| a.threshold >= value) {
            Some(upper) => upper.saturating_sub(1),
            None => self.anchors.len() - 2,
        }
    }
}

fn lerp_channel(lo: u8, hi: u8, fraction: f64) -> u8 {
    let lo = f64::from(lo);
    let hi = f64::from(hi);
    (lo + (hi - lo) * fraction).floor().clamp(0.0, 255.0) as u8
}
