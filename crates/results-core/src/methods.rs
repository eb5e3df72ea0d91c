use crate::error::{Result, ResultsError};

/// Marker drawn at every data point of a method's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Star,
    Triangle,
    Circle,
    Square,
    Diamond,
}

/// Stroke pattern of a method's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
}

/// Display style for one evaluation method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStyle {
    /// Value of the `method` column this style applies to.
    pub key: &'static str,
    /// Legend label.
    pub label: &'static str,
    /// Line and band colour as `#rrggbb`.
    pub color: &'static str,
    pub marker: Marker,
    pub line: LineKind,
}

/// Every method the figure knows how to draw, in legend order.
///
/// Iteration order is the declaration order here, never the order in which
/// methods appear in the dataset.
pub const METHOD_STYLES: &[MethodStyle] = &[
    MethodStyle {
        key: "oracle",
        label: "Sync (\u{0394}=0)",
        color: "#f39c12",
        marker: Marker::Star,
        line: LineKind::Dashed,
    },
    MethodStyle {
        key: "vlash",
        label: "Ours",
        color: "#2ecc71",
        marker: Marker::Triangle,
        line: LineKind::Solid,
    },
    MethodStyle {
        key: "vlash_w_noise",
        label: "Ours (w/ noise)",
        color: "#2ecc71",
        marker: Marker::Circle,
        line: LineKind::Solid,
    },
    MethodStyle {
        key: "realtime",
        label: "RTC",
        color: "#3498db",
        marker: Marker::Square,
        line: LineKind::Solid,
    },
    MethodStyle {
        key: "naive",
        label: "Naive",
        color: "#e74c3c",
        marker: Marker::Diamond,
        line: LineKind::Solid,
    },
];

/// Look up the style registered for `key`.
pub fn method_style(key: &str) -> Option<&'static MethodStyle> {
    METHOD_STYLES.iter().find(|style| style.key == key)
}

impl MethodStyle {
    /// The colour as `(r, g, b)` channels.
    pub fn rgb(&self) -> Result<(u8, u8, u8)> {
        parse_hex_color(self.color)
    }
}

/// Parse a `#rrggbb` hex colour.
pub fn parse_hex_color(value: &str) -> Result<(u8, u8, u8)> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ResultsError::Config(format!("invalid colour: {value}")));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| ResultsError::Config(format!("invalid colour: {value}")))
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
