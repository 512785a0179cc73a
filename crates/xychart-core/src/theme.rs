// File: crates/xychart-core/src/theme.rs
// Summary: Light/Dark theming plus the named-color palette used to resolve configured colors.

use skia_safe as skia;

use crate::color::parse_css_color;

/// Classic series palette, assigned by series index.
const CLASSIC_PALETTE: [&str; 10] = [
    "#7EB26D", "#EAB839", "#6ED0E0", "#EF843C", "#E24D42",
    "#1F78C1", "#BA43A9", "#705DA0", "#508642", "#CCA300",
];

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    /// Used when a configured color name cannot be resolved.
    pub fallback: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            fallback: skia::Color::from_argb(255, 128, 128, 128),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            fallback: skia::Color::from_argb(255, 128, 128, 128),
        }
    }

    /// Resolve a palette name ("green", "dark-red", ...) or any CSS color.
    pub fn color_by_name(&self, name: &str) -> skia::Color {
        let name = name.trim();
        named_hex(name)
            .and_then(parse_css_color)
            .or_else(|| parse_css_color(name))
            .unwrap_or(self.fallback)
    }

    /// Classic palette color for the series at `index`, cycling.
    pub fn palette_color(&self, index: usize) -> skia::Color {
        let hex = CLASSIC_PALETTE[index % CLASSIC_PALETTE.len()];
        parse_css_color(hex).unwrap_or(self.fallback)
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::dark() }
}

fn named_hex(name: &str) -> Option<&'static str> {
    let hex = match name.to_ascii_lowercase().as_str() {
        "green" => "#73BF69",
        "dark-green" => "#37872D",
        "semi-dark-green" => "#56A64B",
        "light-green" => "#96D98D",
        "red" => "#F2495C",
        "dark-red" => "#C4162A",
        "semi-dark-red" => "#E02F44",
        "light-red" => "#FF7383",
        "blue" => "#5794F2",
        "dark-blue" => "#1F60C4",
        "semi-dark-blue" => "#3274D9",
        "light-blue" => "#8AB8FF",
        "yellow" => "#FADE2A",
        "dark-yellow" => "#E0B400",
        "semi-dark-yellow" => "#F2CC0C",
        "light-yellow" => "#FFEE52",
        "orange" => "#FF9830",
        "dark-orange" => "#FA6400",
        "semi-dark-orange" => "#FF780A",
        "light-orange" => "#FFB357",
        "purple" => "#B877D9",
        "dark-purple" => "#8F3BB8",
        "semi-dark-purple" => "#A352CC",
        "light-purple" => "#CA95E5",
        "transparent" => "#00000000",
        _ => return None,
    };
    Some(hex)
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::dark)
}
