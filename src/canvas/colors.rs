use plotters::style::RGBColor;

/// Fallback for unknown color names.
pub const DEFAULT_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Resolve a color name (`"red"`, `"r"`, `"#ff8800"`, …) to RGB.
///
/// Accepts the one-letter shorthands used in classic plotting code
/// (`b g r c m y k w`) as well as a handful of full names and hex triplets.
pub fn named_color(name: &str) -> RGBColor {
    let name = name.trim().to_ascii_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(DEFAULT_COLOR);
    }
    match name.as_str() {
        "b" | "blue" => RGBColor(0, 0, 255),
        "g" | "green" => RGBColor(0, 128, 0),
        "r" | "red" => RGBColor(255, 0, 0),
        "c" | "cyan" => RGBColor(0, 191, 191),
        "m" | "magenta" => RGBColor(191, 0, 191),
        "y" | "yellow" => RGBColor(191, 191, 0),
        "k" | "black" => RGBColor(0, 0, 0),
        "w" | "white" => RGBColor(255, 255, 255),
        "gray" | "grey" => RGBColor(128, 128, 128),
        "orange" => RGBColor(255, 165, 0),
        "purple" | "violet" => RGBColor(148, 0, 211),
        "brown" => RGBColor(139, 69, 19),
        _ => {
            log::warn!("unknown color '{}', using default", name);
            DEFAULT_COLOR
        }
    }
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Cycle of distinct colors for series without an explicit color.
pub fn palette(index: usize) -> &'static str {
    const CYCLE: [&str; 6] = ["r", "g", "b", "c", "m", "y"];
    CYCLE[index % CYCLE.len()]
}
