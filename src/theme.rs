use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

/// Colors for every drawable entity and the HUD.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub player: Color,
    pub enemy: Color,
    pub food: Color,
    /// SPEED and GROWTH markers.
    pub power_up: Color,
    /// INVINCIBILITY marker.
    pub invincibility: Color,
    pub field_bg: Color,
    pub border: Color,
    pub hud_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            player: Color::Rgb(0, 255, 0),
            enemy: Color::Rgb(255, 0, 0),
            food: Color::Rgb(255, 255, 0),
            power_up: Color::Rgb(0, 0, 255),
            invincibility: Color::Rgb(128, 0, 128),
            field_bg: Color::Rgb(0, 0, 0),
            border: Color::DarkGray,
            hud_text: Color::Rgb(255, 255, 255),
        }
    }
}

/// Raised when a palette token cannot be turned into a color.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown color '{value}' for palette entry '{entry}'")]
pub struct PaletteParseError {
    pub entry: &'static str,
    pub value: String,
}

/// Palette section of the config file; every entry is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteFile {
    #[serde(default)]
    player: Option<ColorValue>,
    #[serde(default)]
    enemy: Option<ColorValue>,
    #[serde(default)]
    food: Option<ColorValue>,
    #[serde(default)]
    power_up: Option<ColorValue>,
    #[serde(default)]
    invincibility: Option<ColorValue>,
    #[serde(default)]
    field_bg: Option<ColorValue>,
    #[serde(default)]
    border: Option<ColorValue>,
    #[serde(default)]
    hud_text: Option<ColorValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ColorValue {
    String(String),
    Ansi(u8),
}

impl PaletteFile {
    /// Resolves the listed entries over `base`.
    pub fn resolve(&self, base: &Palette) -> Result<Palette, PaletteParseError> {
        Ok(Palette {
            player: resolve_entry("player", self.player.as_ref(), base.player)?,
            enemy: resolve_entry("enemy", self.enemy.as_ref(), base.enemy)?,
            food: resolve_entry("food", self.food.as_ref(), base.food)?,
            power_up: resolve_entry("power_up", self.power_up.as_ref(), base.power_up)?,
            invincibility: resolve_entry(
                "invincibility",
                self.invincibility.as_ref(),
                base.invincibility,
            )?,
            field_bg: resolve_entry("field_bg", self.field_bg.as_ref(), base.field_bg)?,
            border: resolve_entry("border", self.border.as_ref(), base.border)?,
            hud_text: resolve_entry("hud_text", self.hud_text.as_ref(), base.hud_text)?,
        })
    }
}

fn resolve_entry(
    entry: &'static str,
    value: Option<&ColorValue>,
    fallback: Color,
) -> Result<Color, PaletteParseError> {
    match value {
        None => Ok(fallback),
        Some(ColorValue::Ansi(code)) => Ok(Color::Indexed(*code)),
        Some(ColorValue::String(raw)) => parse_color(raw).ok_or_else(|| PaletteParseError {
            entry,
            value: raw.clone(),
        }),
    }
}

/// Parses `#RRGGBB`, a named ANSI color, or `none`/`reset`.
#[must_use]
pub fn parse_color(value: &str) -> Option<Color> {
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("reset") {
        return Some(Color::Reset);
    }

    parse_hex_color(value).or_else(|| parse_named_ansi_color(value))
}

fn parse_named_ansi_color(value: &str) -> Option<Color> {
    let normalized: String = value
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match normalized.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" | "purple" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" | "lightwhite" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(red, green, blue))
}
