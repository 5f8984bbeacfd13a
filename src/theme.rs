// Theme support for the TUI
//
// Provides color palettes selectable from the config file.
// "auto" uses the terminal's ANSI palette, named themes use true color (RGB).

use ratatui::style::Color;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Result colors
    pub badge_productive: Color,
    pub badge_unproductive: Color,
    pub gauge_fill: Color,

    // Notice colors
    pub error: Color,
    pub success: Color,

    // UI element colors
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,
    pub dim: Color,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            badge_productive: Color::Green,
            badge_unproductive: Color::Yellow,
            // Muted fill for white label contrast
            gauge_fill: Color::Rgb(0x00, 0x64, 0x00),
            error: Color::Red,
            success: Color::Green,
            title: Color::Cyan,
            border: Color::White,
            highlight: Color::Yellow,
            status_bar: Color::Green,
            dim: Color::DarkGray,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            badge_productive: Color::Rgb(0x50, 0xfa, 0x7b), // green
            badge_unproductive: Color::Rgb(0xff, 0xb8, 0x6c), // orange
            gauge_fill: Color::Rgb(0x28, 0x7d, 0x3d),       // muted green
            error: Color::Rgb(0xff, 0x55, 0x55),            // red
            success: Color::Rgb(0x50, 0xfa, 0x7b),          // green
            title: Color::Rgb(0x8b, 0xe9, 0xfd),            // cyan
            border: Color::Rgb(0x62, 0x72, 0xa4),           // comment
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),        // yellow
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),       // green
            dim: Color::Rgb(0x62, 0x72, 0xa4),              // comment
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            badge_productive: Color::Rgb(0xa3, 0xbe, 0x8c), // aurora green
            badge_unproductive: Color::Rgb(0xd0, 0x87, 0x70), // aurora orange
            gauge_fill: Color::Rgb(0x51, 0x5f, 0x46),       // muted green
            error: Color::Rgb(0xbf, 0x61, 0x6a),            // aurora red
            success: Color::Rgb(0xa3, 0xbe, 0x8c),          // aurora green
            title: Color::Rgb(0x88, 0xc0, 0xd0),            // frost cyan
            border: Color::Rgb(0x4c, 0x56, 0x6a),           // polar night
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),        // yellow
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),       // green
            dim: Color::Rgb(0x4c, 0x56, 0x6a),              // polar night
        }
    }

    /// Gruvbox theme - https://github.com/morhetz/gruvbox
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            badge_productive: Color::Rgb(0xb8, 0xbb, 0x26), // green
            badge_unproductive: Color::Rgb(0xfe, 0x80, 0x19), // orange
            gauge_fill: Color::Rgb(0x5c, 0x5d, 0x13),       // muted green
            error: Color::Rgb(0xfb, 0x49, 0x34),            // red
            success: Color::Rgb(0xb8, 0xbb, 0x26),          // green
            title: Color::Rgb(0x83, 0xa5, 0x98),            // aqua
            border: Color::Rgb(0x92, 0x83, 0x74),           // gray
            highlight: Color::Rgb(0xfa, 0xbd, 0x2f),        // yellow
            status_bar: Color::Rgb(0xb8, 0xbb, 0x26),       // green
            dim: Color::Rgb(0x92, 0x83, 0x74),              // gray
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(Theme::by_name("Dracula").name, "dracula");
        assert_eq!(Theme::by_name("NORD").name, "nord");
    }

    #[test]
    fn test_unknown_name_falls_back_to_auto() {
        assert_eq!(Theme::by_name("solarized").name, "auto");
    }
}
