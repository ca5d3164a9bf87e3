use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Light checkerboard square
    pub light_square: Color,
    /// Dark checkerboard square
    pub dark_square: Color,
    /// Queen glyph color
    pub queen: Color,
    /// Background of the cell the search most recently placed into
    pub active_bg: Color,
    /// Panel label / info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Error / no-solutions color
    pub error: Color,
    /// Success / solutions-found color
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Names accepted on the command line and in the preferences file
    pub const NAMES: [&'static str; 3] = ["dark", "light", "high-contrast"];

    /// Look up a theme by name, defaulting to dark
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "high-contrast" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            light_square: Color::Rgb { r: 150, g: 140, b: 120 },
            dark_square: Color::Rgb { r: 80, g: 70, b: 60 },
            queen: Color::Rgb { r: 20, g: 20, b: 25 },
            active_bg: Color::Rgb { r: 235, g: 150, b: 40 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            light_square: Color::Rgb { r: 235, g: 225, b: 205 },
            dark_square: Color::Rgb { r: 170, g: 140, b: 110 },
            queen: Color::Rgb { r: 40, g: 30, b: 20 },
            active_bg: Color::Rgb { r: 250, g: 160, b: 50 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            light_square: Color::White,
            dark_square: Color::DarkGrey,
            queen: Color::Red,
            active_bg: Color::Yellow,
            info: Color::Grey,
            key: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
        }
    }
}
