use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Colors used by every screen for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub user: Color,
    pub bot: Color,
    pub warning: Color,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Guesses the terminal background from `COLORFGBG` ("fg;bg"), dark otherwise.
    pub fn detect() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| Self::from_colorfgbg(&value))
            .unwrap_or(Theme::Dark)
    }

    fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        // 7 and 15 are the light greys/whites of the 16-color palette.
        Some(if bg == 7 || bg == 15 {
            Theme::Light
        } else {
            Theme::Dark
        })
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                user: Color::Rgb(255, 223, 128),
                bot: Color::Rgb(144, 238, 144),
                warning: Color::Yellow,
            },
            Theme::Light => Palette {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                user: Color::Rgb(153, 102, 0),
                bot: Color::Rgb(0, 110, 60),
                warning: Color::Red,
            },
        }
    }
}
