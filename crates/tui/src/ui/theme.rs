use ratatui::style::Color;

/// Terminal rendition of the app palette: dark surfaces with the brand
/// orange as accent, green/red for money movement.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub border: Color,
    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color::Rgb(16, 16, 18),
            border: Color::Rgb(70, 70, 74),
            accent: Color::Rgb(255, 122, 0),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            dim: Color::Rgb(110, 110, 110),
            positive: Color::Rgb(0, 169, 110),
            negative: Color::Rgb(231, 76, 60),
            error: Color::Rgb(231, 76, 60),
        }
    }
}
