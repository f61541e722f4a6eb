use ratatui::style::Color;

/// Colors for the demo canvas and status bar
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg1: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey2: Color,
    pub accent: Color,
    pub warning: Color,

    /// Canvas gradient, top-left corner
    pub gradient_from: (u8, u8, u8),
    /// Canvas gradient, bottom-right corner
    pub gradient_to: (u8, u8, u8),
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark chrome over a green-to-cream canvas
        Self {
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            gradient_from: (0x6b, 0xaa, 0x6a),
            gradient_to: (0xff, 0xee, 0xaa),
        }
    }
}

impl Theme {
    /// Blend the canvas gradient at `t` in [0, 1]
    pub fn gradient_at(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        let (r0, g0, b0) = self.gradient_from;
        let (r1, g1, b1) = self.gradient_to;
        Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
    }
}
