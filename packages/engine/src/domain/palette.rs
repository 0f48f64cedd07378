use crate::core::{RendererError, RendererResult, Rng};

/// Catppuccin-style pastel accents the background cycles through.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#f5e0dc",
    "#f2cdcd",
    "#eba0ac",
    "#cba6f7",
    "#89b4fa",
    "#74c7ec",
    "#94e2d5",
    "#a6e3a1",
    "#f9e2af",
    "#fab387",
];

/// Sprite cache keys store the palette index in a byte.
pub const MAX_PALETTE_LEN: usize = 256;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let packed = u32::from_str_radix(digits, 16).ok()?;
        Some(Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        })
    }

    pub fn to_css_rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// Channels normalized to `[0, 1]`.
    #[inline]
    pub fn to_unit(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn from_hex_list<S: AsRef<str>>(entries: &[S]) -> RendererResult<Self> {
        if entries.is_empty() {
            return Err(RendererError::InvalidConfig("palette is empty".into()));
        }
        if entries.len() > MAX_PALETTE_LEN {
            return Err(RendererError::InvalidConfig(format!(
                "palette has {} colors, at most {} supported",
                entries.len(),
                MAX_PALETTE_LEN
            )));
        }
        let colors = entries
            .iter()
            .map(|hex| {
                Rgb::from_hex(hex.as_ref()).ok_or_else(|| {
                    RendererError::InvalidConfig(format!("bad palette color {:?}", hex.as_ref()))
                })
            })
            .collect::<RendererResult<Vec<_>>>()?;
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(index as usize).copied()
    }

    /// Uniformly random palette index.
    pub fn pick(&self, rng: &mut Rng) -> u8 {
        rng.below(self.colors.len() as u32) as u8
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| Rgb::from_hex(hex))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#89b4fa"), Some(Rgb::new(0x89, 0xb4, 0xfa)));
        assert_eq!(Rgb::from_hex("a6e3a1"), Some(Rgb::new(0xa6, 0xe3, 0xa1)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#+12345"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn css_rgba_matches_canvas_syntax() {
        let c = Rgb::new(245, 224, 220);
        assert_eq!(c.to_css_rgba(0.6), "rgba(245, 224, 220, 0.6)");
        assert_eq!(c.to_css_rgba(0.0), "rgba(245, 224, 220, 0)");
    }

    #[test]
    fn default_palette_has_ten_colors() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.get(9), Some(Rgb::new(0xfa, 0xb3, 0x87)));
        assert_eq!(palette.get(10), None);
    }

    #[test]
    fn rejects_bad_entries() {
        assert!(Palette::from_hex_list::<&str>(&[]).is_err());
        assert!(Palette::from_hex_list(&["#123456", "nope"]).is_err());
    }
}
