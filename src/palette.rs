//! Color palettes for the editor chrome and syntax highlighting
//!
//! A palette is a flat, immutable set of named colors. Five presets are
//! built in; the active palette is swapped wholesale on theme change.

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A complete color theme
///
/// Every field is always populated; there are no partial or inherited
/// palettes. The UI colors drive the window chrome (tab strip, gutter,
/// status line), the six syntax colors drive the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Human-readable theme name
    pub name: &'static str,

    // UI colors
    pub background_dark: Rgb,
    pub background_medium: Rgb,
    pub background_light: Rgb,
    pub accent: Rgb,
    pub text: Rgb,
    pub text_secondary: Rgb,
    pub button_background: Rgb,
    pub button_hover: Rgb,
    pub tab_active: Rgb,
    pub tab_inactive: Rgb,
    pub border: Rgb,

    // Syntax colors
    pub syntax_keyword: Rgb,
    pub syntax_string: Rgb,
    pub syntax_comment: Rgb,
    pub syntax_number: Rgb,
    pub syntax_function: Rgb,
    pub syntax_operator: Rgb,
}

impl Palette {
    /// The default theme: near-black chrome, red keywords, pink strings
    pub const fn default_dark() -> Self {
        Self {
            name: "Default Dark",
            background_dark: Rgb::new(10, 10, 10),
            background_medium: Rgb::new(20, 20, 20),
            background_light: Rgb::new(18, 18, 18),
            accent: Rgb::new(0, 122, 204),
            text: Rgb::new(220, 220, 220),
            text_secondary: Rgb::new(120, 120, 120),
            button_background: Rgb::new(45, 45, 45),
            button_hover: Rgb::new(65, 65, 65),
            tab_active: Rgb::new(35, 35, 35),
            tab_inactive: Rgb::new(25, 25, 25),
            border: Rgb::new(50, 50, 50),
            syntax_keyword: Rgb::new(248, 90, 90),
            syntax_string: Rgb::new(255, 180, 200),
            syntax_comment: Rgb::new(90, 90, 90),
            syntax_number: Rgb::new(220, 220, 220),
            syntax_function: Rgb::new(220, 220, 220),
            syntax_operator: Rgb::new(220, 220, 220),
        }
    }

    pub const fn blue_purple() -> Self {
        Self {
            name: "Blue Purple",
            background_dark: Rgb::new(15, 15, 35),
            background_medium: Rgb::new(25, 25, 55),
            background_light: Rgb::new(40, 40, 80),
            accent: Rgb::new(138, 43, 226),
            text: Rgb::new(230, 230, 255),
            text_secondary: Rgb::new(160, 160, 200),
            button_background: Rgb::new(50, 50, 100),
            button_hover: Rgb::new(70, 70, 130),
            tab_active: Rgb::new(40, 40, 80),
            tab_inactive: Rgb::new(25, 25, 55),
            border: Rgb::new(80, 80, 140),
            syntax_keyword: Rgb::new(199, 146, 234),
            syntax_string: Rgb::new(195, 232, 141),
            syntax_comment: Rgb::new(99, 119, 119),
            syntax_number: Rgb::new(247, 140, 108),
            syntax_function: Rgb::new(130, 170, 255),
            syntax_operator: Rgb::new(137, 221, 255),
        }
    }

    pub const fn matrix_green() -> Self {
        Self {
            name: "Matrix Green",
            background_dark: Rgb::new(10, 20, 10),
            background_medium: Rgb::new(15, 35, 15),
            background_light: Rgb::new(25, 55, 25),
            accent: Rgb::new(0, 255, 65),
            text: Rgb::new(200, 255, 200),
            text_secondary: Rgb::new(100, 180, 100),
            button_background: Rgb::new(30, 70, 30),
            button_hover: Rgb::new(40, 100, 40),
            tab_active: Rgb::new(25, 55, 25),
            tab_inactive: Rgb::new(15, 35, 15),
            border: Rgb::new(0, 150, 50),
            syntax_keyword: Rgb::new(0, 255, 100),
            syntax_string: Rgb::new(180, 255, 180),
            syntax_comment: Rgb::new(80, 140, 80),
            syntax_number: Rgb::new(150, 255, 150),
            syntax_function: Rgb::new(100, 255, 200),
            syntax_operator: Rgb::new(200, 255, 200),
        }
    }

    pub const fn crimson_red() -> Self {
        Self {
            name: "Crimson Red",
            background_dark: Rgb::new(25, 10, 10),
            background_medium: Rgb::new(45, 20, 20),
            background_light: Rgb::new(70, 35, 35),
            accent: Rgb::new(220, 20, 60),
            text: Rgb::new(255, 220, 220),
            text_secondary: Rgb::new(180, 140, 140),
            button_background: Rgb::new(90, 40, 40),
            button_hover: Rgb::new(120, 50, 50),
            tab_active: Rgb::new(70, 35, 35),
            tab_inactive: Rgb::new(45, 20, 20),
            border: Rgb::new(150, 60, 60),
            syntax_keyword: Rgb::new(255, 100, 100),
            syntax_string: Rgb::new(255, 200, 150),
            syntax_comment: Rgb::new(150, 100, 100),
            syntax_number: Rgb::new(255, 180, 180),
            syntax_function: Rgb::new(255, 150, 200),
            syntax_operator: Rgb::new(255, 200, 200),
        }
    }

    pub const fn ocean_blue() -> Self {
        Self {
            name: "Ocean Blue",
            background_dark: Rgb::new(10, 20, 30),
            background_medium: Rgb::new(20, 40, 60),
            background_light: Rgb::new(35, 65, 95),
            accent: Rgb::new(0, 191, 255),
            text: Rgb::new(220, 240, 255),
            text_secondary: Rgb::new(140, 180, 200),
            button_background: Rgb::new(40, 80, 120),
            button_hover: Rgb::new(60, 110, 160),
            tab_active: Rgb::new(35, 65, 95),
            tab_inactive: Rgb::new(20, 40, 60),
            border: Rgb::new(60, 120, 180),
            syntax_keyword: Rgb::new(100, 200, 255),
            syntax_string: Rgb::new(255, 220, 150),
            syntax_comment: Rgb::new(100, 150, 180),
            syntax_number: Rgb::new(180, 255, 220),
            syntax_function: Rgb::new(150, 220, 255),
            syntax_operator: Rgb::new(200, 230, 255),
        }
    }
}

/// All built-in palettes, in stable presentation order
pub fn all_palettes() -> Vec<Palette> {
    vec![
        Palette::default_dark(),
        Palette::blue_purple(),
        Palette::matrix_green(),
        Palette::crimson_red(),
        Palette::ocean_blue(),
    ]
}

/// Look up a palette by name (case-insensitive)
pub fn palette_by_name(name: &str) -> Option<Palette> {
    all_palettes()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_order() {
        let palettes = all_palettes();
        assert_eq!(palettes.len(), 5);
        assert_eq!(palettes[0].name, "Default Dark");
        assert_eq!(palettes[1].name, "Blue Purple");
        assert_eq!(palettes[2].name, "Matrix Green");
        assert_eq!(palettes[3].name, "Crimson Red");
        assert_eq!(palettes[4].name, "Ocean Blue");
    }

    #[test]
    fn test_names_unique() {
        let palettes = all_palettes();
        for (i, a) in palettes.iter().enumerate() {
            for b in &palettes[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let p = palette_by_name("matrix green").unwrap();
        assert_eq!(p.name, "Matrix Green");
        assert_eq!(p.accent, Rgb::new(0, 255, 65));

        assert!(palette_by_name("No Such Theme").is_none());
    }

    #[test]
    fn test_presets_differ() {
        assert_ne!(Palette::default_dark(), Palette::ocean_blue());
        assert_eq!(Palette::default_dark(), Palette::default_dark());
    }
}
