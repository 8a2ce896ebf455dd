/// A named cycle of fill colours, indexed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

const PALETTES: [Palette; 8] = [
    Palette {
        name: "default",
        colors: &[
            "#a2b9bc", "#b2ad7f", "#878f99", "#6b5b95", "#d6cbd3", "#eca1a6", "#bdcebe",
            "#82b74b", "#405d27",
        ],
    },
    Palette {
        name: "blues",
        colors: &["#011f4b", "#03396c", "#005b96", "#6497b1", "#b3cde0"],
    },
    Palette {
        name: "greys",
        colors: &["#999999", "#777777", "#555555", "#333333", "#111111"],
    },
    Palette {
        name: "pinks",
        colors: &["#ff00a9", "#fb9f9f", "#ff0065", "#ffbfd3", "#fb5858"],
    },
    Palette {
        name: "metro",
        colors: &["#d11141", "#00b159", "#00aedb", "#f37735", "#ffc425"],
    },
    Palette {
        name: "pastel",
        colors: &["#ffb3ba", "#ffdfba", "#ffffba", "#baffc9", "#bae1ff"],
    },
    Palette {
        name: "neon",
        colors: &["#fe0000", "#fdfe02", "#0bff01", "#011efe", "#fe00f6"],
    },
    Palette {
        name: "seafoam",
        colors: &["#a3c1ad", "#a0d6b4", "#5f9ea0", "#317873", "#49796b"],
    },
];

impl Palette {
    pub fn named(name: &str) -> Option<Palette> {
        PALETTES
            .iter()
            .copied()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        PALETTES.iter().map(|p| p.name)
    }

    /// Colour of path `index`, cycling through the palette.
    pub fn color(&self, index: usize) -> &'static str {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        PALETTES[0]
    }
}
