use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::*;

/// A tile on the board: the items merged into it so far and how it should be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    origin: Coord2,
    category: String,
    cluster: Vec<String>,
    display: TileDisplay,
    disabled: bool,
    color: Option<CategoryColor>,
}

impl Tile {
    /// Fresh tile holding a single item.
    pub fn new(origin: Coord2, entry: &WordEntry, items_per_group: Coord) -> Self {
        let mut tile = Self {
            origin,
            category: entry.category.clone(),
            cluster: vec![entry.item.clone()],
            display: TileDisplay::Single(entry.item.clone()),
            disabled: false,
            color: None,
        };
        // single item groups start out complete
        if items_per_group <= 1 {
            tile.finish();
        }
        tile
    }

    /// Rebuilds a tile from persisted attributes, the display is derived again from the cluster.
    pub fn restore(
        origin: Coord2,
        category: String,
        cluster: Vec<String>,
        disabled: bool,
        color: Option<CategoryColor>,
    ) -> Self {
        let display = TileDisplay::derive(&category, &cluster, disabled);
        Self {
            origin,
            category,
            cluster,
            display,
            disabled,
            color,
        }
    }

    pub fn origin(&self) -> Coord2 {
        self.origin
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn cluster(&self) -> &[String] {
        &self.cluster
    }

    pub fn display(&self) -> &TileDisplay {
        &self.display
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn color(&self) -> Option<CategoryColor> {
        self.color
    }

    pub(crate) fn into_cluster(self) -> Vec<String> {
        self.cluster
    }

    /// Appends `other` after this tile's own items, returns whether the group is now complete.
    pub(crate) fn absorb(&mut self, other: Vec<String>, items_per_group: Coord) -> bool {
        self.cluster.extend(other);
        if self.cluster.len() >= usize::from(items_per_group) {
            self.finish();
        } else {
            self.display = TileDisplay::derive(&self.category, &self.cluster, false);
        }
        self.disabled
    }

    fn finish(&mut self) {
        self.disabled = true;
        self.color = Some(CategoryColor::from_category(&self.category));
        self.display = TileDisplay::derive(&self.category, &self.cluster, true);
    }
}

/// What a tile shows, independent of how it gets rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileDisplay {
    Single(String),
    Pair(String, String),
    /// First two items and the total count, with every item in the tooltip.
    Elided {
        first: String,
        second: String,
        count: usize,
        tooltip: String,
    },
    /// Completed group, labeled with the category name.
    Finished {
        category: String,
        tooltip: Option<String>,
    },
}

impl TileDisplay {
    pub fn derive(category: &str, cluster: &[String], finished: bool) -> Self {
        let tooltip = (cluster.len() > 2).then(|| cluster.join("\n"));
        if finished {
            return Self::Finished {
                category: category.to_string(),
                tooltip,
            };
        }
        match (cluster, tooltip) {
            ([first, second], _) => Self::Pair(first.clone(), second.clone()),
            ([first, second, ..], Some(tooltip)) => Self::Elided {
                first: first.clone(),
                second: second.clone(),
                count: cluster.len(),
                tooltip,
            },
            ([only], _) => Self::Single(only.clone()),
            _ => Self::Single(String::new()),
        }
    }

    /// Plain text label.
    pub fn label(&self) -> String {
        match self {
            Self::Single(item) => item.clone(),
            Self::Pair(first, second) => format!("{first}; {second}"),
            Self::Elided {
                first,
                second,
                count,
                ..
            } => format!("{first}, {second}, ... [{count}]"),
            Self::Finished { category, .. } => category.clone(),
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Self::Elided { tooltip, .. } => Some(tooltip),
            Self::Finished { tooltip, .. } => tooltip.as_deref(),
            Self::Single(_) | Self::Pair(..) => None,
        }
    }

    /// HTML label as stored in the `innerHTML` field of saved games.
    pub fn markup(&self) -> String {
        match self {
            Self::Single(item) => escape_html(item),
            Self::Pair(first, second) => {
                format!("<b>{}; {}</b>", escape_html(first), escape_html(second))
            }
            Self::Elided {
                first,
                second,
                count,
                ..
            } => format!(
                "<b>{}, {}, ... <span class=\"red\">[{count}]</span></b>",
                escape_html(first),
                escape_html(second)
            ),
            Self::Finished { category, .. } => format!("<b>{}</b>", escape_html(category)),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Muted HSL color that always comes out the same for the same category name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CategoryColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl CategoryColor {
    pub fn from_category(name: &str) -> Self {
        // unit + (hash << 5) - hash over UTF-16 units, only the shift wraps to 32 bits
        let hash = name.encode_utf16().fold(0i64, |hash, unit| {
            let shifted = i64::from((hash as i32).wrapping_shl(5));
            i64::from(unit) + shifted - hash
        });
        let hash = hash.unsigned_abs();

        Self {
            hue: (hash % 360) as u16,
            saturation: 45 + (hash % 20) as u8,
            lightness: 35 + (hash % 15) as u8,
        }
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl FromStr for CategoryColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_string());
        let inner = s
            .trim()
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let mut parts = inner.split(',').map(str::trim);
        let hue = parts.next().and_then(|p| p.parse().ok());
        let saturation = parts
            .next()
            .and_then(|p| p.strip_suffix('%'))
            .and_then(|p| p.parse().ok());
        let lightness = parts
            .next()
            .and_then(|p| p.strip_suffix('%'))
            .and_then(|p| p.parse().ok());

        match (hue, saturation, lightness, parts.next()) {
            (Some(hue), Some(saturation), Some(lightness), None) => Ok(Self {
                hue,
                saturation,
                lightness,
            }),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn display_follows_cluster_size() {
        let pair = TileDisplay::derive("Birds", &strings(&["owl", "wren"]), false);
        assert_eq!(pair.label(), "owl; wren");
        assert_eq!(pair.tooltip(), None);

        let elided = TileDisplay::derive("Birds", &strings(&["owl", "wren", "crow"]), false);
        assert_eq!(elided.label(), "owl, wren, ... [3]");
        assert_eq!(elided.tooltip(), Some("owl\nwren\ncrow"));

        let finished = TileDisplay::derive("Birds", &strings(&["owl", "wren", "crow"]), true);
        assert_eq!(finished.label(), "Birds");
        assert_eq!(finished.tooltip(), Some("owl\nwren\ncrow"));
    }

    #[test]
    fn markup_matches_saved_game_labels() {
        let elided = TileDisplay::derive("Birds", &strings(&["a<b", "wren", "crow"]), false);

        assert_eq!(
            elided.markup(),
            "<b>a&lt;b, wren, ... <span class=\"red\">[3]</span></b>"
        );
        assert_eq!(TileDisplay::Single("owl".into()).markup(), "owl");
    }

    #[test]
    fn absorb_prepends_survivor_items_and_finishes_group() {
        let mut tile = Tile::new((0, 0), &WordEntry::new("owl", "Birds"), 3);

        assert!(!tile.absorb(strings(&["wren"]), 3));
        assert_eq!(tile.cluster(), ["owl", "wren"]);
        assert!(!tile.is_disabled());

        assert!(tile.absorb(strings(&["crow"]), 3));
        assert_eq!(tile.cluster(), ["owl", "wren", "crow"]);
        assert!(tile.is_disabled());
        assert_eq!(tile.color(), Some(CategoryColor::from_category("Birds")));
        assert_eq!(tile.display().label(), "Birds");
    }

    #[test]
    fn single_item_groups_start_finished() {
        let tile = Tile::new((1, 0), &WordEntry::new("owl", "Birds"), 1);

        assert!(tile.is_disabled());
    }

    #[test]
    fn color_is_stable_and_in_range() {
        for name in ["", "Birds", "Famous Physicists", "Ünïcödé ☃ names"] {
            let color = CategoryColor::from_category(name);
            assert_eq!(color, CategoryColor::from_category(name));
            assert!(color.hue < 360);
            assert!((45..65).contains(&color.saturation));
            assert!((35..50).contains(&color.lightness));
        }
        assert_eq!(CategoryColor::from_category("").to_string(), "hsl(0, 45%, 35%)");
    }

    #[test]
    fn color_hash_matches_reference_values() {
        // "ab": 97, then 98 + (97 << 5) - 97 = 3105
        let color = CategoryColor::from_category("ab");

        assert_eq!(color.hue, (3105 % 360) as u16);
        assert_eq!(color.saturation, 45 + (3105 % 20) as u8);
        assert_eq!(color.lightness, 35 + (3105 % 15) as u8);
    }

    #[test]
    fn color_parses_its_own_output() {
        let color = CategoryColor::from_category("Metals");

        assert_eq!(color.to_string().parse::<CategoryColor>(), Ok(color));
        assert_eq!(
            "hsl(10, 50%, 40%)".parse::<CategoryColor>(),
            Ok(CategoryColor {
                hue: 10,
                saturation: 50,
                lightness: 40,
            })
        );
        assert!("rgb(1, 2, 3)".parse::<CategoryColor>().is_err());
        assert!("hsl(1, 2%, 3%, 4%)".parse::<CategoryColor>().is_err());
    }
}
