use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named categories, each with the candidate items a game can draw from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categories {
    entries: BTreeMap<String, Vec<String>>,
}

impl Categories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<N, I, T>(&mut self, name: N, items: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.entries
            .insert(name.into(), items.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn item_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter().map(|(name, items)| (name, items.len()))
    }

    /// Categories with at least `min_items` items.
    pub fn qualifying(&self, min_items: Coord) -> Vec<(&str, &[String])> {
        self.iter()
            .filter(|(_, items)| items.len() >= usize::from(min_items))
            .collect()
    }

    /// Checks that enough categories are large enough to deal a board for `config`.
    pub fn validate(&self, config: GameConfig) -> Result<()> {
        let qualifying = self.qualifying(config.items_per_group).len();
        if qualifying < usize::from(config.num_groups) {
            return Err(GameError::NotEnoughCategories {
                required: config.num_groups,
                min_items: config.items_per_group,
                qualifying,
            });
        }
        Ok(())
    }
}

impl<N, I, T> FromIterator<(N, I)> for Categories
where
    N: Into<String>,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    fn from_iter<It: IntoIterator<Item = (N, I)>>(iter: It) -> Self {
        let mut categories = Self::new();
        for (name, items) in iter {
            categories.insert(name, items);
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> Categories {
        Categories::from_iter([
            ("Birds", vec!["crow", "wren", "owl"]),
            ("Trees", vec!["oak", "ash"]),
            ("Metals", vec!["iron", "tin", "gold", "lead"]),
        ])
    }

    #[test]
    fn qualifying_filters_by_item_count() {
        let categories = sample();

        let names: Vec<_> = categories
            .qualifying(3)
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(names, ["Birds", "Metals"]);
        assert_eq!(categories.qualifying(2).len(), 3);
    }

    #[test]
    fn validate_reports_qualifying_count() {
        let categories = sample();

        assert_eq!(categories.validate(GameConfig::new_unchecked(2, 3)), Ok(()));
        assert_eq!(
            categories.validate(GameConfig::new_unchecked(3, 3)),
            Err(GameError::NotEnoughCategories {
                required: 3,
                min_items: 3,
                qualifying: 2,
            })
        );
    }

    #[test]
    fn item_counts_lists_every_category() {
        let categories = sample();
        let counts: Vec<_> = categories.item_counts().collect();

        assert_eq!(counts, [("Birds", 3), ("Metals", 4), ("Trees", 2)]);
    }

    #[test]
    fn deserializes_from_plain_map() {
        let categories: Categories =
            serde_json::from_str(r#"{"Trees": ["oak", "ash"], "Birds": ["owl"]}"#).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories.get("Trees").unwrap(), ["oak", "ash"]);
    }
}
