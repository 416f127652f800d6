use super::*;

/// Deals a uniformly random board: random categories, random items from each, randomly placed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomWordlistGenerator {
    seed: u64,
}

impl RandomWordlistGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl WordlistGenerator for RandomWordlistGenerator {
    fn generate(self, categories: &Categories, config: GameConfig) -> Result<Wordlist> {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        use rand::seq::SliceRandom;

        categories.validate(config)?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let items_per_group = usize::from(config.items_per_group);

        let mut chosen = categories.qualifying(config.items_per_group);
        chosen.shuffle(&mut rng);
        chosen.truncate(config.num_groups.into());

        let mut wordlist = Wordlist::with_capacity(config.board_size().into());
        for (category, items) in chosen {
            let mut items: Vec<&String> = items.iter().collect();
            items.shuffle(&mut rng);
            wordlist.extend(
                items
                    .into_iter()
                    .take(items_per_group)
                    .map(|item| WordEntry::new(item.as_str(), category)),
            );
        }
        wordlist.shuffle(&mut rng);

        log::debug!(
            "Dealt {} entries from {} categories",
            wordlist.len(),
            config.num_groups
        );
        Ok(wordlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::format;

    fn categories(count: usize, items: usize) -> Categories {
        (0..count)
            .map(|c| {
                let items: Vec<String> = (0..items).map(|i| format!("item-{c}-{i}")).collect();
                (format!("cat-{c}"), items)
            })
            .collect()
    }

    #[test]
    fn wordlist_fills_the_board_with_whole_groups() {
        let categories = categories(7, 9);
        let config = GameConfig::new_unchecked(4, 4);

        let wordlist = RandomWordlistGenerator::new(7)
            .generate(&categories, config)
            .unwrap();

        assert_eq!(wordlist.len(), usize::from(config.board_size()));

        let unique: BTreeSet<_> = wordlist.iter().map(|entry| &entry.item).collect();
        assert_eq!(unique.len(), wordlist.len());

        let mut per_category = BTreeMap::new();
        for entry in &wordlist {
            let items = categories.get(&entry.category).unwrap();
            assert!(items.contains(&entry.item));
            *per_category.entry(entry.category.as_str()).or_insert(0) += 1;
        }
        assert_eq!(per_category.len(), 4);
        assert!(per_category.values().all(|&count| count == 4));
    }

    #[test]
    fn only_large_enough_categories_are_dealt() {
        let mut categories = categories(2, 3);
        categories.insert("short", ["a", "b"]);

        let wordlist = RandomWordlistGenerator::new(3)
            .generate(&categories, GameConfig::new_unchecked(2, 3))
            .unwrap();

        assert!(wordlist.iter().all(|entry| entry.category != "short"));
    }

    #[test]
    fn same_seed_deals_same_board() {
        let categories = categories(6, 6);
        let config = GameConfig::new_unchecked(3, 3);

        let first = RandomWordlistGenerator::new(42).generate(&categories, config);
        let second = RandomWordlistGenerator::new(42).generate(&categories, config);

        assert_eq!(first, second);
    }

    #[test]
    fn not_enough_categories_aborts() {
        let categories = categories(2, 5);

        let result =
            RandomWordlistGenerator::new(1).generate(&categories, GameConfig::new_unchecked(3, 3));

        assert_eq!(
            result,
            Err(GameError::NotEnoughCategories {
                required: 3,
                min_items: 3,
                qualifying: 2,
            })
        );
    }
}
