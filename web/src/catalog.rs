use groupgame_core::Categories;
use serde::Deserialize;

const BUILTIN: &str = include_str!("categories.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Categories,
}

/// Categories shipped with the app.
///
/// A broken catalog yields no categories at all, which the game reports as a setup error.
pub(crate) fn builtin() -> Categories {
    match toml::from_str::<CatalogFile>(BUILTIN) {
        Ok(file) => {
            log::debug!("loaded {} categories", file.categories.len());
            file.categories
        }
        Err(err) => {
            log::error!("could not parse category catalog: {}", err);
            Categories::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SIZE_CHOICES;
    use groupgame_core::GameConfig;
    use std::collections::BTreeSet;

    #[test]
    fn builtin_catalog_supports_every_offered_size() {
        let categories = builtin();

        for &size in SIZE_CHOICES {
            let config = GameConfig::square(size).unwrap();
            assert_eq!(categories.validate(config), Ok(()), "size {size}");
        }
    }

    #[test]
    fn builtin_items_are_unique_across_categories() {
        let categories = builtin();
        let mut seen = BTreeSet::new();

        for (name, items) in categories.iter() {
            for item in items {
                assert!(seen.insert(item.as_str()), "{item} repeated in {name}");
            }
        }
    }
}
