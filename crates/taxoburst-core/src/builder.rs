use crate::csv::RawRecord;
use crate::model::{Category, FrameworkSet, Item, Subcategory, TaxonomyTree, item_id};
use crate::{Error, Result, TaxoburstConfig};
use indexmap::IndexMap;

const FALLBACK_COLOR: &str = "#888888";

#[derive(Debug, Clone)]
struct PendingItem {
    name: String,
    example: String,
    frameworks: FrameworkSet,
}

type Grouped = IndexMap<String, IndexMap<String, IndexMap<String, PendingItem>>>;

/// Groups flat records into the three-level tree.
///
/// Grouping keeps first-seen order at every level; nothing is sorted.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    palette: Vec<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::from_config(&TaxoburstConfig::defaults())
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TaxoburstConfig) -> Self {
        let palette = config
            .get_str_list("palette")
            .filter(|p| !p.is_empty())
            .or_else(|| TaxoburstConfig::defaults().get_str_list("palette"))
            .unwrap_or_default();
        Self { palette }
    }

    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        self.palette = palette;
        self
    }

    fn color_for(&self, category_index: usize) -> String {
        if self.palette.is_empty() {
            return FALLBACK_COLOR.to_string();
        }
        self.palette[category_index % self.palette.len()].clone()
    }

    pub fn build(&self, records: impl IntoIterator<Item = RawRecord>) -> Result<TaxonomyTree> {
        let mut grouped: Grouped = IndexMap::new();
        let mut dropped = 0usize;
        let mut duplicates = 0usize;

        for record in records {
            let (Some(category), Some(subcategory), Some(item)) =
                (record.category, record.subcategory, record.item)
            else {
                dropped += 1;
                continue;
            };

            let example = record
                .example
                .unwrap_or_else(|| format!("Example for {item}"));

            let items = grouped
                .entry(category)
                .or_default()
                .entry(subcategory)
                .or_default();
            if items.contains_key(&item) {
                duplicates += 1;
                tracing::debug!(item = %item, "duplicate taxonomy item ignored");
                continue;
            }
            items.insert(
                item.clone(),
                PendingItem {
                    name: item,
                    example,
                    frameworks: record.frameworks,
                },
            );
        }

        if dropped > 0 {
            tracing::debug!(dropped, "dropped records missing a category, subcategory or item");
        }

        let categories = grouped
            .into_iter()
            .enumerate()
            .map(|(idx, (category, subs))| {
                let subcategories = subs
                    .into_iter()
                    .map(|(subcategory, items)| {
                        let items = items
                            .into_values()
                            .enumerate()
                            .map(|(pos, pending)| Item {
                                id: item_id(&category, &subcategory, &pending.name),
                                category: category.clone(),
                                subcategory: subcategory.clone(),
                                name: pending.name,
                                number: pos + 1,
                                example: pending.example,
                                frameworks: pending.frameworks,
                            })
                            .collect::<Vec<_>>();
                        Subcategory::new(subcategory, items)
                    })
                    .collect::<Vec<_>>();
                Category::new(category, self.color_for(idx), subcategories)
            })
            .collect::<Vec<_>>();

        let tree = TaxonomyTree::new(categories);
        if tree.item_count == 0 {
            return Err(Error::DataEmpty);
        }

        tracing::debug!(
            categories = tree.categories.len(),
            items = tree.item_count,
            duplicates,
            "built taxonomy tree"
        );
        Ok(tree)
    }
}
