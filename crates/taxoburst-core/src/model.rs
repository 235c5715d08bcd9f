//! Immutable taxonomy tree: Category → Subcategory → Item.
//!
//! Trees are built once per data load and never mutated afterwards; layout state lives in the
//! render crate, keyed by [`NodeKey`].

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

/// External standards an item may be tagged with, in CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Framework {
    EuAiAct,
    NistAiRmf,
    Iso42001,
    OwaspLlmTop10,
    MitreAtlas,
}

impl Framework {
    pub const COUNT: usize = 5;

    pub const ALL: [Framework; Self::COUNT] = [
        Self::EuAiAct,
        Self::NistAiRmf,
        Self::Iso42001,
        Self::OwaspLlmTop10,
        Self::MitreAtlas,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::EuAiAct => "EU AI Act",
            Self::NistAiRmf => "NIST AI RMF",
            Self::Iso42001 => "ISO/IEC 42001",
            Self::OwaspLlmTop10 => "OWASP LLM Top 10",
            Self::MitreAtlas => "MITRE ATLAS",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(label))
    }
}

impl Serialize for Framework {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FrameworkSet(u8);

impl FrameworkSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, framework: Framework) {
        self.0 |= 1 << framework.index();
    }

    pub fn contains(&self, framework: Framework) -> bool {
        self.0 & (1 << framework.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Framework> + '_ {
        Framework::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<Framework> for FrameworkSet {
    fn from_iter<T: IntoIterator<Item = Framework>>(iter: T) -> Self {
        let mut set = Self::empty();
        for f in iter {
            set.insert(f);
        }
        set
    }
}

impl Serialize for FrameworkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for f in self.iter() {
            seq.serialize_element(f.label())?;
        }
        seq.end()
    }
}

/// Share of items supporting each framework, as integer percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coverage([u8; Framework::COUNT]);

impl Coverage {
    /// `round(100 * supported / total)` per framework; all zeros for an empty item set.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut supported = [0usize; Framework::COUNT];
        let mut total = 0usize;
        for item in items {
            total += 1;
            for f in item.frameworks.iter() {
                supported[f.index()] += 1;
            }
        }

        let mut out = [0u8; Framework::COUNT];
        if total == 0 {
            return Self(out);
        }
        for (slot, count) in out.iter_mut().zip(supported) {
            let pct = (100.0 * count as f64 / total as f64).round();
            *slot = pct.clamp(0.0, 100.0) as u8;
        }
        Self(out)
    }

    pub fn get(&self, framework: Framework) -> u8 {
        self.0[framework.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Framework, u8)> + '_ {
        Framework::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

impl Serialize for Coverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Framework::COUNT))?;
        for (f, pct) in self.iter() {
            map.serialize_entry(f.label(), &pct)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: String,
    pub category: String,
    pub subcategory: String,
    pub name: String,
    /// 1-based position within the parent subcategory.
    pub number: usize,
    pub example: String,
    pub frameworks: FrameworkSet,
}

impl Item {
    pub fn key(&self) -> NodeKey {
        NodeKey::Item {
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            item: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subcategory {
    pub name: String,
    pub items: Vec<Item>,
    pub coverage: Coverage,
}

impl Subcategory {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        let coverage = Coverage::from_items(&items);
        Self {
            name: name.into(),
            items,
            coverage,
        }
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub color: String,
    pub subcategories: Vec<Subcategory>,
    pub coverage: Coverage,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>, subcategories: Vec<Subcategory>) -> Self {
        let coverage = Coverage::from_items(subcategories.iter().flat_map(|s| s.items.iter()));
        Self {
            name: name.into(),
            color: color.into(),
            subcategories,
            coverage,
        }
    }

    pub fn subcategory(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.name == name)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.subcategories.iter().flat_map(|s| s.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.subcategories.iter().map(|s| s.items.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyTree {
    pub categories: Vec<Category>,
    pub item_count: usize,
    pub coverage: Coverage,
}

impl TaxonomyTree {
    pub fn new(categories: Vec<Category>) -> Self {
        let item_count = categories.iter().map(Category::item_count).sum();
        let coverage = Coverage::from_items(categories.iter().flat_map(Category::items));
        Self {
            categories,
            item_count,
            coverage,
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.categories.iter().flat_map(Category::items)
    }

    /// Looks a node up by structural identity.
    pub fn resolve(&self, key: &NodeKey) -> Option<NodeRef<'_>> {
        match key {
            NodeKey::Root => Some(NodeRef::Root(self)),
            NodeKey::Category { category } => self.category(category).map(NodeRef::Category),
            NodeKey::Subcategory {
                category,
                subcategory,
            } => {
                let c = self.category(category)?;
                let s = c.subcategory(subcategory)?;
                Some(NodeRef::Subcategory(c, s))
            }
            NodeKey::Item {
                category,
                subcategory,
                item,
            } => {
                let c = self.category(category)?;
                let s = c.subcategory(subcategory)?;
                let i = s.item(item)?;
                Some(NodeRef::Item(c, s, i))
            }
        }
    }
}

/// Borrowed view of one node together with its ancestors.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Root(&'a TaxonomyTree),
    Category(&'a Category),
    Subcategory(&'a Category, &'a Subcategory),
    Item(&'a Category, &'a Subcategory, &'a Item),
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Root(_) => "",
            Self::Category(c) => &c.name,
            Self::Subcategory(_, s) => &s.name,
            Self::Item(_, _, i) => &i.name,
        }
    }

    pub fn category(&self) -> Option<&'a Category> {
        match self {
            Self::Root(_) => None,
            Self::Category(c) | Self::Subcategory(c, _) | Self::Item(c, _, _) => Some(c),
        }
    }
}

/// Structural identity of a node: names along its ancestry path.
///
/// Two keys compare equal across tree rebuilds as long as the names are unchanged, which is what
/// selection toggling relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKey {
    Root,
    Category {
        category: String,
    },
    Subcategory {
        category: String,
        subcategory: String,
    },
    Item {
        category: String,
        subcategory: String,
        item: String,
    },
}

impl NodeKey {
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category {
            category: name.into(),
        }
    }

    pub fn subcategory(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self::Subcategory {
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }

    pub fn item(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self::Item {
            category: category.into(),
            subcategory: subcategory.into(),
            item: item.into(),
        }
    }

    /// Parses `Category`, `Category/Subcategory` or `Category/Subcategory/Item`.
    pub fn from_path(path: &str) -> Option<Self> {
        let parts = path
            .split('/')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        match parts.as_slice() {
            [] => None,
            [c] => Some(Self::category(*c)),
            [c, s] => Some(Self::subcategory(*c, *s)),
            [c, s, i] => Some(Self::item(*c, *s, *i)),
            _ => None,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Root => 0,
            Self::Category { .. } => 1,
            Self::Subcategory { .. } => 2,
            Self::Item { .. } => 3,
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Category { category }
            | Self::Subcategory { category, .. }
            | Self::Item { category, .. } => Some(category),
        }
    }

    pub fn subcategory_name(&self) -> Option<&str> {
        match self {
            Self::Subcategory { subcategory, .. } | Self::Item { subcategory, .. } => {
                Some(subcategory)
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Root => "",
            Self::Category { category } => category,
            Self::Subcategory { subcategory, .. } => subcategory,
            Self::Item { item, .. } => item,
        }
    }

    /// The depth-1 ancestor (or self, for a category key).
    pub fn category_key(&self) -> Option<NodeKey> {
        self.category_name().map(NodeKey::category)
    }

    /// True when `self` is `other` or one of its ancestors.
    pub fn is_ancestor_or_self_of(&self, other: &NodeKey) -> bool {
        match self {
            Self::Root => true,
            Self::Category { category } => other.category_name() == Some(category.as_str()),
            Self::Subcategory {
                category,
                subcategory,
            } => {
                other.category_name() == Some(category.as_str())
                    && other.subcategory_name() == Some(subcategory.as_str())
            }
            Self::Item { .. } => self == other,
        }
    }

    pub fn path_display(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Category { category } => category.clone(),
            Self::Subcategory {
                category,
                subcategory,
            } => format!("{category}/{subcategory}"),
            Self::Item {
                category,
                subcategory,
                item,
            } => format!("{category}/{subcategory}/{item}"),
        }
    }
}

/// Deterministic item identifier: names joined with `_`, every non-alphanumeric character
/// replaced by `_`.
pub fn item_id(category: &str, subcategory: &str, item: &str) -> String {
    let joined = format!("{category}_{subcategory}_{item}");
    joined
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .collect()
}
