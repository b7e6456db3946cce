//! Category → subcategory → record identifier grouping.

use std::collections::BTreeMap;

use worldmap_records_models::{MarkerRecord, RecordId, ShapeRecord};

/// Two-level grouping of marker and shape identifiers.
///
/// Keys are kept sorted so the generated script is stable across runs.
/// Identifier lists keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    entries: BTreeMap<String, BTreeMap<String, Vec<RecordId>>>,
}

impl CategoryIndex {
    /// Builds the index from classified collections, markers first.
    #[must_use]
    pub fn build(markers: &[MarkerRecord], shapes: &[ShapeRecord]) -> Self {
        let mut index = Self::default();
        for (i, marker) in markers.iter().enumerate() {
            index.insert(
                &marker.details.category,
                &marker.details.subcategory,
                RecordId::Marker(i),
            );
        }
        for (i, shape) in shapes.iter().enumerate() {
            index.insert(
                &shape.details.category,
                &shape.details.subcategory,
                RecordId::Shape(i),
            );
        }
        index
    }

    /// Appends `id` under `[category][subcategory]`.
    pub fn insert(&mut self, category: &str, subcategory: &str, id: RecordId) {
        self.entries
            .entry(category.to_string())
            .or_default()
            .entry(subcategory.to_string())
            .or_default()
            .push(id);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates categories with their subcategory groups.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<RecordId>>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Identifiers filed under a single `[category][subcategory]` pair.
    #[must_use]
    pub fn members(&self, category: &str, subcategory: &str) -> &[RecordId] {
        self.entries
            .get(category)
            .and_then(|subs| subs.get(subcategory))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Union of every subcategory's members under `category`.
    #[must_use]
    pub fn category_members(&self, category: &str) -> Vec<RecordId> {
        self.entries
            .get(category)
            .map(|subs| subs.values().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Distinct subcategory names with their members and owning categories.
    ///
    /// A subcategory name that appears under more than one category is
    /// reported once, with members concatenated in category order.
    #[must_use]
    pub fn subcategories(&self) -> Vec<SubcategoryGroup<'_>> {
        let mut groups: BTreeMap<&str, SubcategoryGroup<'_>> = BTreeMap::new();
        for (category, subs) in &self.entries {
            for (name, ids) in subs {
                let group = groups.entry(name.as_str()).or_insert_with(|| SubcategoryGroup {
                    name,
                    categories: Vec::new(),
                    members: Vec::new(),
                });
                group.categories.push(category);
                group.members.extend(ids.iter().copied());
            }
        }
        groups.into_values().collect()
    }

    /// Every `(category, subcategory)` pair that lists `id`.
    #[must_use]
    pub fn locate(&self, id: RecordId) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .flat_map(move |(category, subs)| {
                subs.iter()
                    .filter(move |(_, ids)| ids.contains(&id))
                    .map(move |(sub, _)| (category.as_str(), sub.as_str()))
            })
            .collect()
    }
}

/// One subcategory across all categories that use its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryGroup<'a> {
    pub name: &'a str,
    pub categories: Vec<&'a str>,
    pub members: Vec<RecordId>,
}
