//! Taxonomy aggregation.
//!
//! Produces the browsable facet listings (publishers, source names,
//! categories with nested subcategories, tags) by merging a curated
//! baseline vocabulary with the values actually observed on records.
//!
//! Membership is case-insensitive; the first-seen casing is what callers
//! get back. Every listing comes out sorted case-insensitively. The scan is
//! O(n) per call with no caching.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use shelfmark_domain::Record;

/// The curated baseline vocabulary, passed to the aggregator explicitly.
#[derive(Debug, Clone, Default)]
pub struct BaselineTaxonomy {
    categories: Vec<String>,
    subcategories: Vec<(String, Vec<String>)>,
    tags: Vec<String>,
}

impl BaselineTaxonomy {
    /// Build a baseline. Duplicate entries in the curated data are a
    /// data-entry defect and are dropped here (case-insensitively).
    pub fn new(
        categories: Vec<String>,
        subcategories: Vec<(String, Vec<String>)>,
        tags: Vec<String>,
    ) -> Self {
        let mut dedup_categories = FacetSet::default();
        for c in &categories {
            dedup_categories.insert(c);
        }
        let mut dedup_tags = FacetSet::default();
        for t in &tags {
            dedup_tags.insert(t);
        }
        let subcategories = subcategories
            .into_iter()
            .map(|(category, subs)| {
                let mut set = FacetSet::default();
                for s in &subs {
                    set.insert(s);
                }
                (category, set.values)
            })
            .collect();
        Self {
            categories: dedup_categories.values,
            subcategories,
            tags: dedup_tags.values,
        }
    }

    /// The curated vocabulary shipped with the catalog.
    pub fn curated() -> Self {
        Self::new(
            vec![
                "Programming".to_string(),
                "Software Engineering".to_string(),
                "Science".to_string(),
                "History".to_string(),
                "Fiction".to_string(),
                "Psychology".to_string(),
            ],
            vec![
                (
                    "Programming".to_string(),
                    vec![
                        "Rust".to_string(),
                        "JavaScript".to_string(),
                        "Python".to_string(),
                        "Databases".to_string(),
                        "Algorithms".to_string(),
                    ],
                ),
                (
                    "Software Engineering".to_string(),
                    vec![
                        "Architecture".to_string(),
                        "Testing".to_string(),
                        "Process".to_string(),
                    ],
                ),
                (
                    "Science".to_string(),
                    vec!["Physics".to_string(), "Biology".to_string()],
                ),
            ],
            vec![
                "classic".to_string(),
                "reference".to_string(),
                "series".to_string(),
                "borrowed".to_string(),
                "reread".to_string(),
                "paper".to_string(),
            ],
        )
    }
}

/// The aggregated facet listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taxonomy {
    pub publishers: Vec<String>,
    pub source_names: Vec<String>,
    pub categories: Vec<String>,
    pub subcategories_by_category: BTreeMap<String, Vec<String>>,
    pub tags: Vec<String>,
}

/// Merge the baseline vocabulary with values observed on `records`.
pub fn aggregate_taxonomy(baseline: &BaselineTaxonomy, records: &[Record]) -> Taxonomy {
    let mut publishers = FacetSet::default();
    let mut source_names = FacetSet::default();
    let mut categories = FacetSet::default();
    let mut tags = FacetSet::default();
    // Lowercased category key → (display casing, subcategory set). Grows
    // dynamically for observed categories outside the baseline.
    let mut subcategories: BTreeMap<String, (String, FacetSet)> = BTreeMap::new();

    for category in &baseline.categories {
        categories.insert(category);
        subcategories
            .entry(category.to_lowercase())
            .or_insert_with(|| (category.clone(), FacetSet::default()));
    }
    for (category, subs) in &baseline.subcategories {
        categories.insert(category);
        let entry = subcategories
            .entry(category.to_lowercase())
            .or_insert_with(|| (category.clone(), FacetSet::default()));
        for sub in subs {
            entry.1.insert(sub);
        }
    }
    for tag in &baseline.tags {
        tags.insert(tag);
    }

    for record in records {
        if let Some(publisher) = &record.publisher {
            publishers.insert(publisher);
        }
        for source in &record.sources {
            source_names.insert(&source.name);
        }
        for tag in &record.tags {
            tags.insert(tag);
        }

        // A record without a category must not create a bucket, and a
        // subcategory is only reachable through its category.
        let Some(category) = non_blank(&record.category) else {
            continue;
        };
        categories.insert(category);
        let entry = subcategories
            .entry(category.to_lowercase())
            .or_insert_with(|| (category.to_string(), FacetSet::default()));
        if let Some(subcategory) = non_blank(&record.subcategory) {
            entry.1.insert(subcategory);
        }
    }

    let mut by_category = BTreeMap::new();
    for (_, (display, subs)) in subcategories {
        by_category.insert(display, subs.into_sorted());
    }

    Taxonomy {
        publishers: publishers.into_sorted(),
        source_names: source_names.into_sorted(),
        categories: categories.into_sorted(),
        subcategories_by_category: by_category,
        tags: tags.into_sorted(),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A set of facet values: case-insensitive membership, first casing kept.
#[derive(Debug, Clone, Default)]
struct FacetSet {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl FacetSet {
    fn insert(&mut self, raw: &str) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }
        if self.seen.insert(value.to_lowercase()) {
            self.values.push(value.to_string());
        }
    }

    fn into_sorted(self) -> Vec<String> {
        let mut values = self.values;
        values.sort_by_key(|v| v.to_lowercase());
        values
    }
}
