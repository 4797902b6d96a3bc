use crate::model::{SkeletonData, SkinCategory, SkinFragment};
use std::collections::BTreeMap;

// Checked in order; the first table whose keyword appears in the name wins.
const KEYWORDS: [(SkinCategory, &[&str]); 5] = [
    (SkinCategory::Body, &["body", "skin-base", "base"]),
    (SkinCategory::Face, &["face", "eye", "nose", "mouth", "brow", "lip"]),
    (SkinCategory::Hair, &["hair", "beard"]),
    (
        SkinCategory::Clothing,
        &["cloth", "shirt", "pant", "dress", "hoodie", "jacket", "shoe", "skirt"],
    ),
    (
        SkinCategory::Accessory,
        &["accessor", "hat", "glasses", "bag", "ring", "necklace"],
    ),
];

fn match_keywords(text: &str) -> Option<SkinCategory> {
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(category, _)| *category)
}

/// Category guessed from a fragment name. The group before the first `/` is
/// tried first (`clothes/body-suit` is clothing), then the whole name.
pub fn infer_category(name: &str) -> SkinCategory {
    let name = name.to_ascii_lowercase();
    let group = name.split('/').next().unwrap_or_default();
    match_keywords(group)
        .or_else(|| match_keywords(&name))
        .unwrap_or(SkinCategory::Other)
}

/// Explicit tag when the asset carries one, otherwise the inferred category.
pub fn category_of(fragment: &SkinFragment) -> SkinCategory {
    fragment
        .category
        .unwrap_or_else(|| infer_category(&fragment.name))
}

/// Selectable fragments grouped by category, definition order inside a group.
pub fn bucket_fragments(data: &SkeletonData) -> BTreeMap<SkinCategory, Vec<String>> {
    let mut buckets: BTreeMap<SkinCategory, Vec<String>> = BTreeMap::new();
    for fragment in &data.skins {
        buckets
            .entry(category_of(fragment))
            .or_default()
            .push(fragment.name.clone());
    }
    buckets
}

/// Stable reorder into Body, Face, Hair, Clothing, Accessory, Other. Unknown
/// names are treated as `Other` and kept so the composer can report them.
pub fn order_by_category<S: AsRef<str>>(data: &SkeletonData, names: &[S]) -> Vec<String> {
    let mut ordered: Vec<(SkinCategory, &str)> = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let category = data
                .find_skin(name)
                .map(category_of)
                .unwrap_or(SkinCategory::Other);
            (category, name)
        })
        .collect();
    ordered.sort_by_key(|(category, _)| *category);
    ordered.into_iter().map(|(_, name)| name.to_string()).collect()
}
