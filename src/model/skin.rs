use super::RegionAttachment;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Name of the fragment whose attachments stay visible under every composition.
pub const DEFAULT_SKIN_NAME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkinCategory {
    Body,
    Face,
    Hair,
    Clothing,
    Accessory,
    Other,
}

impl SkinCategory {
    pub const ALL: [SkinCategory; 6] = [
        SkinCategory::Body,
        SkinCategory::Face,
        SkinCategory::Hair,
        SkinCategory::Clothing,
        SkinCategory::Accessory,
        SkinCategory::Other,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "body" => Some(Self::Body),
            "face" => Some(Self::Face),
            "hair" => Some(Self::Hair),
            "clothing" => Some(Self::Clothing),
            "accessory" => Some(Self::Accessory),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Face => "face",
            Self::Hair => "hair",
            Self::Clothing => "clothing",
            Self::Accessory => "accessory",
            Self::Other => "other",
        }
    }
}

/// Named, immutable set of attachments keyed by `(slot index, attachment name)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkinFragment {
    pub name: String,
    /// Explicit category tag stored with the asset, if any.
    pub category: Option<SkinCategory>,
    attachments: BTreeMap<(usize, String), RegionAttachment>,
}

impl SkinFragment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            attachments: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: SkinCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn set_attachment(&mut self, slot: usize, name: impl Into<String>, attachment: RegionAttachment) {
        self.attachments.insert((slot, name.into()), attachment);
    }

    pub fn attachment(&self, slot: usize, name: &str) -> Option<&RegionAttachment> {
        self.attachments.get(&(slot, name.to_string()))
    }

    pub fn attachments(&self) -> impl Iterator<Item = (usize, &str, &RegionAttachment)> {
        self.attachments
            .iter()
            .map(|((slot, name), attachment)| (*slot, name.as_str(), attachment))
    }

    pub(crate) fn attachments_mut(&mut self) -> impl Iterator<Item = &mut RegionAttachment> {
        self.attachments.values_mut()
    }

    /// Slots this fragment places at least one attachment in.
    pub fn slots(&self) -> BTreeSet<usize> {
        self.attachments.keys().map(|(slot, _)| *slot).collect()
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SKIN_NAME
    }
}
