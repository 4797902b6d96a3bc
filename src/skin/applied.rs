use crate::model::{RegionAttachment, SkinFragment};
use std::collections::BTreeMap;

/// Aggregate of one or more fragments, built fresh for every composition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppliedSkin {
    fragments: Vec<String>,
    attachments: BTreeMap<(usize, String), RegionAttachment>,
}

impl AppliedSkin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `fragment` on top of what is already there. Every slot the
    /// fragment touches is taken over entirely, so an earlier fragment's
    /// attachments in that slot do not linger under other names.
    pub fn merge(&mut self, fragment: &SkinFragment) {
        let slots = fragment.slots();
        self.attachments.retain(|(slot, _), _| !slots.contains(slot));
        for (slot, name, attachment) in fragment.attachments() {
            self.attachments
                .insert((slot, name.to_string()), attachment.clone());
        }

        self.fragments.retain(|name| *name != fragment.name);
        self.fragments.push(fragment.name.clone());
    }

    /// Merged fragment names, in the order they took effect.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn attachment(&self, slot: usize, name: &str) -> Option<&RegionAttachment> {
        self.attachments.get(&(slot, name.to_string()))
    }

    pub fn attachments(&self) -> impl Iterator<Item = (usize, &str, &RegionAttachment)> {
        self.attachments
            .iter()
            .map(|((slot, name), attachment)| (*slot, name.as_str(), attachment))
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(name: &str, entries: &[(usize, &str)]) -> SkinFragment {
        let mut fragment = SkinFragment::new(name);
        for &(slot, key) in entries {
            fragment.set_attachment(slot, key, RegionAttachment::new(format!("{name}/{key}"), 1.0, 1.0));
        }
        fragment
    }

    #[test]
    fn later_fragment_takes_over_contested_slots() {
        let mut skin = AppliedSkin::new();
        skin.merge(&fragment("a", &[(0, "torso"), (1, "arm")]));
        skin.merge(&fragment("b", &[(0, "torso-alt")]));

        assert!(skin.attachment(0, "torso").is_none());
        assert_eq!(skin.attachment(0, "torso-alt").unwrap().path, "b/torso-alt");
        assert_eq!(skin.attachment(1, "arm").unwrap().path, "a/arm");
        assert_eq!(skin.fragments(), ["a", "b"]);
    }

    #[test]
    fn repeated_fragment_moves_to_the_end() {
        let mut skin = AppliedSkin::new();
        let a = fragment("a", &[(0, "torso")]);
        skin.merge(&a);
        skin.merge(&fragment("b", &[(0, "torso")]));
        skin.merge(&a);

        assert_eq!(skin.fragments(), ["b", "a"]);
        assert_eq!(skin.attachment(0, "torso").unwrap().path, "a/torso");
        assert_eq!(skin.len(), 1);
    }
}
