use super::{AnimationClip, BoneData, SkinFragment, SlotData};
use serde::{Deserialize, Serialize};

/// Parsed, read-only skeleton definition. Never mutated once loading completes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkeletonData {
    pub name: String,
    pub bones: Vec<BoneData>,
    pub slots: Vec<SlotData>,
    pub default_skin: Option<SkinFragment>,
    pub skins: Vec<SkinFragment>, // definition order, without the default skin
    pub animations: Vec<AnimationClip>,
}

impl SkeletonData {
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    pub fn find_slot(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.name == name)
    }

    /// Looks up a fragment by name, the default skin included.
    pub fn find_skin(&self, name: &str) -> Option<&SkinFragment> {
        self.skins
            .iter()
            .find(|s| s.name == name)
            .or_else(|| self.default_skin.as_ref().filter(|s| s.name == name))
    }

    pub fn find_animation(&self, name: &str) -> Option<&AnimationClip> {
        self.animations.iter().find(|a| a.name == name)
    }

    pub fn skin_names(&self) -> Vec<String> {
        self.skins.iter().map(|s| s.name.clone()).collect()
    }

    pub fn animation_names(&self) -> Vec<String> {
        self.animations.iter().map(|a| a.name.clone()).collect()
    }

    /// Adds a fragment, routing one named `default` to the default slot.
    pub fn push_skin(&mut self, skin: SkinFragment) {
        if skin.is_default() {
            self.default_skin = Some(skin);
        } else {
            self.skins.push(skin);
        }
    }

    pub(crate) fn all_skins_mut(&mut self) -> impl Iterator<Item = &mut SkinFragment> {
        self.default_skin.iter_mut().chain(self.skins.iter_mut())
    }
}
