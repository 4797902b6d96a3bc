use super::{Bounds, SkeletonInstance};
use crate::loader::AssetBundle;
use crate::model::{AnimationClip, SkeletonData, SkinFragment, TextureAtlas};
use std::sync::Arc;

/// Owns the single skeleton instance of a preview together with the bundle it
/// was built from.
#[derive(Debug, Clone)]
pub struct SkeletonRuntime {
    bundle: Arc<AssetBundle>,
    instance: SkeletonInstance,
}

impl SkeletonRuntime {
    /// Instantiates the bundle's skeleton in its setup pose, with no skin
    /// applied.
    pub fn construct(bundle: Arc<AssetBundle>) -> Self {
        let instance = SkeletonInstance::new(bundle.skeleton_data.clone());
        Self { bundle, instance }
    }

    pub fn bundle(&self) -> &Arc<AssetBundle> {
        &self.bundle
    }

    pub fn data(&self) -> &SkeletonData {
        &self.bundle.skeleton_data
    }

    pub fn atlas(&self) -> &TextureAtlas {
        &self.bundle.atlas
    }

    pub fn instance(&self) -> &SkeletonInstance {
        &self.instance
    }

    pub fn instance_mut(&mut self) -> &mut SkeletonInstance {
        &mut self.instance
    }

    pub fn reset_to_setup_pose(&mut self) {
        self.instance.reset_to_setup_pose();
    }

    pub fn recompute_world_transform(&mut self) {
        self.instance.recompute_world_transform();
    }

    /// Selectable fragments in definition order, `default` excluded.
    pub fn current_skins(&self) -> &[SkinFragment] {
        &self.bundle.skeleton_data.skins
    }

    /// Clips in definition order.
    pub fn current_animations(&self) -> &[AnimationClip] {
        &self.bundle.skeleton_data.animations
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.instance.bounds()
    }
}
