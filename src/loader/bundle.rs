use crate::model::{SkeletonData, TextureAtlas};
use std::sync::Arc;

/// A loaded atlas + skeleton pair. Immutable once built; shared by reference
/// with every runtime constructed from it.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub atlas: Arc<TextureAtlas>,
    pub skeleton_data: Arc<SkeletonData>,
}

impl AssetBundle {
    pub fn new(atlas: TextureAtlas, skeleton_data: SkeletonData) -> Self {
        Self {
            atlas: Arc::new(atlas),
            skeleton_data: Arc::new(skeleton_data),
        }
    }
}
