use crate::animation::TrackState;
use crate::error::PreviewError;
use crate::skin::Applied;
use serde::{Deserialize, Serialize};

/// Emitted once, right after the first composition on a freshly loaded asset.
/// Both lists keep the asset's definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReadyEvent {
    pub skin_fragment_names: Vec<String>,
    pub animation_clip_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewEvent {
    AssetReady(AssetReadyEvent),
    LoadFailed(String),
    SkinApplied(Applied),
    AnimationChanged(TrackState),
    CommandRejected(PreviewError),
}
