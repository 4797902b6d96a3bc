use super::AssetLocation;
use crate::animation::AnimationRequest;
use crate::skin::SkinRequest;
use std::path::Path;

/// What to load, and what to show once it is ready.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub atlas_path: String,
    pub skeleton_path: String,
    /// Directory or URL prefix both paths are resolved against.
    pub base_path: Option<String>,
    /// Multiplier applied to positions and sizes while parsing.
    pub scale: f32,
    pub initial_skin: Option<SkinRequest>,
    pub initial_animation: Option<AnimationRequest>,
}

impl LoadRequest {
    pub fn new(atlas_path: impl Into<String>, skeleton_path: impl Into<String>) -> Self {
        Self {
            atlas_path: atlas_path.into(),
            skeleton_path: skeleton_path.into(),
            base_path: None,
            scale: 1.0,
            initial_skin: None,
            initial_animation: None,
        }
    }

    /// Request for a skeleton whose atlas follows the `<name>-pma.atlas`
    /// naming convention.
    pub fn from_skeleton_file(skeleton_path: impl Into<String>) -> Self {
        let skeleton_path = skeleton_path.into();
        Self::new(atlas_name_for(&skeleton_path), skeleton_path)
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_skin(mut self, name: impl Into<String>) -> Self {
        self.initial_skin = Some(SkinRequest::Single(name.into()));
        self
    }

    pub fn with_skins<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_skin = Some(SkinRequest::Many(names.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_animation(mut self, animation: AnimationRequest) -> Self {
        self.initial_animation = Some(animation);
        self
    }

    pub fn atlas_location(&self) -> AssetLocation {
        AssetLocation::resolve(self.base_path.as_deref(), &self.atlas_path)
    }

    pub fn skeleton_location(&self) -> AssetLocation {
        AssetLocation::resolve(self.base_path.as_deref(), &self.skeleton_path)
    }
}

/// Derives the atlas file for a skeleton: the extension and a `-pro`/`-ess`
/// edition suffix are dropped, then `-pma.atlas` is appended. The directory
/// part is kept.
pub fn atlas_name_for(skeleton_path: &str) -> String {
    let path = Path::new(skeleton_path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem
        .strip_suffix("-pro")
        .or_else(|| stem.strip_suffix("-ess"))
        .unwrap_or(&stem);
    let file_name = format!("{stem}-pma.atlas");

    match skeleton_path.rfind('/') {
        Some(idx) => format!("{}/{}", &skeleton_path[..idx], file_name),
        None => file_name,
    }
}
