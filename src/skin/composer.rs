use super::{AppliedSkin, order_by_category};
use crate::error::PreviewError;
use crate::runtime::{Bounds, SkeletonRuntime};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// A skin change: one fragment by name, or an ordered list to compose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkinRequest {
    Single(String),
    Many(Vec<String>),
}

/// Result of a composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applied {
    /// Fragments merged into the new skin, in the order they took effect.
    pub fragments: Vec<String>,
    /// Requested names the skeleton does not define.
    pub skipped: Vec<String>,
    /// Bounds of the freshly posed skeleton. `None` until the world transform
    /// has been recomputed.
    pub bounds: Option<Bounds>,
}

impl Applied {
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Builds an [`AppliedSkin`] from fragment names and installs it on a runtime.
///
/// Every call is a full rebuild: a fresh aggregate is composed, the pose is
/// reset to setup, and the aggregate replaces whatever skin was applied.
/// The `stage_*` variants stop before the world-transform recompute so a tick
/// can fold it into its own single recompute.
pub struct SkinComposer;

impl SkinComposer {
    pub fn apply(runtime: &mut SkeletonRuntime, request: &SkinRequest) -> Result<Applied, PreviewError> {
        match request {
            SkinRequest::Single(name) => Self::apply_single(runtime, name),
            SkinRequest::Many(names) => Ok(Self::apply_many(runtime, names.as_slice())),
        }
    }

    /// Applies exactly one fragment. An unknown name is rejected and the
    /// current skin stays in place.
    pub fn apply_single(runtime: &mut SkeletonRuntime, name: &str) -> Result<Applied, PreviewError> {
        let applied = Self::stage_single(runtime, name)?;
        Ok(Self::finish(runtime, applied))
    }

    /// Composes `names` in order, later fragments winning contested slots.
    /// Unknown names are skipped; if none resolve the skeleton ends up bare.
    pub fn apply_many<S: AsRef<str>>(runtime: &mut SkeletonRuntime, names: &[S]) -> Applied {
        let applied = Self::stage_many(runtime, names);
        Self::finish(runtime, applied)
    }

    /// `apply_many` with the names reordered Body, Face, Hair, Clothing,
    /// Accessory, Other first.
    pub fn compose_by_category<S: AsRef<str>>(runtime: &mut SkeletonRuntime, names: &[S]) -> Applied {
        let ordered = order_by_category(runtime.data(), names);
        Self::apply_many(runtime, ordered.as_slice())
    }

    pub fn stage(runtime: &mut SkeletonRuntime, request: &SkinRequest) -> Result<Applied, PreviewError> {
        match request {
            SkinRequest::Single(name) => Self::stage_single(runtime, name),
            SkinRequest::Many(names) => Ok(Self::stage_many(runtime, names.as_slice())),
        }
    }

    pub fn stage_single(runtime: &mut SkeletonRuntime, name: &str) -> Result<Applied, PreviewError> {
        if runtime.data().find_skin(name).is_none() {
            warn!("Skin fragment '{}' not found, keeping current skin", name);
            return Err(PreviewError::FragmentNotFound(name.to_string()));
        }
        Ok(Self::stage_many(runtime, &[name]))
    }

    pub fn stage_many<S: AsRef<str>>(runtime: &mut SkeletonRuntime, names: &[S]) -> Applied {
        let mut skin = AppliedSkin::new();
        let mut skipped = Vec::new();

        for name in names {
            let name = name.as_ref();
            match runtime.data().find_skin(name) {
                Some(fragment) => skin.merge(fragment),
                None => {
                    warn!("Skipping unknown skin fragment '{}'", name);
                    skipped.push(name.to_string());
                }
            }
        }

        info!(
            "Applying skin [{}] ({} attachments)",
            skin.fragments().join(", "),
            skin.len()
        );
        let applied = Applied {
            fragments: skin.fragments().to_vec(),
            skipped,
            bounds: None,
        };

        let instance = runtime.instance_mut();
        instance.reset_to_setup_pose();
        instance.set_skin(skin);
        applied
    }

    fn finish(runtime: &mut SkeletonRuntime, mut applied: Applied) -> Applied {
        runtime.recompute_world_transform();
        applied.bounds = runtime.bounds();
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use std::sync::Arc;

    fn runtime() -> SkeletonRuntime {
        SkeletonRuntime::construct(Arc::new(demo::bundle().unwrap()))
    }

    #[test]
    fn single_unknown_name_keeps_previous_skin() {
        let mut runtime = runtime();
        SkinComposer::apply_single(&mut runtime, "hair/x").unwrap();

        let err = SkinComposer::apply_single(&mut runtime, "hair/none").unwrap_err();
        assert_eq!(err, PreviewError::FragmentNotFound("hair/none".into()));
        assert_eq!(runtime.instance().skin().unwrap().fragments(), ["hair/x"]);
    }

    #[test]
    fn stage_does_not_recompute() {
        let mut runtime = runtime();
        let revision = runtime.instance().world_revision();

        let staged = SkinComposer::stage_many(&mut runtime, &["body/a"]);
        assert_eq!(runtime.instance().world_revision(), revision);
        assert!(staged.bounds.is_none());

        let applied = SkinComposer::apply_many(&mut runtime, &["body/a"]);
        assert_eq!(runtime.instance().world_revision(), revision + 1);
        assert!(applied.bounds.is_some());
    }

    #[test]
    fn composition_resets_pose_but_keeps_default_skin() {
        let mut runtime = runtime();
        runtime.instance_mut().bone_mut(1).unwrap().rotation = 45.0;

        let applied = SkinComposer::apply_many(&mut runtime, &["hair/x"]);
        assert_eq!(runtime.instance().bones()[1].rotation, 0.0);
        assert!(runtime.instance().slot_attachment(0).is_some(), "shadow from default skin");
        assert!(runtime.instance().slot_attachment(4).is_some(), "hair");
        assert!(runtime.instance().slot_attachment(2).is_none(), "no torso without a body");
        assert!(!applied.is_partial());
    }

    #[test]
    fn category_order_puts_body_under_hair() {
        let mut runtime = runtime();
        let applied = SkinComposer::compose_by_category(&mut runtime, &["hair/x", "body/a"]);
        assert_eq!(applied.fragments, ["body/a", "hair/x"]);
    }
}
