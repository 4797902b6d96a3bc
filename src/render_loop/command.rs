use crate::animation::AnimationRequest;
use crate::error::PreviewError;
use crate::skin::SkinRequest;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewCommand {
    ApplySkin(SkinRequest),
    SwitchAnimation(AnimationRequest),
    ShowBones(bool),
}

/// Cloneable control surface for a running preview. Requests are queued and
/// take effect at the start of the next tick.
#[derive(Debug, Clone)]
pub struct PreviewHandle {
    sender: UnboundedSender<PreviewCommand>,
    alive: Arc<AtomicBool>,
}

impl PreviewHandle {
    pub(crate) fn new(sender: UnboundedSender<PreviewCommand>, alive: Arc<AtomicBool>) -> Self {
        Self { sender, alive }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn send(&self, command: PreviewCommand) -> Result<(), PreviewError> {
        if !self.is_alive() {
            return Err(PreviewError::Detached);
        }
        self.sender.send(command).map_err(|_| PreviewError::Detached)
    }

    pub fn apply_single(&self, name: impl Into<String>) -> Result<(), PreviewError> {
        self.send(PreviewCommand::ApplySkin(SkinRequest::Single(name.into())))
    }

    pub fn apply_many<I, S>(&self, names: I) -> Result<(), PreviewError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.send(PreviewCommand::ApplySkin(SkinRequest::Many(names)))
    }

    pub fn switch_to(&self, clip: impl Into<String>, looping: bool, mix_duration: f32) -> Result<(), PreviewError> {
        let request = AnimationRequest::new(clip).looping(looping).with_mix(mix_duration);
        self.send(PreviewCommand::SwitchAnimation(request))
    }

    pub fn show_bones(&self, show: bool) -> Result<(), PreviewError> {
        self.send(PreviewCommand::ShowBones(show))
    }
}
