mod bounds;
mod instance;
mod skeleton;

pub use bounds::Bounds;
pub use instance::{Bone, SkeletonInstance, Slot};
pub use skeleton::SkeletonRuntime;
