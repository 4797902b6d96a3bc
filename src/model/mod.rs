mod animation;
mod atlas;
mod attachment;
mod skeleton;
mod skeleton_data;
mod skin;

pub use animation::*;
pub use atlas::*;
pub use attachment::*;
pub use skeleton::*;
pub use skeleton_data::*;
pub use skin::*;
