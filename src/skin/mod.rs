mod applied;
mod category;
mod composer;
mod selection;

pub use applied::AppliedSkin;
pub use category::{bucket_fragments, category_of, infer_category, order_by_category};
pub use composer::{Applied, SkinComposer, SkinRequest};
pub use selection::SkinSelection;
