pub mod atlas;
pub mod link;
pub mod load;
pub mod parser;
pub mod write;

pub use atlas::parse_atlas;
pub use link::link_regions;
pub use load::load_skeleton;
pub use write::write_skeleton;

pub const SKELETON_MAGIC: &[u8; 4] = b"SKEL";
pub const SKELETON_VERSION: u32 = 1;
