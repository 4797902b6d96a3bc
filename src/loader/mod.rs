mod bundle;
mod loader;
mod request;
mod source;

pub use bundle::AssetBundle;
pub use loader::{AssetLoader, LoadHandle, LoadStatus};
pub use request::{LoadRequest, atlas_name_for};
pub use source::AssetLocation;
