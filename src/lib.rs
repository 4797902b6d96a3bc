//! Skeletal 2D character previewer core: asynchronous asset loading, skin
//! composition, single-track animation and a tick-driven render loop, with a
//! wgpu draw backend.

pub mod animation;
pub mod demo;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod render_loop;
pub mod renderer;
pub mod runtime;
pub mod settings;
pub mod skin;
pub mod time;

pub const CONFY_APP_NAME: &str = "skelvis-rs";

pub use animation::{AnimationController, AnimationRequest, TrackState};
pub use error::{AssetError, PreviewError};
pub use loader::{AssetBundle, AssetLoader, LoadRequest, LoadStatus};
pub use render_loop::{DrawList, DrawSink, PreviewEvent, PreviewHandle, RenderLoop, TickOutcome};
pub use runtime::SkeletonRuntime;
pub use skin::{Applied, SkinComposer, SkinRequest, SkinSelection};
pub use time::{ManualTime, TimeKeeper, TimeSource};
