mod command;
mod draw;
mod events;
mod preview;

pub use command::{PreviewCommand, PreviewHandle};
pub use draw::{BoneSegment, DrawList, DrawQuad, DrawSink, NullSink};
pub use events::{AssetReadyEvent, PreviewEvent};
pub use preview::{RenderLoop, TickOutcome};
