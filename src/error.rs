use std::io;
use thiserror::Error;

/// Errors surfaced by the preview control surface.
///
/// None of these stop the render loop: a rejected request leaves the previous
/// skin and track in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("asset load failed: {0}")]
    LoadFailed(String),
    #[error("skin fragment not found: {0}")]
    FragmentNotFound(String),
    #[error("animation clip not found: {0}")]
    ClipNotFound(String),
    #[error("assets are not loaded yet")]
    NotReady,
    #[error("preview has been torn down")]
    Detached,
}

/// Skeleton binary format error, tagged with the chunk being read.
#[derive(Debug, Error)]
#[error("{chunk}: {message}")]
pub struct ParseError {
    pub chunk: String,
    pub message: String,
}

impl ParseError {
    pub fn new(chunk: &[u8; 4], message: impl Into<String>) -> Self {
        Self {
            chunk: String::from_utf8_lossy(chunk).into_owned(),
            message: message.into(),
        }
    }
}

/// Failures while fetching or decoding an asset pair.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("skeleton parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("atlas parse error at line {line}: {message}")]
    Atlas { line: usize, message: String },
    #[error("region not found in atlas: {0}")]
    MissingRegion(String),
    #[error("region does not fit its atlas page: {0}")]
    RegionOutOfBounds(String),
    #[error("load task panicked: {0}")]
    TaskPanicked(String),
    #[error("load task was cancelled")]
    TaskCancelled,
    #[error("unsupported skeleton version {0}")]
    UnsupportedVersion(u32),
    #[error("not a skeleton binary")]
    BadMagic,
}

impl AssetError {
    pub fn atlas(line: usize, message: impl Into<String>) -> Self {
        AssetError::Atlas {
            line,
            message: message.into(),
        }
    }
}

impl From<AssetError> for PreviewError {
    fn from(err: AssetError) -> Self {
        PreviewError::LoadFailed(err.to_string())
    }
}

/// Failures while bringing up the wgpu backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface does not support any texture format")]
    NoSurfaceFormat,
}
