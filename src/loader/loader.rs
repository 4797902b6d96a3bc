use super::{AssetBundle, LoadRequest};
use crate::error::AssetError;
use crate::parser::{link_regions, load_skeleton, parse_atlas};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinError;

#[derive(Debug, Clone)]
pub enum LoadStatus {
    Pending,
    Ready(Arc<AssetBundle>),
    Failed(String),
}

impl LoadStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadStatus::Pending)
    }
}

/// One in-flight (or finished) load. Once it reports `Ready` or `Failed` it
/// keeps reporting the same outcome.
#[derive(Debug)]
pub struct LoadHandle {
    id: u64,
    request: LoadRequest,
    receiver: oneshot::Receiver<Result<AssetBundle, AssetError>>,
    outcome: Option<LoadStatus>,
}

impl LoadHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &LoadRequest {
        &self.request
    }

    fn poll(&mut self) -> LoadStatus {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let status = match self.receiver.try_recv() {
            Err(TryRecvError::Empty) => return LoadStatus::Pending,
            Ok(Ok(bundle)) => {
                info!(
                    "Load #{} ready: {} fragments, {} clips",
                    self.id,
                    bundle.skeleton_data.skins.len(),
                    bundle.skeleton_data.animations.len()
                );
                LoadStatus::Ready(Arc::new(bundle))
            }
            Ok(Err(e)) => {
                warn!("Load #{} failed: {}", self.id, e);
                LoadStatus::Failed(e.to_string())
            }
            Err(TryRecvError::Closed) => {
                warn!("Load #{} was cancelled", self.id);
                LoadStatus::Failed("load task was cancelled".to_string())
            }
        };
        self.outcome = Some(status.clone());
        status
    }
}

/// Spawns asset loads on a tokio runtime; completion is observed by polling.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    runtime: Handle,
    next_id: u64,
}

impl AssetLoader {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime, next_id: 1 }
    }

    /// Loader bound to the runtime of the calling context, if there is one.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    pub fn begin_load(&mut self, request: LoadRequest) -> LoadHandle {
        let id = self.next_id;
        self.next_id += 1;

        let (sender, receiver) = oneshot::channel();
        let task_request = request.clone();
        self.runtime.spawn(async move {
            let task = tokio::spawn(async move { load_bundle(&task_request).await });
            let result = match task.await {
                Ok(result) => result,
                Err(e) => Err(task_failure(e)),
            };
            let _ = sender.send(result);
        });

        debug!(
            "Load #{} started: {} + {}",
            id, request.atlas_path, request.skeleton_path
        );
        LoadHandle {
            id,
            request,
            receiver,
            outcome: None,
        }
    }

    pub fn poll_status(&self, handle: &mut LoadHandle) -> LoadStatus {
        handle.poll()
    }
}

fn task_failure(err: JoinError) -> AssetError {
    if !err.is_panic() {
        return AssetError::TaskCancelled;
    }
    let payload = err.into_panic();
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    AssetError::TaskPanicked(reason)
}

async fn load_bundle(request: &LoadRequest) -> Result<AssetBundle, AssetError> {
    let atlas_location = request.atlas_location();
    let skeleton_location = request.skeleton_location();
    info!("Loading {} with atlas {}", skeleton_location, atlas_location);

    let (atlas_bytes, skeleton_bytes) =
        tokio::try_join!(atlas_location.fetch(), skeleton_location.fetch())?;

    let text = String::from_utf8(atlas_bytes)
        .map_err(|e| AssetError::atlas(0, format!("atlas is not UTF-8: {}", e)))?;
    let mut atlas = parse_atlas(&text)?;

    for page in &mut atlas.pages {
        let location = atlas_location.sibling(&page.name);
        let bytes = location.fetch().await?;
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        if page.width == 0 || page.height == 0 {
            page.width = image.width();
            page.height = image.height();
        }
        debug!("Page {} decoded ({}x{})", location, image.width(), image.height());
        page.image = Some(Arc::new(image));
    }

    let mut skeleton_data = load_skeleton(&skeleton_bytes, request.scale)?;
    link_regions(&mut skeleton_data, &atlas)?;

    Ok(AssetBundle::new(atlas, skeleton_data))
}
