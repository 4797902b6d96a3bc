use log::{error, info, warn};
use skelvis_rs::error::RenderError;
use skelvis_rs::render_loop::{PreviewEvent, PreviewHandle, RenderLoop, TickOutcome};
use skelvis_rs::renderer::Renderer;
use skelvis_rs::settings::PreviewSettings;
use skelvis_rs::skin::{SkinRequest, SkinSelection, order_by_category};
use skelvis_rs::{AssetLoader, LoadRequest, TimeKeeper};
use std::sync::Arc;
use tokio::runtime::Handle;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

impl EventResponse {
    fn none() -> Self {
        Self {
            repaint: false,
            exit: false,
        }
    }
}

pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    preview: RenderLoop<TimeKeeper>,
    handle: PreviewHandle,
    settings: PreviewSettings,
    fragments: Vec<String>,
    clips: Vec<String>,
    selection: SkinSelection,
    cursor: usize,
    clip_index: Option<usize>,
    looping: bool,
}

impl App {
    pub async fn new(
        window: Arc<Window>,
        runtime: Handle,
        request: LoadRequest,
        settings: PreviewSettings,
    ) -> Result<Self, RenderError> {
        let renderer = Renderer::new(window.clone(), settings.display.clone()).await?;

        let selection = match &request.initial_skin {
            Some(SkinRequest::Single(name)) => std::iter::once(name.clone()).collect(),
            Some(SkinRequest::Many(names)) => names.iter().cloned().collect(),
            None => SkinSelection::new(),
        };
        let looping = request
            .initial_animation
            .as_ref()
            .map_or(settings.playback.looping, |a| a.looping);

        let time = TimeKeeper::new(settings.playback.max_delta);
        let mut preview = RenderLoop::new(AssetLoader::new(runtime), request, time);
        preview.set_show_bones(settings.display.show_bones);
        let handle = preview.handle();

        Ok(Self {
            window,
            renderer,
            preview,
            handle,
            settings,
            fragments: Vec::new(),
            clips: Vec::new(),
            selection,
            cursor: 0,
            clip_index: None,
            looping,
        })
    }

    /// Runs one preview tick. Returns `false` once the preview cannot
    /// continue.
    pub fn tick(&mut self) -> bool {
        let outcome = self.preview.tick(&mut self.renderer);
        for event in self.preview.drain_events() {
            self.on_event(event);
        }
        match outcome {
            TickOutcome::Loading | TickOutcome::Drawn => true,
            TickOutcome::Failed => {
                error!(
                    "Preview stopped: {}",
                    self.preview.failure().unwrap_or("load failed")
                );
                false
            }
            TickOutcome::Stopped => false,
        }
    }

    fn on_event(&mut self, event: PreviewEvent) {
        match event {
            PreviewEvent::AssetReady(ready) => {
                info!(
                    "Fragments: [{}]; clips: [{}]",
                    ready.skin_fragment_names.join(", "),
                    ready.animation_clip_names.join(", ")
                );
                self.fragments = ready.skin_fragment_names;
                self.clips = ready.animation_clip_names;
                self.update_title();
            }
            PreviewEvent::SkinApplied(applied) => {
                if applied.is_partial() {
                    warn!("Unknown fragments skipped: {}", applied.skipped.join(", "));
                }
                self.renderer.reset_view();
                self.update_title();
            }
            PreviewEvent::AnimationChanged(_) => {
                self.clip_index = self
                    .preview
                    .animation()
                    .and_then(|a| a.current_clip())
                    .and_then(|clip| self.clips.iter().position(|c| c == clip));
                self.update_title();
            }
            PreviewEvent::CommandRejected(e) => warn!("Request rejected: {}", e),
            PreviewEvent::LoadFailed(reason) => error!("Load failed: {}", reason),
        }
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        match event {
            WindowEvent::CloseRequested => EventResponse {
                repaint: false,
                exit: true,
            },
            WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
                EventResponse {
                    repaint: true,
                    exit: false,
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => EventResponse {
                        repaint: false,
                        exit: true,
                    },
                    Key::Named(NamedKey::ArrowRight) => {
                        self.step_clip(1);
                        EventResponse::none()
                    }
                    Key::Named(NamedKey::ArrowLeft) => {
                        self.step_clip(-1);
                        EventResponse::none()
                    }
                    Key::Named(NamedKey::Tab) => {
                        if !self.fragments.is_empty() {
                            self.cursor = (self.cursor + 1) % self.fragments.len();
                            self.update_title();
                        }
                        EventResponse::none()
                    }
                    Key::Named(NamedKey::Space) => {
                        self.toggle_fragment();
                        EventResponse::none()
                    }
                    Key::Character(c) if c.eq_ignore_ascii_case("b") => {
                        let show = !self.preview.show_bones();
                        if let Err(e) = self.handle.show_bones(show) {
                            warn!("{}", e);
                        }
                        self.settings.display.show_bones = show;
                        EventResponse::none()
                    }
                    _ => EventResponse::none(),
                }
            }
            _ => EventResponse::none(),
        }
    }

    fn step_clip(&mut self, step: isize) {
        if self.clips.is_empty() {
            return;
        }
        let len = self.clips.len() as isize;
        let next = match self.clip_index {
            Some(idx) => (idx as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        };
        let next = next as usize;

        let result = self.handle.switch_to(
            self.clips[next].clone(),
            self.looping,
            self.settings.playback.default_mix,
        );
        if let Err(e) = result {
            warn!("{}", e);
        }
    }

    fn toggle_fragment(&mut self) {
        let Some(name) = self.fragments.get(self.cursor) else {
            return;
        };
        self.selection.toggle(name);

        let names = match self.preview.runtime() {
            Some(runtime) => order_by_category(runtime.data(), self.selection.names()),
            None => self.selection.names().to_vec(),
        };
        if let Err(e) = self.handle.apply_many(names) {
            warn!("{}", e);
        }
    }

    fn update_title(&self) {
        let clip = self
            .preview
            .animation()
            .and_then(|a| a.current_clip())
            .unwrap_or("-");
        let cursor = self.fragments.get(self.cursor).map_or("-", String::as_str);
        let marker = if self.selection.contains(cursor) { "x" } else { " " };
        self.window.set_title(&format!(
            "skelvis - {} - [{}] {} - skins: {}",
            clip,
            marker,
            cursor,
            self.selection.names().join(", ")
        ));
    }

    /// Tears the preview down and persists display toggles.
    pub fn shutdown(&mut self) {
        self.preview.teardown();
        self.settings.display.save();
    }
}
