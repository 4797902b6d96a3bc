use crate::app::App;
use log::error;
use skelvis_rs::LoadRequest;
use skelvis_rs::settings::PreviewSettings;
use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

pub struct AppHandler {
    pub app: Option<App>,
    pub request: LoadRequest,
    pub settings: PreviewSettings,
    pub runtime: Runtime,
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("skelvis")
            .with_inner_size(winit::dpi::LogicalSize::new(800.0, 800.0));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Could not create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let app = self.runtime.block_on(App::new(
            window,
            self.runtime.handle().clone(),
            self.request.clone(),
            self.settings.clone(),
        ));
        match app {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                error!("Could not start renderer: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                app.shutdown();
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            if !app.tick() {
                event_loop.exit();
                return;
            }
            app.window.request_redraw();
        }
    }
}
