use anyhow::{Result, bail};
use log::info;
use skelvis_rs::render_loop::{NullSink, PreviewEvent};
use skelvis_rs::settings::PreviewSettings;
use skelvis_rs::{AssetLoader, LoadRequest, RenderLoop, TickOutcome, TimeKeeper, demo};
use std::time::Duration;
use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod cli;

fn main() -> Result<()> {
    env_logger::init();

    let options = cli::Options::parse(std::env::args().skip(1))?;
    let settings = PreviewSettings::load();

    if let Some(dir) = &options.write_demo {
        let path = demo::write_to(dir)?;
        info!("Demo asset written to {}", dir.display());
        println!("{}", path.display());
        if options.skeleton.is_none() {
            return Ok(());
        }
    }

    let Some(request) = options.load_request(&settings.playback) else {
        eprintln!("{}", cli::USAGE);
        return Ok(());
    };

    let runtime = tokio::runtime::Runtime::new()?;

    if options.list {
        return list(&runtime, request);
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = app::AppHandler {
        app: None,
        request,
        settings,
        runtime,
    };

    event_loop.run_app(&mut handler)?;

    Ok(())
}

/// Loads headless and prints the ready event as JSON.
fn list(runtime: &tokio::runtime::Runtime, request: LoadRequest) -> Result<()> {
    let mut preview = RenderLoop::new(AssetLoader::new(runtime.handle().clone()), request, TimeKeeper::default());
    let mut sink = NullSink;
    loop {
        match preview.tick(&mut sink) {
            TickOutcome::Loading => std::thread::sleep(Duration::from_millis(10)),
            TickOutcome::Drawn => break,
            TickOutcome::Failed => bail!("{}", preview.failure().unwrap_or("load failed")),
            TickOutcome::Stopped => bail!("preview stopped before the assets were ready"),
        }
    }

    for event in preview.drain_events() {
        if let PreviewEvent::AssetReady(ready) = event {
            println!("{}", serde_json::to_string_pretty(&ready)?);
        }
    }
    preview.teardown();
    Ok(())
}
