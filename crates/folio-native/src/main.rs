use folio_core::obj::parse_obj;
use folio_core::render::GpuState;
use folio_core::{AssetAction, AssetEvent, LoadError, SceneConfig, Stage};
use winit::dpi::PhysicalSize;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

/// Scroll distance for one wheel notch, in logical pixels.
const LINE_SCROLL_PX: f32 = 60.0;

fn read_asset(path: &str) -> AssetEvent {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Fetch {
            path: path.to_string(),
            reason: e.to_string(),
        })
        .and_then(|text| parse_obj(&text));
    match parsed {
        Ok(mesh) => AssetEvent::Loaded(mesh),
        Err(e) => AssetEvent::Failed(e),
    }
}

fn load_companion<B: folio_core::RenderBackend>(stage: &mut Stage<B>) {
    let Some(mut path) = stage.pending_asset().map(str::to_string) else {
        return;
    };
    loop {
        match stage.on_asset_event(read_asset(&path)) {
            AssetAction::Retry { path: next, attempt } => {
                log::info!("[loader] retrying {} (attempt {})", next, attempt);
                path = next;
            }
            AssetAction::None => break,
        }
    }
}

/// Logical size of the window; the page height the wheel scrolls through.
fn logical(size: PhysicalSize<u32>, scale: f64) -> (f32, f32) {
    let l = size.to_logical::<f64>(scale);
    (l.width as f32, l.height as f32)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::with_companion(path),
        None => SceneConfig::default(),
    };
    let sections = config.section_count();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("folio (native)")
        .build(&event_loop)?;

    let size = window.inner_size();
    let gpu = pollster::block_on(GpuState::new(&window, size.width, size.height))?;
    let (w, h) = logical(size, window.scale_factor());
    let mut stage = Stage::new(gpu, config, w, h)?;
    stage.on_resize_physical(w, h, size.width, size.height);
    load_companion(&mut stage);

    let mut scroll_offset = 0.0f32;
    let window = &window;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            let (w, h) = logical(size, window.scale_factor());
            stage.on_resize_physical(w, h, size.width, size.height);
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let p = position.to_logical::<f64>(window.scale_factor());
            stage.on_pointer_move(p.x as f32, p.y as f32);
        }
        Event::WindowEvent {
            event: WindowEvent::MouseWheel { delta, .. },
            ..
        } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => -y * LINE_SCROLL_PX,
                MouseScrollDelta::PixelDelta(p) => {
                    -(p.to_logical::<f64>(window.scale_factor()).y as f32)
                }
            };
            let (_, h) = stage.viewport();
            let max = sections.saturating_sub(1) as f32 * h;
            scroll_offset = (scroll_offset + dy).clamp(0.0, max.max(0.0));
            stage.on_scroll(scroll_offset);
        }
        Event::AboutToWait => match stage.frame() {
            Ok(_) => window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                stage.scene.backend_mut().reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(e) => log::warn!("[frame] {:?}", e),
        },
        _ => {}
    })?;
    Ok(())
}
