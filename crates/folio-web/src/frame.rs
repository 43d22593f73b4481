use crate::dom;
use folio_core::render::GpuState;
use folio_core::Stage;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebStage = Stage<GpuState<'static>>;
pub type SharedStage = Rc<RefCell<WebStage>>;

pub struct FrameContext {
    pub stage: SharedStage,
    pub canvas: web::HtmlCanvasElement,
    pub frames: u64,
}

impl FrameContext {
    pub fn new(stage: SharedStage, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            stage,
            canvas,
            frames: 0,
        }
    }

    pub fn frame(&mut self) {
        self.frames += 1;
        let mut stage = self.stage.borrow_mut();
        match stage.frame() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
                log::warn!("[frame] surface lost; reconfiguring at {}x{}", w, h);
                stage.scene.backend_mut().reconfigure();
            }
            Err(e) => {
                if self.frames % 120 == 1 {
                    log::error!("[frame] render error: {:?}", e);
                }
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
