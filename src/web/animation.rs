//! Browser animation loop for the background engine.
//!
//! `requestAnimationFrame` drives [`BackgroundEngine::step`]; the window's
//! `resize` event feeds [`BackgroundEngine::on_resize`]. Both closures share
//! the engine through `Rc<RefCell<_>>` and live for the rest of the page.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::canvas::CanvasSurface;
use crate::background::{BackgroundEngine, Scheduler, Viewport};
use crate::config::BackgroundConfig;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// [`Scheduler`] backed by `window.requestAnimationFrame`.
pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl Scheduler for RafScheduler {
    fn request_next_frame(&mut self) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        if let Err(err) = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            warn!("requestAnimationFrame failed: {err:?}");
        }
    }
}

struct Animation {
    engine: BackgroundEngine,
    surface: CanvasSurface,
    scheduler: RafScheduler,
}

/// Start the animated background on the canvas with id `canvas_id`.
///
/// A missing window, canvas or 2D context leaves the feature off for good
/// and still returns `Ok(())`.
pub fn start_background(canvas_id: &str, config: &BackgroundConfig) -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        debug!("no window, animated background disabled");
        return Ok(());
    };
    let Some(mut surface) = window
        .document()
        .and_then(|document| CanvasSurface::from_element_id(&document, canvas_id))
    else {
        debug!("canvas #{canvas_id} unavailable, animated background disabled");
        return Ok(());
    };

    let initial = viewport(&window);
    let rng = SmallRng::seed_from_u64(random_seed());
    let engine = BackgroundEngine::new(config, initial, &mut surface, rng);
    info!(
        "animated background started at {}x{} with {} nodes",
        initial.width,
        initial.height,
        engine.node_count()
    );

    // The frame closure re-arms itself through the scheduler, so it has to
    // be reachable from its own state. The cycle is never collected.
    let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let animation = Rc::new(RefCell::new(Animation {
        engine,
        surface,
        scheduler: RafScheduler {
            window: window.clone(),
            callback: Rc::clone(&callback),
        },
    }));

    let frame_state = Rc::clone(&animation);
    *callback.borrow_mut() = Some(Closure::new(move |now: f64| {
        let mut animation = frame_state.borrow_mut();
        let Animation {
            engine,
            surface,
            scheduler,
        } = &mut *animation;
        engine.step(now, surface, scheduler);
    }));

    let resize_state = Rc::clone(&animation);
    let resize_window = window.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let now = resize_window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_default();
        match resize_state.try_borrow_mut() {
            Ok(mut animation) => animation.engine.on_resize(viewport(&resize_window), now),
            Err(_) => warn!("resize arrived during a frame step and was dropped"),
        }
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let mut state = animation.borrow_mut();
    let Animation {
        engine, scheduler, ..
    } = &mut *state;
    engine.start(scheduler);
    Ok(())
}

fn viewport(window: &Window) -> Viewport {
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(read(window.inner_width()), read(window.inner_height()))
}

fn random_seed() -> u64 {
    let half = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}
