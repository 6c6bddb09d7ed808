//! Image distortion layer: one GPU quad per project image, driven by the
//! shared scroll velocity.
//!
//! Everything lives on an owned context object with `create -> use ->
//! dispose` lifecycle; nothing is held at module scope, so tests and
//! repeated init/teardown cycles can coexist. The only coupling to the
//! scroll engine is the velocity read, smoothed through `VelocityBridge`
//! before it reaches the shader.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use app_core::{ScrollState, VelocityBridge};
use fnv::FnvHashMap;
use glam::Vec2;
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::constants::{
    MAX_DEVICE_PIXEL_RATIO, MEDIA_SELECTOR, MIN_FRAME_INTERVAL_SEC, OBSERVER_MARGIN_PX,
    WEBGL_CANVAS_ID,
};
use crate::dom;
use crate::layout::{cover_uv_transform, quad_clip_rect};
use crate::render::{GpuState, QuadGpu, QuadUniforms};

/// One tracked image: DOM handle plus its GPU-resident quad.
struct MediaItem {
    element: web::HtmlImageElement,
    gpu: QuadGpu,
    texture_size: Vec2,
    border_radius: f32,
    is_in_view: bool,
}

pub struct Distortion {
    canvas: web::HtmlCanvasElement,
    gpu: GpuState<'static>,
    media: Vec<MediaItem>,
    /// data-index attribute -> slot in `media`, for observer callbacks.
    slots: FnvHashMap<u32, usize>,
    observer: Option<web::IntersectionObserver>,
    // Kept alive for the observer's lifetime; dropped with the context.
    _observer_cb: Option<Closure<dyn FnMut(js_sys::Array)>>,
    shared: Rc<RefCell<ScrollState>>,
    bridge: VelocityBridge,
    started: Instant,
    last_frame: Instant,
    /// Rebuild epoch; in-flight async rebuilds check it before applying.
    epoch: u64,
    destroyed: Rc<Cell<bool>>,
    raf_id: Option<i32>,
    _listeners: Vec<dom::Listener>,
}

/// Build the distortion context for the page, if its canvas exists.
/// Missing canvas or failed adapter acquisition degrade to `None`; the
/// page keeps working without the layer.
pub async fn init(
    document: &web::Document,
    shared: Rc<RefCell<ScrollState>>,
) -> Option<Rc<RefCell<Distortion>>> {
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(WEBGL_CANVAS_ID)?
        .dyn_into()
        .ok()?;
    dom::sync_canvas_backing_size(&canvas, MAX_DEVICE_PIXEL_RATIO);

    // Leak a canvas clone to satisfy the 'static lifetime for the surface.
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let gpu = match GpuState::new(leaked_canvas).await {
        Ok(g) => g,
        Err(e) => {
            log::error!("[distortion] WebGPU init error: {:?}", e);
            return None;
        }
    };

    let ctx = Rc::new(RefCell::new(Distortion {
        canvas,
        gpu,
        media: Vec::new(),
        slots: FnvHashMap::default(),
        observer: None,
        _observer_cb: None,
        shared,
        bridge: VelocityBridge::new(),
        started: Instant::now(),
        last_frame: Instant::now(),
        epoch: 0,
        destroyed: Rc::new(Cell::new(false)),
        raf_id: None,
        _listeners: Vec::new(),
    }));

    create_observer(&ctx);
    build_media(&ctx).await;
    wire_resize(&ctx);
    start_loop(&ctx);

    Some(ctx)
}

impl Distortion {
    /// Tear down the layer: stop the loop, disconnect observation, and
    /// release every GPU resource. Leak-free teardown is a correctness
    /// requirement here, not hygiene.
    pub fn cleanup(&mut self) {
        self.destroyed.set(true);
        if let (Some(window), Some(id)) = (web::window(), self.raf_id.take()) {
            let _ = window.cancel_animation_frame(id);
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self._observer_cb = None;
        for item in self.media.drain(..) {
            item.gpu.dispose();
        }
        self.slots.clear();
        self._listeners.clear();
        log::info!("[distortion] cleaned up");
    }
}

fn create_observer(ctx: &Rc<RefCell<Distortion>>) {
    let ctx_cb = ctx.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        let mut ctx = ctx_cb.borrow_mut();
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                continue;
            };
            let index = entry
                .target()
                .get_attribute("data-index")
                .and_then(|v| v.parse::<u32>().ok());
            let Some(slot) = index.and_then(|i| ctx.slots.get(&i).copied()) else {
                continue;
            };
            if let Some(item) = ctx.media.get_mut(slot) {
                item.is_in_view = entry.is_intersecting();
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let options = web::IntersectionObserverInit::new();
    options.set_root_margin(&format!("{OBSERVER_MARGIN_PX}px"));
    let observer = web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    )
    .ok();

    let mut ctx = ctx.borrow_mut();
    ctx.observer = observer;
    ctx._observer_cb = Some(callback);
}

/// (Re)build the media store: await every image decode, upload textures,
/// and register with the observer. A failed decode skips that image only.
async fn build_media(ctx: &Rc<RefCell<Distortion>>) {
    let Some((window, document)) = dom::window_document() else {
        return;
    };
    let epoch = ctx.borrow().epoch;

    let Ok(nodes) = document.query_selector_all(MEDIA_SELECTOR) else {
        return;
    };
    let mut images = Vec::new();
    for i in 0..nodes.length() {
        if let Some(img) = nodes
            .item(i)
            .and_then(|n| n.dyn_into::<web::HtmlImageElement>().ok())
        {
            images.push(img);
        }
    }
    if images.is_empty() {
        log::info!("[distortion] no media to track");
        return;
    }

    // First media frame comes after all decodes: a visible delay, accepted
    // over flashes of untextured geometry.
    let mut decoded = Vec::new();
    for img in images {
        if JsFuture::from(img.decode()).await.is_err() {
            log::warn!("[distortion] image failed to decode; skipping");
            continue;
        }
        let bitmap = match window.create_image_bitmap_with_html_image_element(&img) {
            Ok(promise) => JsFuture::from(promise).await.ok(),
            Err(_) => None,
        };
        let Some(bitmap) = bitmap.and_then(|b| b.dyn_into::<web::ImageBitmap>().ok()) else {
            log::warn!("[distortion] bitmap creation failed; skipping");
            continue;
        };
        decoded.push((img, bitmap));
    }

    let mut ctx = ctx.borrow_mut();
    if ctx.destroyed.get() || ctx.epoch != epoch {
        // A resize or teardown won the race; this batch is stale.
        return;
    }

    for item in ctx.media.drain(..) {
        item.gpu.dispose();
    }
    ctx.slots.clear();

    for (i, (img, bitmap)) in decoded.into_iter().enumerate() {
        let gpu = ctx.gpu.build_quad(&bitmap);
        let border_radius = window
            .get_computed_style(&img)
            .ok()
            .flatten()
            .and_then(|s| s.get_property_value("border-radius").ok())
            .and_then(|v| v.trim_end_matches("px").parse::<f32>().ok())
            .unwrap_or(0.0);
        let _ = img.set_attribute("data-index", &i.to_string());
        if let Some(observer) = &ctx.observer {
            observer.observe(&img);
        }
        ctx.slots.insert(i as u32, ctx.media.len());
        ctx.media.push(MediaItem {
            texture_size: Vec2::new(img.natural_width() as f32, img.natural_height() as f32),
            element: img,
            gpu,
            border_radius,
            is_in_view: true,
        });
    }
    log::info!("[distortion] tracking {} media quads", ctx.media.len());
}

fn wire_resize(ctx: &Rc<RefCell<Distortion>>) {
    let Some(window) = web::window() else { return };
    let ctx_resize = ctx.clone();
    let listener = dom::Listener::new(&window, "resize", true, move |_ev| {
        let ctx = ctx_resize.clone();
        {
            let mut c = ctx.borrow_mut();
            dom::sync_canvas_backing_size(&c.canvas, MAX_DEVICE_PIXEL_RATIO);
            // Bounds and textures are rebuilt wholesale; bump the epoch so a
            // slower in-flight rebuild cannot apply over this one.
            c.epoch += 1;
        }
        spawn_local(async move {
            build_media(&ctx).await;
        });
    });
    ctx.borrow_mut()._listeners.push(listener);
}

fn start_loop(ctx: &Rc<RefCell<Distortion>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let ctx_tick = ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut ctx = ctx_tick.borrow_mut();
            if ctx.destroyed.get() {
                // Loop ends here; the frame request is not renewed.
                ctx.raf_id = None;
                return;
            }
            ctx.frame();
            if let Some(window) = web::window() {
                ctx.raf_id = window
                    .request_animation_frame(
                        tick_clone.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                    )
                    .ok();
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(window) = web::window() {
        let id = window
            .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .ok();
        ctx.borrow_mut().raf_id = id;
    }
}

impl Distortion {
    /// One render frame, capped to the configured rate. Reads the shared
    /// scroll state once, after the scroll engine's own frame for this
    /// display tick has already published.
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        if dt < MIN_FRAME_INTERVAL_SEC {
            return;
        }
        self.last_frame = now;

        let raw_velocity = self.shared.borrow().velocity;
        let velocity = self.bridge.sample(raw_velocity, dt);

        let (vw, vh) = dom::viewport_size();
        let viewport = Vec2::new(vw, vh);

        // Refresh bounds for visible quads only; hidden ones are skipped
        // entirely, which also parks them out of the draw list.
        let mut draws: Vec<&QuadGpu> = Vec::with_capacity(self.media.len());
        for item in &self.media {
            if !item.is_in_view {
                continue;
            }
            let bounds = item.element.get_bounding_client_rect();
            let quad_size = Vec2::new(bounds.width() as f32, bounds.height() as f32);
            let (uv_scale, uv_offset) = cover_uv_transform(item.texture_size, quad_size);
            self.gpu.write_quad(
                &item.gpu,
                &QuadUniforms {
                    rect: quad_clip_rect(
                        bounds.left() as f32,
                        bounds.top() as f32,
                        quad_size.x,
                        quad_size.y,
                        viewport,
                    ),
                    uv_scale: uv_scale.to_array(),
                    uv_offset: uv_offset.to_array(),
                    quad_size: quad_size.to_array(),
                    border_radius: item.border_radius,
                    _pad: 0.0,
                },
            );
            draws.push(&item.gpu);
        }

        let width = self.canvas.width();
        let height = self.canvas.height();
        self.gpu.resize_if_needed(width, height);

        let time = (now - self.started).as_secs_f32();
        if let Err(e) = self.gpu.render(&draws, time, velocity) {
            log::error!("[distortion] render error: {:?}", e);
        }
    }
}
