//! A scrolling column: the DOM half of the engine.
//!
//! Owns the duplicated content buffer, the line elements produced by the
//! deferred text split, the animation-frame loop, and the desktop/mobile
//! swap. All physics and effect math lives in `app-core`; this file only
//! turns engine writes into style mutations and input events into engine
//! calls.

use std::cell::RefCell;
use std::rc::Rc;

use app_core::{
    ColumnEngine, DuplicationPlan, LineWrite, ModeTransition, ModeSwitch, Rect, RenderTarget,
    ScrollState, ViewportMode, RESIZE_DEBOUNCE_SEC,
};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::constants::{
    COLUMN_CONTENT_SELECTOR, FRAME_DT_CLAMP_SEC, PROJECTS_LIST_SELECTOR, SPLIT_WORD_SELECTOR,
};
use crate::dom;
use crate::events;

#[derive(Clone, Copy, Debug)]
pub struct ColumnOptions {
    pub reverse: bool,
    /// The column that publishes into the shared scroll state each frame.
    pub controls_shared: bool,
}

pub struct Column {
    el: web::HtmlElement,
    content: web::HtmlElement,
    original_children: Vec<web::Element>,
    pub(crate) engine: ColumnEngine,
    pub(crate) mode: ModeSwitch,
    shared: Rc<RefCell<ScrollState>>,
    line_els: Vec<web::HtmlElement>,
    pub(crate) listeners: Vec<dom::Listener>,
    raf_id: Option<i32>,
    raf_tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    resize_debounce: Option<dom::Timeout>,
    last_frame: Instant,
}

impl Column {
    /// Build a column over an existing section. Returns `None` (and leaves
    /// the page untouched) when the section or its content is missing —
    /// columns are best-effort presentation over optional markup.
    pub fn attach(
        el: web::Element,
        options: ColumnOptions,
        shared: Rc<RefCell<ScrollState>>,
    ) -> Option<Rc<RefCell<Column>>> {
        let el: web::HtmlElement = el.dyn_into().ok()?;
        let content = resolve_content(&el)?;

        let children = content.children();
        let mut original_children = Vec::with_capacity(children.length() as usize);
        for i in 0..children.length() {
            if let Some(child) = children.item(i) {
                original_children.push(child);
            }
        }
        if original_children.is_empty() {
            log::info!("[column] empty content, skipping");
            return None;
        }

        let (vw, vh) = dom::viewport_size();
        let content_height = content.scroll_height() as f32;
        if content_height <= 0.0 {
            log::info!("[column] content has no height, skipping");
            return None;
        }

        let engine =
            ColumnEngine::new(content_height, vh, options.reverse, options.controls_shared).ok()?;
        let mode = ModeSwitch::new(vw);
        let starts_desktop = mode.mode() == ViewportMode::Desktop;

        let column = Rc::new(RefCell::new(Column {
            el,
            content,
            original_children,
            engine,
            mode,
            shared,
            line_els: Vec::new(),
            listeners: Vec::new(),
            raf_id: None,
            raf_tick: Rc::new(RefCell::new(None)),
            resize_debounce: None,
            last_frame: Instant::now(),
        }));

        events::wire_column_handlers(&column);

        if starts_desktop {
            Self::prepare_content(&column);
            Self::start_animation(&column);
        } else {
            column.borrow_mut().mark_inert();
        }

        Some(column)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.mode.mode() == ViewportMode::Desktop && !self.engine.is_destroyed()
    }

    /// Duplicate the single-copy content into the scroll buffer and kick
    /// off the deferred line capture. Expects the content to hold exactly
    /// one copy (attach time, or right after the mobile restore).
    pub(crate) fn prepare_content(column: &Rc<RefCell<Column>>) {
        let generation;
        {
            let mut col = column.borrow_mut();
            let Some((_, document)) = dom::window_document() else {
                return;
            };
            let (_, vh) = dom::viewport_size();
            let content_height = col.content.scroll_height() as f32;
            if content_height <= 0.0 {
                log::warn!("[column] no measurable content to duplicate");
                return;
            }
            let plan = match DuplicationPlan::new(content_height, vh) {
                Ok(plan) => plan,
                Err(e) => {
                    log::error!("[column] duplication plan failed: {e}");
                    return;
                }
            };

            // One batched child swap: clones go through a fragment so the
            // layout engine sees a single mutation.
            let fragment = document.create_document_fragment();
            for _ in 0..plan.copies {
                for child in &col.original_children {
                    if let Ok(clone) = child.clone_node_with_deep(true) {
                        let _ = fragment.append_child(&clone);
                    }
                }
            }
            col.content.set_inner_html("");
            let _ = col.content.append_child(&fragment);

            if let Err(e) = col.engine.reset_content(content_height) {
                log::error!("[column] content reset failed: {e}");
                return;
            }
            col.engine.lines.set_viewport_height(vh);
            log::info!(
                "[column] duplicated content x{} (height {content_height})",
                plan.copies
            );
            generation = col.mode.generation();
        }

        // Text splitting finishes after this returns; line capture waits a
        // microtask and then checks it still belongs to this mode epoch.
        let column = column.clone();
        spawn_local(async move {
            Self::capture_lines(column, generation).await;
        });
    }

    async fn capture_lines(column: Rc<RefCell<Column>>, generation: u64) {
        dom::microtask().await;

        let mut col = column.borrow_mut();
        if col.engine.is_destroyed() || col.mode.generation() != generation {
            // A mode switch or teardown won the race; these lines belong to
            // a buffer that no longer exists.
            return;
        }
        let Ok(nodes) = col.content.query_selector_all(SPLIT_WORD_SELECTOR) else {
            return;
        };
        let mut elements = Vec::with_capacity(nodes.length() as usize);
        let mut tops = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) {
                tops.push(el.offset_top() as f32);
                elements.push(el);
            }
        }
        if elements.is_empty() {
            // The split utility has not produced lines (yet); a later
            // capture may still succeed. Valid transient state.
            return;
        }
        col.engine.lines.install(tops);
        col.line_els = elements;
        log::info!("[column] captured {} lines", col.line_els.len());
    }

    pub(crate) fn start_animation(column: &Rc<RefCell<Column>>) {
        column.borrow_mut().stop_animation();

        let tick = column.borrow().raf_tick.clone();
        let tick_clone = tick.clone();
        let column_tick = column.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let mut col = column_tick.borrow_mut();
            if !col.is_active() {
                // Loop terminates by not renewing the request.
                col.raf_id = None;
                return;
            }
            col.frame();
            if let Some(window) = web::window() {
                col.raf_id = window
                    .request_animation_frame(
                        tick_clone.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                    )
                    .ok();
            }
        }) as Box<dyn FnMut()>));

        if let Some(window) = web::window() {
            let id = window
                .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
                .ok();
            let mut col = column.borrow_mut();
            col.raf_id = id;
            col.last_frame = Instant::now();
        }
    }

    pub(crate) fn stop_animation(&mut self) {
        if let (Some(window), Some(id)) = (web::window(), self.raf_id.take()) {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(FRAME_DT_CLAMP_SEC);
        self.last_frame = now;

        let Self {
            engine,
            content,
            line_els,
            shared,
            ..
        } = self;
        let mut surface = DomSurface {
            content,
            lines: line_els,
        };
        engine.frame(dt, &mut surface, &mut shared.borrow_mut());
    }

    /// Re-arm the resize debounce; the latest viewport width wins.
    pub(crate) fn schedule_mode_check(column: &Rc<RefCell<Column>>) {
        let handle = column.clone();
        let timeout = dom::Timeout::new((RESIZE_DEBOUNCE_SEC * 1000.0) as i32, move || {
            let transition = handle.borrow_mut().mode.fire_pending();
            match transition {
                Some(ModeTransition::ToMobile) => Column::enter_mobile(&handle),
                Some(ModeTransition::ToDesktop) => Column::enter_desktop(&handle),
                None => Column::refresh_dimensions(&handle),
            }
        });
        column.borrow_mut().resize_debounce = timeout;
    }

    /// Same-mode resize: captured baselines are stale, recompute them.
    fn refresh_dimensions(column: &Rc<RefCell<Column>>) {
        let generation;
        {
            let mut col = column.borrow_mut();
            if !col.is_active() {
                return;
            }
            let (_, vh) = dom::viewport_size();
            col.engine.lines.set_viewport_height(vh);
            generation = col.mode.generation();
        }
        let column = column.clone();
        spawn_local(async move {
            Self::capture_lines(column, generation).await;
        });
    }

    /// Desktop -> Mobile: stop the loop, restore the single copy, make the
    /// content inert, zero the position. Atomic from the caller's view.
    fn enter_mobile(column: &Rc<RefCell<Column>>) {
        let mut col = column.borrow_mut();
        log::info!("[mode] -> mobile");
        col.stop_animation();
        col.restore_original_content();
        col.mark_inert();
        let _ = col.content.style().set_property("transform", "none");
        col.engine.physics.zero();
        col.engine.lines.clear();
        col.line_els.clear();
        *col.shared.borrow_mut() = ScrollState::default();
    }

    /// Mobile -> Desktop: restore interactivity, re-duplicate, re-measure,
    /// restart the loop.
    fn enter_desktop(column: &Rc<RefCell<Column>>) {
        {
            let col = column.borrow_mut();
            log::info!("[mode] -> desktop");
            let _ = col.content.remove_attribute("aria-hidden");
            let _ = col.content.remove_attribute("tabindex");
            let _ = col.content.style().remove_property("transform");
        }
        Self::prepare_content(column);
        Self::start_animation(column);
    }

    fn mark_inert(&self) {
        let _ = self.content.set_attribute("aria-hidden", "true");
        let _ = self.content.set_attribute("tabindex", "-1");
    }

    fn restore_original_content(&mut self) {
        self.content.set_inner_html("");
        for child in &self.original_children {
            if let Ok(clone) = child.clone_node_with_deep(true) {
                let _ = self.content.append_child(&clone);
            }
        }
    }

    pub(crate) fn el_event_target(&self) -> web::EventTarget {
        self.el.clone().into()
    }

    /// Deterministic teardown: stop the loop, cancel timers, unregister
    /// listeners, neutralize styles. Anything still pending checks the
    /// destroyed flag and bails.
    pub fn destroy(&mut self) {
        self.engine.destroy();
        self.stop_animation();
        self.resize_debounce = None;
        self.listeners.clear();
        let _ = self.content.style().set_property("transform", "none");
        log::info!("[column] destroyed");
    }
}

fn resolve_content(el: &web::HtmlElement) -> Option<web::HtmlElement> {
    let query = if el.class_list().contains("container-projects") {
        PROJECTS_LIST_SELECTOR
    } else {
        COLUMN_CONTENT_SELECTOR
    };
    match el.query_selector(query) {
        Ok(Some(found)) => found.dyn_into().ok(),
        // No dedicated wrapper: the section itself is the content block.
        _ => Some(el.clone()),
    }
}

/// `RenderTarget` over real elements. Writes are already memoized by the
/// engine; this type only translates them into style mutations.
struct DomSurface<'a> {
    content: &'a web::HtmlElement,
    lines: &'a [web::HtmlElement],
}

impl RenderTarget for DomSurface<'_> {
    fn set_transform(&mut self, translate_y_px: f32) {
        let _ = self
            .content
            .style()
            .set_property("transform", &format!("translate3d(0, {translate_y_px:.2}px, 0)"));
    }

    fn write_line(&mut self, index: usize, write: LineWrite) {
        let Some(el) = self.lines.get(index) else {
            return;
        };
        let style = el.style();
        let _ = style.remove_property("transition");
        let value = match write {
            LineWrite::Neutral => "translate3d(0, 0, 0)".to_string(),
            LineWrite::Lateral(x) => format!("translate3d({x:.2}px, 0, 0)"),
        };
        let _ = style.set_property("transform", &value);
    }

    fn reset_lines(&mut self) {
        for el in self.lines {
            let style = el.style();
            let _ = style.set_property("transition", "transform 0.3s ease-out");
            let _ = style.set_property("transform", "translate3d(0, 0, 0)");
        }
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.content.get_bounding_client_rect();
        Rect {
            top: rect.top() as f32,
            left: rect.left() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }

    fn child_count(&self) -> usize {
        self.content.children().length() as usize
    }
}
