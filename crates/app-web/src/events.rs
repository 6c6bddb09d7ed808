//! Listener wiring for a column: wheel and resize at the window, hover and
//! touch on the section element. Every listener handle lands back on the
//! column so teardown unregisters them all.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::column::Column;
use crate::dom;

pub fn wire_column_handlers(column: &Rc<RefCell<Column>>) {
    let Some((window, _document)) = dom::window_document() else {
        return;
    };
    let window_target: &web::EventTarget = window.as_ref();
    let el_target = column.borrow().el_event_target();
    let mut listeners = Vec::new();

    // Wheel is window-level and non-passive: the page itself never
    // scrolls, the columns do.
    {
        let column = column.clone();
        listeners.push(dom::Listener::new(window_target, "wheel", false, move |ev| {
            let Some(wheel) = ev.dyn_ref::<web::WheelEvent>() else {
                return;
            };
            ev.prevent_default();
            let mut col = column.borrow_mut();
            if !col.is_active() {
                return;
            }
            let delta = -wheel.delta_y() as f32;
            col.engine.on_wheel(delta);
        }));
    }

    // Resize feeds the debounced mode switch.
    {
        let column = column.clone();
        listeners.push(dom::Listener::new(window_target, "resize", true, move |_ev| {
            let (vw, _) = dom::viewport_size();
            column.borrow_mut().mode.observe_resize(vw);
            Column::schedule_mode_check(&column);
        }));
    }

    // Hovering a column suspends its idle drift.
    {
        let column = column.clone();
        listeners.push(dom::Listener::new(&el_target, "mouseenter", true, move |_ev| {
            column.borrow_mut().engine.pause();
        }));
    }
    {
        let column = column.clone();
        listeners.push(dom::Listener::new(&el_target, "mouseleave", true, move |_ev| {
            column.borrow_mut().engine.resume();
        }));
    }

    // Touch drives the target directly; start/end bracket the idle drift.
    {
        let column = column.clone();
        listeners.push(dom::Listener::new(&el_target, "touchstart", true, move |ev| {
            if let Some(y) = first_touch_y(&ev) {
                column.borrow_mut().engine.on_touch_start(y);
            }
        }));
    }
    {
        let column = column.clone();
        listeners.push(dom::Listener::new(&el_target, "touchmove", true, move |ev| {
            let Some(y) = first_touch_y(&ev) else {
                return;
            };
            let mut col = column.borrow_mut();
            if !col.is_active() {
                return;
            }
            col.engine.on_touch_move(y);
        }));
    }
    {
        let column = column.clone();
        listeners.push(dom::Listener::new(&el_target, "touchend", true, move |_ev| {
            column.borrow_mut().engine.on_touch_end();
        }));
    }

    column.borrow_mut().listeners = listeners;
}

#[inline]
fn first_touch_y(ev: &web::Event) -> Option<f32> {
    let touch_ev = ev.dyn_ref::<web::TouchEvent>()?;
    let touch = touch_ev.touches().get(0)?;
    Some(touch.client_y() as f32)
}
