#![cfg(target_arch = "wasm32")]

pub mod column;
pub mod constants;
pub mod distortion;
pub mod dom;
pub mod events;
pub mod layout;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use app_core::ScrollState;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::column::{Column, ColumnOptions};
use crate::constants::{BIO_SECTION_ID, PROJECTS_CONTAINER_SELECTOR};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let (_window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;

    // One shared scroll state per page: the bio column writes it, the
    // reversed projects column and the distortion layer read it.
    let shared = Rc::new(RefCell::new(ScrollState::default()));

    match document.get_element_by_id(BIO_SECTION_ID) {
        Some(el) => {
            if Column::attach(
                el,
                ColumnOptions {
                    reverse: false,
                    controls_shared: true,
                },
                shared.clone(),
            )
            .is_none()
            {
                log::warn!("[init] bio column skipped");
            }
        }
        None => log::info!("[init] no bio section on this page"),
    }

    match document.query_selector(PROJECTS_CONTAINER_SELECTOR) {
        Ok(Some(el)) => {
            if Column::attach(
                el,
                ColumnOptions {
                    reverse: true,
                    controls_shared: false,
                },
                shared.clone(),
            )
            .is_none()
            {
                log::warn!("[init] projects column skipped");
            }
        }
        _ => log::info!("[init] no projects container on this page"),
    }

    // The distortion layer keeps itself alive through its render loop; the
    // returned context exposes cleanup() for explicit teardown.
    let _distortion = distortion::init(&document, shared.clone()).await;

    Ok(())
}
