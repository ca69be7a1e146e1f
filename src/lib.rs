#![cfg(target_arch = "wasm32")]
use nebula_core::{Lifecycle, NebulaConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod canvas;
mod constants;
mod css;
mod dom;
mod frame;

use constants::DEFAULT_CANVAS_ID;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("nebula-web loaded");
    Ok(())
}

/// Handle to a mounted backdrop.
///
/// Inert when the page had no usable canvas: every method is then a no-op.
#[wasm_bindgen]
pub struct NebulaBackground {
    mounted: Option<Rc<RefCell<frame::Mounted>>>,
}

#[wasm_bindgen]
impl NebulaBackground {
    /// Mount with default settings on `canvas_id` (or `#nebula-canvas`).
    pub fn mount(canvas_id: Option<String>) -> NebulaBackground {
        Self::mount_inner(canvas_id, NebulaConfig::default())
    }

    /// Mount with a JSON configuration; malformed or invalid JSON throws.
    #[wasm_bindgen(js_name = mountWithConfig)]
    pub fn mount_with_config(
        canvas_id: Option<String>,
        config_json: &str,
    ) -> Result<NebulaBackground, JsValue> {
        let config =
            NebulaConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::mount_inner(canvas_id, config))
    }

    fn mount_inner(canvas_id: Option<String>, config: NebulaConfig) -> NebulaBackground {
        let id = canvas_id.as_deref().unwrap_or(DEFAULT_CANVAS_ID);
        let mounted = match frame::mount(id, config) {
            Ok(m) => m,
            Err(e) => {
                log::error!("mount error: {e:?}");
                None
            }
        };
        NebulaBackground { mounted }
    }

    pub fn start(&self) {
        if let Some(m) = &self.mounted {
            if let Err(e) = m.borrow_mut().anim.start() {
                log::warn!("start ignored: {e}");
            }
        }
    }

    pub fn stop(&self) {
        if let Some(m) = &self.mounted {
            if let Err(e) = m.borrow_mut().anim.stop() {
                log::warn!("stop ignored: {e}");
            }
        }
    }

    /// Stop if needed and release the canvas; the handle becomes inert.
    pub fn dispose(&mut self) {
        if let Some(m) = self.mounted.take() {
            if let Err(e) = m.borrow_mut().anim.dispose() {
                log::warn!("dispose: {e}");
            }
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.borrow().anim.state() == Lifecycle::Running)
    }
}

impl Drop for NebulaBackground {
    fn drop(&mut self) {
        self.dispose();
    }
}
