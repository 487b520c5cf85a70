//! WebAssembly entry point and platform-specific code.

use std::cell::{Cell, RefCell};

use huering_core::{DragGate, ListenerId, PickerConfig, ScrollBlocker};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type TouchListener = Closure<dyn FnMut(web_sys::Event)>;

/// Suppresses page scrolling on touch devices while a picker is dragged.
///
/// Each attached gate gets its own non-passive `touchmove` listener on the
/// window; the listener cancels the event whenever the gate is set.
pub struct WebScrollBlocker {
    window: web_sys::Window,
    listeners: RefCell<Vec<(ListenerId, TouchListener)>>,
    next_id: Cell<u64>,
}

impl WebScrollBlocker {
    /// Returns `None` outside a browser window.
    pub fn new() -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }
}

impl ScrollBlocker for WebScrollBlocker {
    fn attach(&self, gate: DragGate) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let listener = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if gate.is_dragging() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);

        // Passive listeners cannot cancel scrolling.
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(false);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                listener.as_ref().unchecked_ref(),
                &options,
            )
        {
            log::warn!("Failed to add touchmove listener: {:?}", e);
        }

        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn detach(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(pos) = listeners.iter().position(|(lid, _)| *lid == id) {
            let (_, listener) = listeners.remove(pos);
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("touchmove", listener.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove touchmove listener: {:?}", e);
            }
        }
    }
}

/// Find or create the canvas the app renders into.
///
/// The canvas is placed inside the `#app` element so the page around it
/// stays scrollable.
pub fn canvas_element(width: u32, height: u32) -> Option<web_sys::HtmlCanvasElement> {
    let web_window = web_sys::window()?;
    let document = web_window.document()?;

    if let Some(loading) = document.get_element_by_id("loading") {
        loading.remove();
    }

    let canvas = document
        .get_element_by_id("huering-canvas")
        .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .or_else(|| {
            let parent = document
                .get_element_by_id("app")
                .or_else(|| document.body().map(Into::into))?;
            let canvas = document.create_element("canvas").ok()?;
            canvas.set_id("huering-canvas");
            parent.append_child(&canvas).ok()?;
            canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()
        })?;

    let dpr = web_window.device_pixel_ratio();
    canvas.set_width((width as f64 * dpr) as u32);
    canvas.set_height((height as f64 * dpr) as u32);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", width));
    let _ = style.set_property("height", &format!("{}px", height));
    let _ = style.set_property("display", "block");

    log::info!("Canvas created: {}x{} (dpr: {})", width, height, dpr);
    Some(canvas)
}

/// Trigger a browser download of a text file.
pub fn download_text(filename: &str, content: &str, mime_type: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(content));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(filename);
    a.click();

    web_sys::Url::revoke_object_url(&url).ok();
    Ok(())
}

/// Read a picker configuration from the `config` query parameter, if any.
///
/// The value is URL-encoded JSON, e.g. `?config={"size":300}`.
fn picker_config_from_url() -> Option<PickerConfig> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let json = params.get("config")?;
    match PickerConfig::from_json(&json) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring config from URL: {}", e);
            None
        }
    }
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub async fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        let message = format!("Failed to initialize logger: {}", e);
        web_sys::console::error_1(&JsValue::from_str(&message));
    }

    log::info!("Starting HueRing (WASM)");

    let mut config = crate::AppConfig::default();
    if let Some(picker) = picker_config_from_url() {
        config.picker = picker;
    }

    crate::App::run(config).await;
}
