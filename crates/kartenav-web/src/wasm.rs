#![forbid(unsafe_code)]

use crate::dom::DomGeometry;
use crate::input::{ConfigOverrides, NavEvent, NavRecord};
use kartenav_core::clock::Timestamp;
use kartenav_core::sync::{ScrollSync, SyncCommand, SyncConfig};
use wasm_bindgen::prelude::*;
use web_sys::{Element, ScrollBehavior, ScrollToOptions};

/// Scroll-synchronized sticky tab navigation bound to a live page.
///
/// JS wiring:
/// - forward `scroll`/`resize`/`wheel`/`touchmove`/`keydown`/`scrollend`
///   and UI events through [`input`](KartenavWeb::input) (or the direct
///   methods on hot paths),
/// - call [`on_frame`](KartenavWeb::on_frame) from a `requestAnimationFrame`
///   loop; queued smooth scrolls are executed there,
/// - read [`active_id`](KartenavWeb::active_id) to render the highlight.
#[wasm_bindgen]
pub struct KartenavWeb {
    sync: ScrollSync,
    geometry: DomGeometry,
    strip: Element,
}

#[wasm_bindgen]
impl KartenavWeb {
    /// Create a controller for the ordered category `ids`.
    ///
    /// Each section element carries its category id as the DOM id, each
    /// tab element `tab-<id>`. `strip` is the horizontally scrollable tab
    /// row. `options` is an optional JSON object of configuration
    /// overrides (see the `input` module).
    #[wasm_bindgen(constructor)]
    pub fn new(
        ids: Vec<String>,
        strip: Element,
        options: Option<String>,
    ) -> Result<KartenavWeb, JsValue> {
        let mut config = SyncConfig::default();
        if let Some(json) = options {
            let overrides = ConfigOverrides::from_json(&json)
                .map_err(|err| JsValue::from_str(&format!("invalid options: {err}")))?;
            config = overrides.apply(config);
        }
        let geometry = DomGeometry::new(strip.clone(), 0.0)
            .ok_or_else(|| JsValue::from_str("no window/document available"))?;
        Ok(Self {
            sync: ScrollSync::new(ids, config),
            geometry,
            strip,
        })
    }

    /// Handle one JSON event record (see the `input` module schema).
    pub fn input(&mut self, record: &str) -> Result<(), JsValue> {
        let record = NavRecord::from_json(record)
            .map_err(|err| JsValue::from_str(&format!("invalid event record: {err}")))?;
        let now = Timestamp::from_millis(record.now_ms);
        match record.event {
            NavEvent::Scroll => self.sync.on_scroll(),
            NavEvent::Resize => self.sync.on_resize(),
            NavEvent::ScrollSettled => self.sync.on_scroll_settled(&self.geometry),
            NavEvent::TabClick { ref id } => self.sync.on_tab_click(id, &self.geometry, now),
            NavEvent::Sheet { open } => self.sync.set_suspended(open, now),
            ref gesture @ (NavEvent::Wheel | NavEvent::TouchMove | NavEvent::Key { .. }) => {
                if let Some(gesture) = gesture.to_gesture() {
                    self.sync.on_gesture(gesture, &self.geometry);
                }
            }
        }
        Ok(())
    }

    /// Hot-path shortcut for the passive `scroll` listener.
    #[wasm_bindgen(js_name = onScroll)]
    pub fn on_scroll(&mut self) {
        self.sync.on_scroll();
    }

    /// Hot-path shortcut for the `resize` listener.
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&mut self) {
        self.sync.on_resize();
    }

    /// A tab was clicked.
    #[wasm_bindgen(js_name = tabClick)]
    pub fn tab_click(&mut self, id: &str, now_ms: f64) {
        self.sync
            .on_tab_click(id, &self.geometry, Timestamp::from_millis(now_ms));
    }

    /// The detail sheet opened or closed.
    #[wasm_bindgen(js_name = setSheetOpen)]
    pub fn set_sheet_open(&mut self, open: bool, now_ms: f64) {
        self.sync.set_suspended(open, Timestamp::from_millis(now_ms));
    }

    /// Per-animation-frame driver; executes queued smooth scrolls.
    #[wasm_bindgen(js_name = onFrame)]
    pub fn on_frame(&mut self, now_ms: f64) {
        self.sync
            .on_frame(&self.geometry, Timestamp::from_millis(now_ms));
        for command in self.sync.take_commands() {
            self.execute(command);
        }
    }

    /// The id the tab strip should highlight, or `None` for an empty
    /// category sequence.
    #[wasm_bindgen(js_name = activeId)]
    #[must_use]
    pub fn active_id(&self) -> Option<String> {
        self.sync.visual_active().map(str::to_owned)
    }

    /// Whether a tab click currently overrides the highlight.
    #[wasm_bindgen(js_name = isLocked)]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.sync.is_locked()
    }

    /// Whether the detail sheet currently suspends tracking.
    #[wasm_bindgen(js_name = isSuspended)]
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.sync.is_suspended()
    }

    fn execute(&self, command: SyncCommand) {
        let options = ScrollToOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        match command {
            SyncCommand::ScrollPageTo { top } => {
                options.set_top(top);
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_scroll_to_options(&options);
                }
            }
            SyncCommand::ScrollStripTo { left } => {
                options.set_left(left);
                self.strip.scroll_to_with_scroll_to_options(&options);
            }
        }
    }
}
