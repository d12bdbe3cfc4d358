//! web-sys bindings for the headless overlay types.

use agency_devtools::errors::ErrorEvent;
use agency_devtools::inspector::{BoxMetrics, Edges, InspectNode, Rect};
use agency_devtools::keyboard::{FocusTarget, KeyPress};
use agency_devtools::RootAttributes;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, EventTarget, HtmlElement};

/// `<html>` as the attribute root.
pub struct DocumentRoot(Element);

impl DocumentRoot {
    pub fn current() -> Option<Self> {
        let element = web_sys::window()?.document()?.document_element()?;
        Some(Self(element))
    }
}

impl RootAttributes for DocumentRoot {
    fn set_attribute(&mut self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn remove_attribute(&mut self, name: &str) {
        let _ = self.0.remove_attribute(name);
    }
}

/// Element under the pointer.
#[derive(Clone)]
pub struct DomNode(pub Element);

fn px(style: &web_sys::CssStyleDeclaration, prop: &str) -> f64 {
    style
        .get_property_value(prop)
        .ok()
        .and_then(|v| v.trim().trim_end_matches("px").parse().ok())
        .unwrap_or(0.0)
}

fn edges(style: &web_sys::CssStyleDeclaration, prefix: &str) -> Edges {
    Edges {
        top: px(style, &format!("{prefix}-top")),
        right: px(style, &format!("{prefix}-right")),
        bottom: px(style, &format!("{prefix}-bottom")),
        left: px(style, &format!("{prefix}-left")),
    }
}

impl InspectNode for DomNode {
    fn tag_name(&self) -> String {
        self.0.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(DomNode)
    }

    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect {
            x: r.x(),
            y: r.y(),
            width: r.width(),
            height: r.height(),
        }
    }

    fn box_metrics(&self) -> BoxMetrics {
        let rect = self.bounding_rect();
        let style = web_sys::window().and_then(|w| w.get_computed_style(&self.0).ok().flatten());
        match style {
            Some(style) => BoxMetrics {
                padding: edges(&style, "padding"),
                margin: edges(&style, "margin"),
                width: rect.width,
                height: rect.height,
            },
            None => BoxMetrics {
                width: rect.width,
                height: rect.height,
                ..BoxMetrics::default()
            },
        }
    }
}

/// Classify `document.activeElement`.
pub fn focus_target() -> FocusTarget {
    let Some(active) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element())
    else {
        return FocusTarget::None;
    };
    let editable = active
        .dyn_ref::<HtmlElement>()
        .is_some_and(HtmlElement::is_content_editable);
    let input_type = active.get_attribute("type");
    FocusTarget::classify(&active.tag_name(), input_type.as_deref(), editable)
}

pub fn key_press(event: &web_sys::KeyboardEvent) -> KeyPress {
    let mut press = KeyPress::key(event.key());
    press.ctrl = event.ctrl_key();
    press.meta = event.meta_key();
    press.shift = event.shift_key();
    press.alt = event.alt_key();
    press
}

pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

pub fn error_event(event: &web_sys::ErrorEvent) -> ErrorEvent {
    let filename = event.filename();
    ErrorEvent::Error {
        message: event.message(),
        filename: (!filename.is_empty()).then_some(filename),
        line: Some(event.lineno()).filter(|l| *l > 0),
        column: Some(event.colno()).filter(|c| *c > 0),
        timestamp_ms: now_ms(),
    }
}

pub fn rejection_event(event: &web_sys::PromiseRejectionEvent) -> ErrorEvent {
    let reason = event.reason();
    let text = if let Some(err) = reason.dyn_ref::<js_sys::Error>() {
        String::from(err.message())
    } else if let Some(s) = reason.as_string() {
        s
    } else {
        js_sys::JSON::stringify(&reason)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_else(|| "unhandled rejection".to_string())
    };
    ErrorEvent::rejection(text, now_ms())
}

pub fn viewport_size() -> (u32, u32) {
    let Some(window) = web_sys::window() else {
        return (0, 0);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

pub fn location() -> (String, String) {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return (String::new(), "/".to_string());
    };
    let host = location.hostname().unwrap_or_default();
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let hash = location.hash().unwrap_or_default();
    (host, format!("{path}{hash}"))
}

/// Whether `element` belongs to the overlay's own UI.
pub fn is_overlay_ui(element: &Element) -> bool {
    matches!(element.closest("[data-dev-overlay]"), Ok(Some(_)))
}

/// `addEventListener` that removes itself on drop.
pub struct WindowListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl WindowListener {
    pub fn on_window(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Option<Self> {
        let target: EventTarget = web_sys::window()?.into();
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target,
            event,
            closure,
        })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
