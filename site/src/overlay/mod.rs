//! Browser shell for the dev overlay.
//!
//! Owns one [`agency_devtools::DevOverlay`] bound to `<html>`, forwards window
//! events into it and renders the panels from signals. Everything it
//! registers lives in [`Bindings`] and is released on cleanup.

mod dom;
mod links;
mod panels;

use agency_devtools::inspector::{InspectedElement, panel_position};
use agency_devtools::{
    Action, DevOverlay as Overlay, ErrorRecord, LinkReport, OverlayConfig, StatusBar, Subscription,
    ToggleState,
};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use dom::{DocumentRoot, DomNode, WindowListener};
use panels::{ErrorPanel, InspectorPanel, StatusStrip, TogglePanel};

/// Approximate inspector panel size used for edge flipping.
const PANEL_SIZE: (f64, f64) = (300.0, 170.0);

type SiteOverlay = Overlay<DocumentRoot>;

/// Registered listeners, store subscription and the liveness interval.
#[derive(Default)]
struct Bindings {
    listeners: Vec<WindowListener>,
    subscriptions: Vec<Subscription>,
    interval: Option<IntervalHandle>,
}

impl Drop for Bindings {
    fn drop(&mut self) {
        if let Some(handle) = self.interval.take() {
            handle.clear();
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Inspection {
    pub element: InspectedElement,
    pub position: (f64, f64),
    pub editor_link: Option<String>,
}

/// Reactive view of the overlay, shared by the panels.
#[derive(Clone, Copy)]
pub struct OverlaySignals {
    pub state: RwSignal<ToggleState>,
    pub errors: RwSignal<Vec<ErrorRecord>>,
    pub status: RwSignal<StatusBar>,
    pub inspection: RwSignal<Option<Inspection>>,
    pub links: RwSignal<Vec<LinkReport>>,
    pub dispatch: Callback<Action>,
}

fn config() -> OverlayConfig {
    let mut config = OverlayConfig::default();
    if let Some(scheme) = option_env!("OVERLAY_EDITOR_SCHEME") {
        config.editor_scheme = scheme.to_string();
    }
    if let Some(root) = option_env!("OVERLAY_PROJECT_ROOT") {
        config.project_root = root.to_string();
    }
    config
}

#[component]
pub fn DevOverlay() -> impl IntoView {
    let Some(root) = DocumentRoot::current() else {
        web_sys::console::warn_1(&"dev overlay: no document element".into());
        return view! { "" }.into_any();
    };
    let config = config();
    let quick_links = config.links.clone();

    let mut overlay = Overlay::new(root, config);
    overlay.mount();

    let (width, height) = dom::viewport_size();
    let (host, path) = dom::location();
    let state = RwSignal::new(overlay.state().clone());
    let errors = RwSignal::new(Vec::new());
    let status = RwSignal::new(StatusBar::new(width, height, &host, &path));
    let inspection = RwSignal::new(None::<Inspection>);
    let links = RwSignal::new(agency_devtools::liveness::initial_reports(&quick_links));

    let mut bindings = Bindings::default();
    bindings
        .subscriptions
        .push(overlay.changes().subscribe(move |s: &ToggleState| state.set(s.clone())));

    let overlay: StoredValue<SiteOverlay, LocalStorage> = StoredValue::new_local(overlay);

    let refresh_errors = move || {
        if let Some(list) = overlay.try_with_value(SiteOverlay::errors) {
            errors.set(list);
        }
    };

    let dispatch = Callback::new(move |action: Action| {
        overlay.try_update_value(|o| o.dispatch(action));
        if action == Action::ClearErrors {
            refresh_errors();
        }
        if !state.get_untracked().is_active {
            inspection.set(None);
        }
    });

    bindings.listeners.extend(
        [
            WindowListener::on_window("keydown", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                let press = dom::key_press(event);
                let focus = dom::focus_target();
                let action = overlay
                    .try_update_value(|o| o.handle_key(&press, focus))
                    .flatten();
                if let Some(action) = action {
                    event.prevent_default();
                    if action == Action::ClearErrors {
                        refresh_errors();
                    }
                    if !state.get_untracked().is_active {
                        inspection.set(None);
                    }
                }
            }),
            WindowListener::on_window("error", move |event| {
                if let Some(event) = event.dyn_ref::<web_sys::ErrorEvent>() {
                    overlay.with_value(|o| o.record_error(dom::error_event(event)));
                    refresh_errors();
                }
            }),
            WindowListener::on_window("unhandledrejection", move |event| {
                if let Some(event) = event.dyn_ref::<web_sys::PromiseRejectionEvent>() {
                    overlay.with_value(|o| o.record_error(dom::rejection_event(event)));
                    refresh_errors();
                }
            }),
            WindowListener::on_window("resize", move |_| {
                let (w, h) = dom::viewport_size();
                status.update(|s| s.resized(w, h));
            }),
            WindowListener::on_window("popstate", move |_| {
                let (_, path) = dom::location();
                status.update(|s| s.navigated(&path));
            }),
            WindowListener::on_window("hashchange", move |_| {
                let (_, path) = dom::location();
                status.update(|s| s.navigated(&path));
            }),
            WindowListener::on_window("mousemove", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() else {
                    return;
                };
                let target = event.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok());
                let Some(target) = target.filter(|t| !dom::is_overlay_ui(t)) else {
                    return;
                };
                let cursor = (f64::from(event.client_x()), f64::from(event.client_y()));
                let (vw, vh) = dom::viewport_size();
                let next = overlay
                    .try_with_value(|o| {
                        let element = o.inspect(DomNode(target))?;
                        let editor_link = o.editor_link(&element);
                        Some(Inspection {
                            element,
                            position: panel_position(cursor, PANEL_SIZE, (f64::from(vw), f64::from(vh))),
                            editor_link,
                        })
                    })
                    .flatten();
                inspection.set(next);
            }),
            WindowListener::on_window("click", move |event| {
                let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() else {
                    return;
                };
                if !mouse.alt_key() {
                    return;
                }
                let Some(current) = inspection.get_untracked() else {
                    return;
                };
                event.prevent_default();
                if mouse.shift_key() {
                    panels::open_in_editor(current.editor_link.as_deref());
                } else {
                    panels::copy_to_clipboard(&current.element.copy_path());
                }
            }),
        ]
        .into_iter()
        .flatten(),
    );

    bindings.interval = links::start_polling(quick_links, links);

    let bindings = StoredValue::new_local(bindings);
    on_cleanup(move || {
        bindings.dispose();
        overlay.try_update_value(SiteOverlay::unmount);
        overlay.dispose();
    });

    let signals = OverlaySignals {
        state,
        errors,
        status,
        inspection,
        links,
        dispatch,
    };

    view! {
        <div data-dev-overlay="">
            <StatusStrip signals=signals />
            {move || state.get().is_active.then(|| view! { <TogglePanel signals=signals /> })}
            {move || {
                let s = state.get();
                (s.is_active && s.show_errors).then(|| view! { <ErrorPanel signals=signals /> })
            }}
            <InspectorPanel signals=signals />
        </div>
    }
    .into_any()
}
