//! Quick-links liveness in the browser: every link fetched at once, each with
//! its own abort timer, rerun on an interval that the overlay clears on cleanup.

use agency_devtools::liveness::{
    DEFAULT_CHECK_TIMEOUT, DEFAULT_POLL_INTERVAL, LinkReport, LinkStatus, QuickLink,
};
use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, RequestInit, RequestMode};

/// Opaque (`no-cors`) responses still count: the server answered.
async fn is_up(url: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(controller) = AbortController::new() else {
        return false;
    };

    let init = RequestInit::new();
    init.set_mode(RequestMode::NoCors);
    init.set_signal(Some(&controller.signal()));

    let abort = Closure::once_into_js(move || controller.abort());
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        abort.unchecked_ref(),
        DEFAULT_CHECK_TIMEOUT.as_millis() as i32,
    );

    JsFuture::from(window.fetch_with_str_and_init(url, &init))
        .await
        .is_ok()
}

fn check_round(quick_links: Vec<QuickLink>, links: RwSignal<Vec<LinkReport>>) {
    spawn_local(async move {
        let checks = quick_links.into_iter().map(|link| async move {
            let status = LinkStatus::from_reachable(is_up(&link.url).await);
            LinkReport { link, status }
        });
        links.set(join_all(checks).await);
    });
}

/// First round immediately, then every [`DEFAULT_POLL_INTERVAL`].
pub fn start_polling(
    quick_links: Vec<QuickLink>,
    links: RwSignal<Vec<LinkReport>>,
) -> Option<IntervalHandle> {
    check_round(quick_links.clone(), links);
    match set_interval_with_handle(
        move || check_round(quick_links.clone(), links),
        DEFAULT_POLL_INTERVAL,
    ) {
        Ok(handle) => Some(handle),
        Err(err) => {
            web_sys::console::warn_2(&"dev overlay: liveness polling disabled".into(), &err);
            None
        }
    }
}
