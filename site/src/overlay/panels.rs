use agency_devtools::{Action, AnimationState, Flag, LinkStatus};
use leptos::prelude::*;

use super::OverlaySignals;

pub fn copy_to_clipboard(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.navigator().clipboard().write_text(text);
    }
}

/// Hand the editor URI to the browser. No handler registered means nothing happens.
pub fn open_in_editor(uri: Option<&str>) {
    if let (Some(window), Some(uri)) = (web_sys::window(), uri) {
        let _ = window.location().set_href(uri);
    }
}

/// Bottom strip: environment, breakpoint, viewport, route, errors, quick links.
#[component]
pub fn StatusStrip(signals: OverlaySignals) -> impl IntoView {
    let OverlaySignals {
        state,
        errors,
        status,
        links,
        dispatch,
        ..
    } = signals;

    view! {
        <div class=move || if state.get().is_active { "dev-strip dev-strip-active" } else { "dev-strip" }>
            <span class="dev-env" data-env=move || status.get().environment.label()>
                {move || status.get().environment.label()}
            </span>
            <span class="dev-bp">{move || status.get().breakpoint.name()}</span>
            <span class="dev-size">{move || status.get().viewport_label()}</span>
            <span class="dev-route">{move || status.get().route.path}</span>
            <button
                class="dev-errors-count"
                title="Errors (E)"
                on:click=move |_| dispatch.run(Action::Toggle(Flag::Errors))
            >
                {move || format!("{} err", errors.get().len())}
            </button>
            <span class="dev-links">
                {move || {
                    links
                        .get()
                        .into_iter()
                        .map(|report| {
                            let dot = match report.status {
                                LinkStatus::Up => "dev-dot dev-dot--up",
                                LinkStatus::Down => "dev-dot dev-dot--down",
                                LinkStatus::Unknown => "dev-dot",
                            };
                            view! {
                                <a href=report.link.url.clone() target="_blank" class="dev-link">
                                    <span class=dot></span>
                                    {report.link.label}
                                </a>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </span>
            <button class="dev-toggle" on:click=move |_| dispatch.run(Action::ToggleActive)>
                {move || if state.get().is_active { "Dev on" } else { "Dev (Ctrl+Shift+G)" }}
            </button>
        </div>
    }
}

#[component]
pub fn TogglePanel(signals: OverlaySignals) -> impl IntoView {
    let OverlaySignals { state, dispatch, .. } = signals;

    let rows = Flag::ALL
        .iter()
        .enumerate()
        .map(|(i, &flag)| {
            let shortcut = match flag {
                Flag::Errors => "E".to_string(),
                _ => (i + 1).to_string(),
            };
            view! {
                <label class="dev-flag">
                    <input
                        type="checkbox"
                        prop:checked=move || state.get().flag(flag)
                        on:change=move |_| dispatch.run(Action::Toggle(flag))
                    />
                    <kbd>{shortcut}</kbd>
                    {flag.label()}
                </label>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="dev-panel dev-toggles">
            <h4>"Design QA"</h4>
            {rows}
            <button class="dev-anim" on:click=move |_| dispatch.run(Action::CycleAnimation)>
                {move || match state.get().animation {
                    AnimationState::Normal => "Animations: normal (P)",
                    AnimationState::Paused => "Animations: paused (P)",
                    AnimationState::Slow => "Animations: slow (P)",
                }}
            </button>
            <p class="dev-hint">"Alt+click copies the path, Alt+Shift+click opens the source"</p>
        </div>
    }
}

#[component]
pub fn ErrorPanel(signals: OverlaySignals) -> impl IntoView {
    let OverlaySignals { errors, dispatch, .. } = signals;

    view! {
        <div class="dev-panel dev-errors">
            <h4>
                "Runtime errors"
                <button on:click=move |_| dispatch.run(Action::ClearErrors)>"Clear"</button>
            </h4>
            {move || {
                let list = errors.get();
                if list.is_empty() {
                    return view! { <p class="dev-hint">"No errors captured."</p> }.into_any();
                }
                view! {
                    <ol>
                        {list
                            .into_iter()
                            .map(|record| {
                                view! {
                                    <li>
                                        <time>{record.time_label()}</time>
                                        <span class="dev-error-msg">{record.message}</span>
                                        {record.source.map(|s| view! { <code>{s}</code> })}
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </ol>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
pub fn InspectorPanel(signals: OverlaySignals) -> impl IntoView {
    let inspection = signals.inspection;

    move || {
        inspection.get().map(|current| {
            let el = current.element;
            let (x, y) = current.position;
            let rect = el.rect;
            view! {
                <div
                    class="dev-highlight"
                    style=format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px",
                        rect.x, rect.y, rect.width, rect.height
                    )
                ></div>
                <div class="dev-panel dev-inspector" style=format!("left:{x}px;top:{y}px")>
                    <strong>{el.label.clone()}</strong>
                    <span class="dev-tag">{format!("<{}>", el.tag)}</span>
                    <dl>
                        <dt>"size"</dt>
                        <dd>{el.size_label()}</dd>
                        <dt>"padding"</dt>
                        <dd>{el.metrics.padding.shorthand()}</dd>
                        <dt>"margin"</dt>
                        <dd>{el.metrics.margin.shorthand()}</dd>
                    </dl>
                    <p class="dev-crumbs">{el.copy_path()}</p>
                    {el.source.clone().map(|s| view! { <code class="dev-source">{s}</code> })}
                </div>
            }
        })
    }
}
