use leptos::prelude::*;

#[component]
pub fn Nav() -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);

    view! {
        <nav class="nav" data-dev-name="Nav" data-dev-source=source_hint!()>
            <div class="nav-inner">
                <a href="/" class="nav-brand" data-dev-inspect="" data-dev-name="Brand">
                    "Northlight"
                    <span class="nav-brand-dot">"."</span>
                </a>
                <button
                    class=move || if menu_open.get() { "nav-menu open" } else { "nav-menu" }
                    aria-label="Menu"
                    on:click=move |_| set_menu_open.update(|o| *o = !*o)
                >
                    {move || if menu_open.get() { "Close" } else { "Menu" }}
                </button>
                <div class="nav-links" class:open=move || menu_open.get()>
                    <a href="#services" class="nav-link">"Services"</a>
                    <a href="#work" class="nav-link">"Work"</a>
                    <a href="#careers" class="nav-link">"Careers"</a>
                    <a href="mailto:hello@northlight.studio" class="nav-cta">"Start a project"</a>
                </div>
            </div>
        </nav>
    }
}
