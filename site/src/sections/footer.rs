use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer" data-dev-name="Footer" data-dev-source=source_hint!()>
            <span>"© Northlight Studio"</span>
            <a href="mailto:hello@northlight.studio">"hello@northlight.studio"</a>
        </footer>
    }
}
