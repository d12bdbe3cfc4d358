use leptos::prelude::*;

#[component]
pub fn Careers() -> impl IntoView {
    let (email, set_email) = signal(String::new());

    view! {
        <section id="careers" class="careers" data-dev-name="Careers" data-dev-source=source_hint!()>
            <h2>"Careers"</h2>
            <p>"We hire slowly and keep people for a long time. Open roles are listed below."</p>
            <ul class="jobs" data-dev-inspect="" data-dev-name="JobList">
                <li><a href="/careers/senior-product-designer">"Senior Product Designer"</a></li>
                <li><a href="/careers/rust-engineer">"Rust Engineer"</a></li>
            </ul>
            <form class="job-alert" data-dev-inspect="" data-dev-name="JobAlertForm" on:submit=|ev| ev.prevent_default()>
                <input
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <button type="submit">"Notify me"</button>
            </form>
        </section>
    }
}
