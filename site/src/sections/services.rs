use leptos::prelude::*;

const SERVICES: &[(&str, &str)] = &[
    ("Brand", "Positioning, identity systems and the guidelines that keep them honest."),
    ("Product", "Research, interaction design and design systems built to be maintained."),
    ("Engineering", "Fast sites and apps, CMS integrations, performance budgets that hold."),
];

#[component]
pub fn Services() -> impl IntoView {
    view! {
        <section id="services" class="services" data-dev-name="Services" data-dev-source=source_hint!()>
            <h2>"What we do"</h2>
            <div class="service-grid">
                {SERVICES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <article class="service-card" data-dev-inspect="" data-dev-name="ServiceCard">
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </article>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}
