use leptos::prelude::*;

struct Study {
    client: &'static str,
    title: &'static str,
    metric: &'static str,
    slug: &'static str,
}

const STUDIES: &[Study] = &[
    Study {
        client: "Harbor Co",
        title: "A 90-year-old shipping firm, rebuilt for search",
        metric: "+64% organic traffic",
        slug: "harbor-rebrand",
    },
    Study {
        client: "Fernway",
        title: "Booking flow redesign for a rail operator",
        metric: "-31% checkout abandonment",
        slug: "fernway-booking",
    },
];

#[component]
pub fn Work() -> impl IntoView {
    view! {
        <section id="work" class="work" data-dev-name="Work" data-dev-source=source_hint!()>
            <h2>"Selected work"</h2>
            {STUDIES
                .iter()
                .map(|s| {
                    view! {
                        <a class="study" href=format!("/work/{}", s.slug) data-dev-inspect="" data-dev-name="CaseStudyCard">
                            <span class="study-client">{s.client}</span>
                            <h3>{s.title}</h3>
                            <span class="study-metric">{s.metric}</span>
                        </a>
                    }
                })
                .collect::<Vec<_>>()}
        </section>
    }
}
