use leptos::prelude::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <section id="hero" class="hero" data-dev-name="Hero" data-dev-source=source_hint!()>
            <h1 class="hero-title" data-dev-inspect="" data-dev-name="HeroTitle">
                "Brands and products that feel inevitable."
            </h1>
            <p class="hero-sub">
                "Northlight is a design and engineering studio. We take companies from a blank page to a shipped product."
            </p>
            <div class="hero-actions" data-dev-inspect="" data-dev-name="HeroActions">
                <a href="#work" class="btn btn-primary">"See the work"</a>
                <a href="#careers" class="btn btn-ghost">"Join us"</a>
            </div>
            <img class="hero-art" src="assets/hero.webp" alt="" data-dev-name="HeroArt" />
        </section>
    }
}
