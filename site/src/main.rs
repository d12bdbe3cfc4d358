// Northlight Studio site, Leptos 0.8 CSR.
// The dev overlay is compiled into debug builds only.

mod sections;

#[cfg(debug_assertions)]
mod overlay;

use leptos::prelude::*;
use sections::*;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

#[component]
fn App() -> impl IntoView {
    view! {
        <Nav />
        <main>
            <Hero />
            <Services />
            <Work />
            <Careers />
        </main>
        <Footer />
        {dev_overlay()}
    }
}

#[cfg(debug_assertions)]
fn dev_overlay() -> impl IntoView {
    view! { <overlay::DevOverlay /> }
}

#[cfg(not(debug_assertions))]
fn dev_overlay() -> impl IntoView {}
