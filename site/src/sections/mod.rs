// Page sections. Each carries `data-dev-*` markers for the inspector.

/// `data-dev-source` value pointing at the invocation site.
macro_rules! source_hint {
    () => {
        concat!("site/", file!(), ":", line!())
    };
}

mod careers;
mod footer;
mod hero;
mod nav;
mod services;
mod work;

pub use careers::Careers;
pub use footer::Footer;
pub use hero::Hero;
pub use nav::Nav;
pub use services::Services;
pub use work::Work;
