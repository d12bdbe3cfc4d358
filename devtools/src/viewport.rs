//! Read-only reporters for the overlay status bar: breakpoint, environment,
//! current route.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Responsive width bucket. Lower bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

/// `(min width px, breakpoint)`, widest first.
const BREAKPOINTS: [(u32, Breakpoint); 5] = [
    (1536, Breakpoint::Xxl),
    (1280, Breakpoint::Xl),
    (1024, Breakpoint::Lg),
    (768, Breakpoint::Md),
    (640, Breakpoint::Sm),
];

impl Breakpoint {
    pub fn from_width(width: u32) -> Self {
        BREAKPOINTS
            .iter()
            .find(|(min, _)| width >= *min)
            .map(|(_, bp)| *bp)
            .unwrap_or(Breakpoint::Xs)
    }

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }

    /// Inclusive lower bound in CSS pixels.
    pub fn min_width(self) -> u32 {
        BREAKPOINTS
            .iter()
            .find(|(_, bp)| *bp == self)
            .map(|(min, _)| *min)
            .unwrap_or(0)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deployment the page is served from, guessed from the hostname.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Dev,
    Stage,
    Prod,
}

impl Environment {
    pub fn from_hostname(hostname: &str) -> Self {
        let host = hostname.to_ascii_lowercase();
        if host.contains("localhost") || host.contains("127.0.0.1") {
            Environment::Dev
        } else if ["staging", "preview", "vercel"]
            .iter()
            .any(|needle| host.contains(needle))
        {
            Environment::Stage
        } else {
            Environment::Prod
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Environment::Dev => "DEV",
            Environment::Stage => "STAGE",
            Environment::Prod => "PROD",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub path: String,
}

impl RouteInfo {
    /// Path without query or fragment; empty becomes `/`.
    pub fn from_path(raw: &str) -> Self {
        let end = raw.find(['?', '#']).unwrap_or(raw.len());
        let path = &raw[..end];
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self { path }
    }
}

/// Everything the status bar shows, recomputed on resize / navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBar {
    pub width: u32,
    pub height: u32,
    pub breakpoint: Breakpoint,
    pub environment: Environment,
    pub route: RouteInfo,
}

impl StatusBar {
    pub fn new(width: u32, height: u32, hostname: &str, path: &str) -> Self {
        Self {
            width,
            height,
            breakpoint: Breakpoint::from_width(width),
            environment: Environment::from_hostname(hostname),
            route: RouteInfo::from_path(path),
        }
    }

    /// Recompute the size-derived fields after a resize.
    pub fn resized(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.breakpoint = Breakpoint::from_width(width);
    }

    pub fn navigated(&mut self, path: &str) {
        self.route = RouteInfo::from_path(path);
    }

    /// `lg · 1024×768`
    pub fn viewport_label(&self) -> String {
        format!("{} · {}×{}", self.breakpoint, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_boundaries_are_exact() {
        assert_eq!(Breakpoint::from_width(1023), Breakpoint::Md);
        assert_eq!(Breakpoint::from_width(1024), Breakpoint::Lg);
        assert_eq!(Breakpoint::from_width(1279), Breakpoint::Lg);
        assert_eq!(Breakpoint::from_width(1280), Breakpoint::Xl);
        assert_eq!(Breakpoint::from_width(1536), Breakpoint::Xxl);
        assert_eq!(Breakpoint::from_width(639), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(640), Breakpoint::Sm);
        assert_eq!(Breakpoint::from_width(0), Breakpoint::Xs);
    }

    #[test]
    fn breakpoint_names_and_bounds() {
        assert_eq!(Breakpoint::Xxl.to_string(), "2xl");
        assert_eq!(Breakpoint::Lg.min_width(), 1024);
        assert_eq!(Breakpoint::Xs.min_width(), 0);
    }

    #[test]
    fn environment_from_hostname() {
        assert_eq!(Environment::from_hostname("localhost"), Environment::Dev);
        assert_eq!(Environment::from_hostname("127.0.0.1"), Environment::Dev);
        assert_eq!(
            Environment::from_hostname("staging.northlight.studio"),
            Environment::Stage
        );
        assert_eq!(
            Environment::from_hostname("site-git-feature.vercel.app"),
            Environment::Stage
        );
        assert_eq!(
            Environment::from_hostname("deploy-preview-12.netlify.app"),
            Environment::Stage
        );
        assert_eq!(Environment::from_hostname("northlight.studio"), Environment::Prod);
    }

    #[test]
    fn route_strips_query_and_fragment() {
        assert_eq!(RouteInfo::from_path("").path, "/");
        assert_eq!(RouteInfo::from_path("/work?page=2").path, "/work");
        assert_eq!(RouteInfo::from_path("/about#team").path, "/about");
        assert_eq!(RouteInfo::from_path("careers").path, "/careers");
    }

    #[test]
    fn status_bar_tracks_resize() {
        let mut bar = StatusBar::new(1024, 768, "localhost", "/");
        assert_eq!(bar.viewport_label(), "lg · 1024×768");
        bar.resized(1280, 720);
        assert_eq!(bar.breakpoint, Breakpoint::Xl);
        bar.navigated("/work/acme");
        assert_eq!(bar.route.path, "/work/acme");
        assert_eq!(bar.environment, Environment::Dev);
    }
}
