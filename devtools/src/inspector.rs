//! Pointer-driven element inspector.
//!
//! On each qualifying mouse move the host hands us the hovered node. We walk
//! up to the nearest annotated ancestor, read its geometry and spacing, build
//! a short breadcrumb, and work out where the floating panel should sit so it
//! stays on screen.

use serde::{Deserialize, Serialize};

/// Opt-in marker: any element carrying it is inspectable.
pub const INSPECT_ATTR: &str = "data-dev-inspect";
/// Human-friendly component name shown instead of the tag.
pub const NAME_ATTR: &str = "data-dev-name";
/// Source file hint (`src/sections/pricing.rs:42`) for the editor link.
pub const SOURCE_ATTR: &str = "data-dev-source";

/// Breadcrumb entries kept, leaf included. Deeper ancestry is dropped.
pub const MAX_BREADCRUMB_DEPTH: usize = 5;

/// Landmarks inspectable without a marker. `section` additionally needs an id.
const LANDMARK_TAGS: [&str; 4] = ["main", "header", "footer", "nav"];

/// Distance between cursor and panel corner.
pub const PANEL_OFFSET: f64 = 12.0;
/// Minimum gap between panel and viewport edge.
pub const VIEWPORT_MARGIN: f64 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// CSS shorthand, collapsed the way devtools print it (`16px 24px`).
    pub fn shorthand(&self) -> String {
        let px = |v: f64| format!("{}px", v.round() as i64);
        if self.top == self.bottom && self.left == self.right {
            if self.top == self.left {
                px(self.top)
            } else {
                format!("{} {}", px(self.top), px(self.right))
            }
        } else {
            format!(
                "{} {} {} {}",
                px(self.top),
                px(self.right),
                px(self.bottom),
                px(self.left)
            )
        }
    }
}

/// Computed box values read from the element's style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxMetrics {
    pub padding: Edges,
    pub margin: Edges,
    pub width: f64,
    pub height: f64,
}

/// DOM-like node the inspector can walk. Implemented over `web_sys::Element`
/// in the browser shell and over plain structs in tests.
pub trait InspectNode: Sized {
    /// Lowercase tag name.
    fn tag_name(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn parent(&self) -> Option<Self>;
    fn bounding_rect(&self) -> Rect;
    fn box_metrics(&self) -> BoxMetrics;
}

/// Snapshot of the element under the cursor. Recomputed on every move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectedElement {
    pub label: String,
    pub tag: String,
    pub rect: Rect,
    pub metrics: BoxMetrics,
    /// Root-most first, leaf last.
    pub breadcrumb: Vec<String>,
    pub source: Option<String>,
}

impl InspectedElement {
    /// Path-like identifier for the clipboard.
    pub fn copy_path(&self) -> String {
        self.breadcrumb.join(" > ")
    }

    /// `1200 x 480` style size readout.
    pub fn size_label(&self) -> String {
        format!(
            "{} x {}",
            self.metrics.width.round() as i64,
            self.metrics.height.round() as i64
        )
    }
}

fn is_inspectable<N: InspectNode>(node: &N) -> bool {
    if node.attribute(INSPECT_ATTR).is_some() {
        return true;
    }
    let tag = node.tag_name();
    if tag == "section" {
        return node.attribute("id").is_some_and(|id| !id.is_empty());
    }
    LANDMARK_TAGS.contains(&tag.as_str())
}

/// Display label: dev name, then `tag#id`, then bare tag.
pub fn node_label<N: InspectNode>(node: &N) -> String {
    if let Some(name) = node.attribute(NAME_ATTR).filter(|n| !n.is_empty()) {
        return name;
    }
    let tag = node.tag_name();
    match node.attribute("id").filter(|id| !id.is_empty()) {
        Some(id) => format!("{tag}#{id}"),
        None => tag,
    }
}

/// Nearest self-or-ancestor that is marked or a landmark.
pub fn resolve_target<N: InspectNode>(node: N) -> Option<N> {
    let mut current = Some(node);
    while let Some(n) = current {
        if is_inspectable(&n) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Labels from the document down to `node`, at most [`MAX_BREADCRUMB_DEPTH`].
/// `html` and `body` are never included.
pub fn breadcrumb<N: InspectNode>(node: &N) -> Vec<String> {
    let mut labels = vec![node_label(node)];
    let mut current = node.parent();
    while let Some(n) = current {
        if labels.len() >= MAX_BREADCRUMB_DEPTH {
            break;
        }
        let tag = n.tag_name();
        if tag == "body" || tag == "html" {
            break;
        }
        labels.push(node_label(&n));
        current = n.parent();
    }
    labels.reverse();
    labels
}

/// Resolve and measure the element under the cursor.
pub fn inspect<N: InspectNode>(hovered: N) -> Option<InspectedElement> {
    let target = resolve_target(hovered)?;
    Some(InspectedElement {
        label: node_label(&target),
        tag: target.tag_name(),
        rect: target.bounding_rect(),
        metrics: target.box_metrics(),
        breadcrumb: breadcrumb(&target),
        source: target.attribute(SOURCE_ATTR).filter(|s| !s.is_empty()),
    })
}

/// Top-left corner for a `panel` sized box near `cursor`, kept inside the
/// viewport. Flips to the left of / above the cursor when it would overflow.
pub fn panel_position(cursor: (f64, f64), panel: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
    let (cx, cy) = cursor;
    let (pw, ph) = panel;
    let (vw, vh) = viewport;

    let mut x = cx + PANEL_OFFSET;
    if x + pw > vw - VIEWPORT_MARGIN {
        x = cx - PANEL_OFFSET - pw;
    }
    let mut y = cy + PANEL_OFFSET;
    if y + ph > vh - VIEWPORT_MARGIN {
        y = cy - PANEL_OFFSET - ph;
    }

    let max_x = (vw - VIEWPORT_MARGIN - pw).max(VIEWPORT_MARGIN);
    let max_y = (vh - VIEWPORT_MARGIN - ph).max(VIEWPORT_MARGIN);
    (x.clamp(VIEWPORT_MARGIN, max_x), y.clamp(VIEWPORT_MARGIN, max_y))
}

/// URI that asks an external editor to open `source` (`path[:line[:col]]`).
///
/// The absolute path is appended right after `file`, so `/srv/site` yields
/// `vscode://file/srv/site/...` and a Windows root `C:/site` yields
/// `vscode://file/C:/site/...`. Without a project root the hint itself is
/// used as the path.
///
/// Fire-and-forget: if no handler is registered for `scheme` the browser
/// silently does nothing.
pub fn editor_uri(scheme: &str, project_root: &str, source: &str) -> String {
    let rel = source.trim_start_matches("./").trim_start_matches('/');
    let mut path = format!("{}/{rel}", project_root.trim_end_matches('/'));
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    format!("{scheme}://file{path}")
}

#[cfg(test)]
pub(crate) mod fake {
    //! Tiny arena-backed DOM for tests.

    use super::*;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    pub struct FakeDom {
        nodes: Vec<FakeData>,
    }

    struct FakeData {
        tag: String,
        attrs: HashMap<String, String>,
        parent: Option<usize>,
        rect: Rect,
    }

    impl FakeDom {
        pub fn add(&mut self, tag: &str, attrs: &[(&str, &str)], parent: Option<usize>) -> usize {
            self.nodes.push(FakeData {
                tag: tag.to_string(),
                attrs: attrs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                parent,
                rect: Rect {
                    x: 10.0,
                    y: 20.0,
                    width: 300.0,
                    height: 120.0,
                },
            });
            self.nodes.len() - 1
        }

        pub fn node(self: &Rc<Self>, id: usize) -> FakeNode {
            FakeNode {
                dom: Rc::clone(self),
                id,
            }
        }
    }

    #[derive(Clone)]
    pub struct FakeNode {
        dom: Rc<FakeDom>,
        id: usize,
    }

    impl InspectNode for FakeNode {
        fn tag_name(&self) -> String {
            self.dom.nodes[self.id].tag.clone()
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.dom.nodes[self.id].attrs.get(name).cloned()
        }

        fn parent(&self) -> Option<Self> {
            self.dom.nodes[self.id].parent.map(|p| self.dom.node(p))
        }

        fn bounding_rect(&self) -> Rect {
            self.dom.nodes[self.id].rect
        }

        fn box_metrics(&self) -> BoxMetrics {
            let r = self.dom.nodes[self.id].rect;
            BoxMetrics {
                padding: Edges::uniform(16.0),
                margin: Edges::default(),
                width: r.width,
                height: r.height,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeDom;
    use super::*;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    /// html > body > main > section#pricing > div[card] > p
    fn page() -> (Rc<FakeDom>, usize, usize) {
        let mut dom = FakeDom::default();
        let html = dom.add("html", &[], None);
        let body = dom.add("body", &[], Some(html));
        let main = dom.add("main", &[], Some(body));
        let section = dom.add("section", &[("id", "pricing")], Some(main));
        let card = dom.add(
            "div",
            &[
                (INSPECT_ATTR, ""),
                (NAME_ATTR, "PricingCard"),
                (SOURCE_ATTR, "site/src/sections/pricing.rs:40"),
            ],
            Some(section),
        );
        let p = dom.add("p", &[], Some(card));
        (Rc::new(dom), p, section)
    }

    #[test]
    fn resolves_nearest_marked_ancestor() {
        let (dom, p, _) = page();
        let found = inspect(dom.node(p)).expect("inspectable ancestor");
        assert_eq!(found.label, "PricingCard");
        assert_eq!(found.tag, "div");
        assert_eq!(found.breadcrumb, vec!["main", "section#pricing", "PricingCard"]);
        assert_eq!(found.copy_path(), "main > section#pricing > PricingCard");
        assert_eq!(found.source.as_deref(), Some("site/src/sections/pricing.rs:40"));
        assert_eq!(found.size_label(), "300 x 120");
    }

    #[test]
    fn section_without_id_is_not_a_landmark() {
        let mut dom = FakeDom::default();
        let body = dom.add("body", &[], None);
        let section = dom.add("section", &[], Some(body));
        let span = dom.add("span", &[], Some(section));
        let dom = Rc::new(dom);
        assert!(inspect(dom.node(span)).is_none());
    }

    #[test]
    fn landmarks_resolve_without_marker() {
        let mut dom = FakeDom::default();
        let body = dom.add("body", &[], None);
        let footer = dom.add("footer", &[], Some(body));
        let a = dom.add("a", &[], Some(footer));
        let dom = Rc::new(dom);
        let found = inspect(dom.node(a)).expect("footer");
        assert_eq!(found.label, "footer");
        assert_eq!(found.breadcrumb, vec!["footer"]);
    }

    #[test]
    fn breadcrumb_truncates_silently_at_five() {
        let mut dom = FakeDom::default();
        let mut parent = dom.add("body", &[], None);
        for i in 0..8 {
            let id = format!("n{i}");
            parent = dom.add("div", &[("id", id.as_str())], Some(parent));
        }
        let leaf = dom.add("div", &[(INSPECT_ATTR, "")], Some(parent));
        let dom = Rc::new(dom);

        let found = inspect(dom.node(leaf)).expect("marked leaf");
        assert_eq!(found.breadcrumb.len(), MAX_BREADCRUMB_DEPTH);
        assert_eq!(found.breadcrumb.last().map(String::as_str), Some("div"));
        assert_eq!(found.breadcrumb[0], "div#n4");
    }

    #[test]
    fn panel_sits_below_right_when_room() {
        let pos = panel_position((100.0, 100.0), (200.0, 80.0), (1280.0, 800.0));
        assert_eq!(pos, (112.0, 112.0));
    }

    #[test]
    fn panel_flips_near_right_and_bottom_edges() {
        let pos = panel_position((1200.0, 760.0), (200.0, 80.0), (1280.0, 800.0));
        assert_eq!(pos, (988.0, 668.0));
    }

    #[test]
    fn panel_clamped_in_tiny_viewport() {
        let (x, y) = panel_position((5.0, 5.0), (400.0, 300.0), (320.0, 200.0));
        assert_eq!((x, y), (VIEWPORT_MARGIN, VIEWPORT_MARGIN));
    }

    #[test]
    fn spacing_shorthand_collapses() {
        assert_eq!(Edges::uniform(16.0).shorthand(), "16px");
        let e = Edges {
            top: 8.0,
            right: 24.0,
            bottom: 8.0,
            left: 24.0,
        };
        assert_eq!(e.shorthand(), "8px 24px");
        let e = Edges {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 4.0,
        };
        assert_eq!(e.shorthand(), "1px 2px 3px 4px");
    }

    #[test]
    fn editor_uri_joins_paths() {
        assert_eq!(
            editor_uri("vscode", "/home/dev/site/", "./src/app.rs:12"),
            "vscode://file/home/dev/site/src/app.rs:12"
        );
    }

    #[test]
    fn editor_uri_keeps_absolute_root_intact() {
        assert_eq!(
            editor_uri("cursor", "/srv/site", "site/src/sections/hero.rs:8"),
            "cursor://file/srv/site/site/src/sections/hero.rs:8"
        );
        assert_eq!(
            editor_uri("vscode", "C:/work/site", "src/main.rs"),
            "vscode://file/C:/work/site/src/main.rs"
        );
        assert_eq!(
            editor_uri("zed", "", "src/main.rs:3"),
            "zed://file/src/main.rs:3"
        );
    }
}
