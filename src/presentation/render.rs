//! HTML rendering of a composition.
//!
//! Markup lives in embedded minijinja templates under `templates/`: one page
//! template plus a partial per [`Section`]. The page includes the partials in
//! the order the selected [`Composition`] lists them. Sections never see
//! palette names or colors; they reference the styling slots through
//! `var(--theme-*)` in the stylesheet, so any applied color set restyles every
//! section at once.

use std::sync::LazyLock;

use minijinja::{AutoEscape, Environment, Error};
use serde::Serialize;

use super::{Composition, Section};
use crate::models::{LayoutVariant, Mode, PaletteName, SiteContent, PALETTES};
use crate::presentation::COMPOSITIONS;
use crate::theme::{AppearanceState, SurfaceSnapshot};

const PAGE_TEMPLATE: &str = "page.html";

/// Embedded templates, by name.
const TEMPLATES: [(&str, &str); 7] = [
    (PAGE_TEMPLATE, include_str!("../../templates/page.html")),
    (
        "sections/navigation.html",
        include_str!("../../templates/sections/navigation.html"),
    ),
    (
        "sections/hero.html",
        include_str!("../../templates/sections/hero.html"),
    ),
    (
        "sections/projects.html",
        include_str!("../../templates/sections/projects.html"),
    ),
    (
        "sections/skills.html",
        include_str!("../../templates/sections/skills.html"),
    ),
    (
        "sections/freelance.html",
        include_str!("../../templates/sections/freelance.html"),
    ),
    (
        "sections/contact.html",
        include_str!("../../templates/sections/contact.html"),
    ),
];

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, error = %e, "Failed to load template");
        }
    }
    env
});

/// Everything needed to render one page.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Shared content
    pub content: &'a SiteContent,
    /// Selected arrangement
    pub composition: &'a Composition,
    /// Current styling slots
    pub surface: &'a SurfaceSnapshot,
    /// Current selection, used to pre-select the appearance controls
    pub appearance: AppearanceState,
    /// Shown in place of the contact form's submit button when set
    pub contact_notice: Option<&'a str>,
}

/// Section anchor ids, by section.
#[derive(Serialize)]
struct Anchors {
    navigation: &'static str,
    hero: &'static str,
    projects: &'static str,
    skills: &'static str,
    freelance: &'static str,
    contact: &'static str,
}

impl Anchors {
    const fn new() -> Self {
        Self {
            navigation: Section::Navigation.anchor(),
            hero: Section::Hero.anchor(),
            projects: Section::Projects.anchor(),
            skills: Section::Skills.anchor(),
            freelance: Section::Freelance.anchor(),
            contact: Section::Contact.anchor(),
        }
    }
}

#[derive(Serialize)]
struct NavLink {
    anchor: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct Choice<'a> {
    value: &'a str,
    label: &'a str,
    selected: bool,
}

#[derive(Serialize)]
struct ContactField {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    required: bool,
}

/// Form fields besides the message, in display order.
const CONTACT_FIELDS: [ContactField; 7] = [
    field("name", "Name", "text", true),
    field("email", "Email", "email", true),
    field("company", "Company", "text", false),
    field("project_type", "Project type", "text", false),
    field("timeline", "Timeline", "text", false),
    field("budget", "Budget range", "text", false),
    field("referral", "How did you hear about me?", "text", false),
];

const fn field(
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    required: bool,
) -> ContactField {
    ContactField {
        name,
        label,
        input_type,
        required,
    }
}

const NAV_LINKS: [NavLink; 4] = [
    NavLink {
        anchor: Section::Projects.anchor(),
        label: "Work",
    },
    NavLink {
        anchor: Section::Skills.anchor(),
        label: "Skills",
    },
    NavLink {
        anchor: Section::Freelance.anchor(),
        label: "Services",
    },
    NavLink {
        anchor: Section::Contact.anchor(),
        label: "Contact",
    },
];

/// Template context for [`PAGE_TEMPLATE`].
#[derive(Serialize)]
struct PageContext<'a> {
    content: &'a SiteContent,
    sections: &'static [Section],
    anchors: Anchors,
    nav_links: &'static [NavLink],
    layout: LayoutVariant,
    palette: PaletteName,
    mode: Mode,
    toggled_mode: Mode,
    body_class: String,
    columns: u8,
    surface_css: String,
    palettes: Vec<Choice<'a>>,
    layouts: Vec<Choice<'a>>,
    contact_fields: &'static [ContactField],
    contact_notice: Option<&'a str>,
}

impl<'a> PageContext<'a> {
    fn new(page: &Page<'a>) -> Self {
        let treatment = &page.composition.treatment;
        Self {
            content: page.content,
            sections: page.composition.sections,
            anchors: Anchors::new(),
            nav_links: &NAV_LINKS,
            layout: page.composition.variant,
            palette: page.appearance.palette,
            mode: page.appearance.mode,
            toggled_mode: page.appearance.mode.toggled(),
            body_class: format!("{} {}", treatment.class, treatment.hero.class()),
            columns: treatment.columns,
            surface_css: page.surface.to_css(),
            palettes: PALETTES
                .iter()
                .map(|p| Choice {
                    value: p.name.as_str(),
                    label: p.display_name,
                    selected: p.name == page.appearance.palette,
                })
                .collect(),
            layouts: COMPOSITIONS
                .iter()
                .map(|c| Choice {
                    value: c.variant.as_str(),
                    label: c.display_name,
                    selected: c.variant == page.composition.variant,
                })
                .collect(),
            contact_fields: &CONTACT_FIELDS,
            contact_notice: page.contact_notice,
        }
    }
}

/// Renders a complete HTML document.
pub fn render_page(page: &Page<'_>) -> Result<String, Error> {
    ENV.get_template(PAGE_TEMPLATE)?.render(PageContext::new(page))
}

/// Renders the page for `variant` with no contact notice.
///
/// Convenience used by previews and tests.
pub fn render_variant(
    content: &SiteContent,
    variant: LayoutVariant,
    surface: &SurfaceSnapshot,
    appearance: AppearanceState,
) -> Result<String, Error> {
    render_page(&Page {
        content,
        composition: super::composition(variant),
        surface,
        appearance,
        contact_notice: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::STYLE_SLOTS;
    use crate::theme::{resolve, StyleSurface};

    fn surface_for(appearance: AppearanceState) -> SurfaceSnapshot {
        let surface = StyleSurface::new();
        surface.apply(&resolve(appearance.palette, appearance.mode));
        surface.snapshot()
    }

    #[test]
    fn test_every_section_has_a_template() {
        for section in Section::ALL {
            let key = serde_json::to_value(section).unwrap();
            let name = format!("sections/{}.html", key.as_str().unwrap());
            assert!(ENV.get_template(&name).is_ok(), "missing {name}");
        }
    }

    #[test]
    fn test_sections_render_in_composition_order() {
        let content = SiteContent::load_embedded().unwrap();
        let appearance = AppearanceState::default();
        let surface = surface_for(appearance);

        for variant in LayoutVariant::ALL {
            let html = render_variant(&content, variant, &surface, appearance).unwrap();
            let positions: Vec<usize> = super::super::composition(variant)
                .sections
                .iter()
                .map(|s| {
                    html.find(&format!(" id=\"{}\"", s.anchor()))
                        .unwrap_or_else(|| panic!("{variant} is missing {s:?}"))
                })
                .collect();
            assert!(
                positions.windows(2).all(|w| w[0] < w[1]),
                "{variant} sections out of order"
            );
            assert!(html.contains(&format!("data-layout=\"{variant}\"")));
        }
    }

    #[test]
    fn test_page_embeds_styling_surface() {
        let content = SiteContent::load_embedded().unwrap();
        let appearance = AppearanceState::new(PaletteName::Forest, Mode::Light);
        let surface = surface_for(appearance);
        let html = render_variant(&content, LayoutVariant::Modern, &surface, appearance).unwrap();

        for slot in STYLE_SLOTS {
            assert!(html.contains(&format!("--{slot}: ")), "missing {slot}");
        }
        assert!(html.contains("<option value=\"forest\" selected>"));
        assert!(html.contains("data-mode=\"light\""));
    }

    #[test]
    fn test_content_is_escaped() {
        let mut content = SiteContent::load_embedded().unwrap();
        content.owner_name = "<script>alert(1)</script>".to_string();
        let appearance = AppearanceState::default();
        let surface = surface_for(appearance);
        let html = render_variant(&content, LayoutVariant::Classic, &surface, appearance).unwrap();

        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;"));
    }

    #[test]
    fn test_contact_notice_replaces_submit() {
        let content = SiteContent::load_embedded().unwrap();
        let appearance = AppearanceState::default();
        let surface = surface_for(appearance);
        let html = render_page(&Page {
            content: &content,
            composition: super::super::composition(LayoutVariant::Modern),
            surface: &surface,
            appearance,
            contact_notice: Some("The contact form is not configured."),
        })
        .unwrap();

        assert!(html.contains("form-notice--blocking"));
        assert!(!html.contains("<button type=\"submit\">"));
        assert!(html.contains("The contact form is not configured."));
        assert!(html.contains(&format!("mailto:{}", content.contact_email)));
    }
}
