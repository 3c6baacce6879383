//! Presentation variants: one content model, many arrangements.
//!
//! Each [`LayoutVariant`] maps to a [`Composition`]: an ordered list of the
//! shared sections plus a visual treatment. The table below is the only place
//! arrangements are defined; the renderer walks whichever entry is selected.

pub mod render;

pub use render::{render_page, render_variant, Page};

use serde::Serialize;

use crate::models::LayoutVariant;

/// A content section shared by every composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Site navigation and appearance controls
    Navigation,
    /// Name, headline, tagline
    Hero,
    /// Case study listing
    Projects,
    /// Skill list
    Skills,
    /// Freelance availability and services
    Freelance,
    /// Lead-generation form
    Contact,
}

impl Section {
    /// Every section.
    pub const ALL: [Self; 6] = [
        Self::Navigation,
        Self::Hero,
        Self::Projects,
        Self::Skills,
        Self::Freelance,
        Self::Contact,
    ];

    /// Anchor id used in markup and navigation links.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Navigation => "nav",
            Self::Hero => "top",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Freelance => "freelance",
            Self::Contact => "contact",
        }
    }
}

/// How the hero section is staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroStyle {
    /// Edge-to-edge banner
    FullBleed,
    /// Centered text block
    Centered,
    /// Single line, no banner
    Compact,
    /// Two-column with bio beside the tagline
    Split,
    /// Fills the first screen
    Oversized,
}

impl HeroStyle {
    /// CSS modifier class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::FullBleed => "hero--full-bleed",
            Self::Centered => "hero--centered",
            Self::Compact => "hero--compact",
            Self::Split => "hero--split",
            Self::Oversized => "hero--oversized",
        }
    }
}

/// Visual treatment of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Treatment {
    /// Body class applied to the whole page
    pub class: &'static str,
    /// Columns used for project and skill listings
    pub columns: u8,
    /// Hero staging
    pub hero: HeroStyle,
}

/// One arrangement of the shared sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Composition {
    /// Layout this composition realizes
    pub variant: LayoutVariant,
    /// Human-readable label
    pub display_name: &'static str,
    /// One-line description for pickers
    pub description: &'static str,
    /// Sections in render order
    pub sections: &'static [Section],
    /// Visual treatment
    pub treatment: Treatment,
}

use Section::{Contact, Freelance, Hero, Navigation, Projects, Skills};

const STANDARD: &[Section] = &[Navigation, Hero, Projects, Skills, Freelance, Contact];
const SKILLS_FIRST: &[Section] = &[Navigation, Hero, Skills, Projects, Freelance, Contact];
const PITCH_FIRST: &[Section] = &[Navigation, Hero, Freelance, Projects, Skills, Contact];
const CONTACT_FIRST: &[Section] = &[Navigation, Hero, Contact, Projects, Skills, Freelance];
const HERO_FIRST: &[Section] = &[Hero, Navigation, Projects, Skills, Freelance, Contact];

const fn treatment(class: &'static str, columns: u8, hero: HeroStyle) -> Treatment {
    Treatment {
        class,
        columns,
        hero,
    }
}

/// The dispatch table, in [`LayoutVariant::ALL`] order.
pub static COMPOSITIONS: [Composition; 14] = [
    Composition {
        variant: LayoutVariant::Modern,
        display_name: "Modern",
        description: "Full-bleed hero with a card grid of case studies",
        sections: STANDARD,
        treatment: treatment("layout-modern", 3, HeroStyle::FullBleed),
    },
    Composition {
        variant: LayoutVariant::Classic,
        display_name: "Classic",
        description: "Centered single column, like a printed resume",
        sections: STANDARD,
        treatment: treatment("layout-classic", 1, HeroStyle::Centered),
    },
    Composition {
        variant: LayoutVariant::Minimal,
        display_name: "Minimal",
        description: "Text only with generous whitespace",
        sections: SKILLS_FIRST,
        treatment: treatment("layout-minimal", 1, HeroStyle::Compact),
    },
    Composition {
        variant: LayoutVariant::Terminal,
        display_name: "Terminal",
        description: "Monospace console aesthetic",
        sections: HERO_FIRST,
        treatment: treatment("layout-terminal", 1, HeroStyle::Compact),
    },
    Composition {
        variant: LayoutVariant::Magazine,
        display_name: "Magazine",
        description: "Editorial columns with the pitch up front",
        sections: PITCH_FIRST,
        treatment: treatment("layout-magazine", 2, HeroStyle::Split),
    },
    Composition {
        variant: LayoutVariant::Split,
        display_name: "Split",
        description: "Hero pinned beside scrolling content",
        sections: STANDARD,
        treatment: treatment("layout-split", 1, HeroStyle::Split),
    },
    Composition {
        variant: LayoutVariant::Cards,
        display_name: "Cards",
        description: "Every section boxed as a card",
        sections: STANDARD,
        treatment: treatment("layout-cards", 2, HeroStyle::Centered),
    },
    Composition {
        variant: LayoutVariant::Timeline,
        display_name: "Timeline",
        description: "Case studies along a vertical timeline",
        sections: STANDARD,
        treatment: treatment("layout-timeline", 1, HeroStyle::Centered),
    },
    Composition {
        variant: LayoutVariant::Brutalist,
        display_name: "Brutalist",
        description: "Heavy borders and raw typography",
        sections: HERO_FIRST,
        treatment: treatment("layout-brutalist", 2, HeroStyle::Oversized),
    },
    Composition {
        variant: LayoutVariant::Glass,
        display_name: "Glass",
        description: "Translucent panels over a gradient",
        sections: STANDARD,
        treatment: treatment("layout-glass", 3, HeroStyle::FullBleed),
    },
    Composition {
        variant: LayoutVariant::Grid,
        display_name: "Grid",
        description: "Strict three-column grid",
        sections: SKILLS_FIRST,
        treatment: treatment("layout-grid", 3, HeroStyle::Compact),
    },
    Composition {
        variant: LayoutVariant::Sidebar,
        display_name: "Sidebar",
        description: "Navigation docked in a side rail",
        sections: STANDARD,
        treatment: treatment("layout-sidebar", 2, HeroStyle::Centered),
    },
    Composition {
        variant: LayoutVariant::Compact,
        display_name: "Compact",
        description: "Dense layout for small screens",
        sections: PITCH_FIRST,
        treatment: treatment("layout-compact", 1, HeroStyle::Compact),
    },
    Composition {
        variant: LayoutVariant::Spotlight,
        display_name: "Spotlight",
        description: "Oversized hero with the contact form right after",
        sections: CONTACT_FIRST,
        treatment: treatment("layout-spotlight", 2, HeroStyle::Oversized),
    },
];

/// Returns the composition for `variant`.
#[must_use]
pub fn composition(variant: LayoutVariant) -> &'static Composition {
    &COMPOSITIONS[variant as usize]
}
