//! The slides that make up the deck.

use serde::Serialize;

/// A single slide.
///
/// Which fields are set depends on the slide's layout. Renderers skip any element whose field is
/// missing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Slide {
    pub id: &'static str,
    pub layout: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<&'static str>,
    #[serde(skip_serializing_if = "is_empty")]
    pub tags: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub points: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub features: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub columns: &'static [Column],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(skip_serializing_if = "is_empty")]
    pub table: &'static [TableRow],
    #[serde(skip_serializing_if = "is_empty")]
    pub steps: &'static [TimelineStep],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat_label: Option<&'static str>,
    pub is_cta: bool,
}

impl Slide {
    /// A slide with nothing but an id and a layout, used as the base for every other one.
    pub const EMPTY: Slide = Slide {
        id: "",
        layout: "",
        title: None,
        subtitle: None,
        headline: None,
        description: None,
        content: None,
        highlight: None,
        tags: &[],
        points: &[],
        features: &[],
        columns: &[],
        comparison: None,
        table: &[],
        steps: &[],
        stat: None,
        stat_label: None,
        is_cta: false,
    };
}

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

/// The icon shown on top of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Activity,
    TrendingUp,
    Users,
    Layers,
    DollarSign,
}

impl Icon {
    /// The glyph this icon is drawn as.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Activity => "∿",
            Self::TrendingUp => "↗",
            Self::Users => "⚇",
            Self::Layers => "≡",
            Self::DollarSign => "$",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Column {
    pub icon: Icon,
    pub title: &'static str,
    pub text: &'static str,
}

/// A before/after comparison.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub left: ComparisonSide,
    pub right: ComparisonSide,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ComparisonSide {
    pub label: &'static str,
    pub items: &'static [&'static str],
}

/// A row in the comparison table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub feature: &'static str,
    pub legacy: &'static str,
    pub hv: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimelineStep {
    pub time: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// An ordered, read only sequence of slides.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    slides: &'static [Slide],
}

impl Catalog {
    pub fn new(slides: &'static [Slide]) -> Self {
        Self { slides }
    }

    /// The HomeVisor pitch deck.
    pub fn homevisor() -> Self {
        Self::new(HOMEVISOR)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Slide> {
        self.slides.iter()
    }
}

static HOMEVISOR: &[Slide] = &[
    Slide {
        id: "hero",
        layout: "hero",
        title: Some("HomeVisor"),
        subtitle: Some("Your Home, Managed"),
        content: Some(
            "A 24/7 home manager that tracks assets, coordinates contractors, and makes homeownership feel like a \
             managed portfolio instead of a never\u{2011}ending to\u{2011}do list.",
        ),
        tags: &["Time-poor homeowners", "Home Operating System", "No more chaos"],
        ..Slide::EMPTY
    },
    Slide {
        id: "challenge",
        layout: "split",
        title: Some("The Challenge"),
        subtitle: Some("Homeownership feels like running a small company\u{2014}with no COO."),
        points: &[
            "No single source of truth for property history.",
            "Dozens of uncoordinated contractors.",
            "Emergencies arrive when cash is tight.",
            "Discovery calls sound the same: frustration.",
        ],
        highlight: Some("HomeVisor gives every homeowner one manager who knows the home as an asset."),
        ..Slide::EMPTY
    },
    Slide {
        id: "problem1",
        layout: "grid-problem",
        title: Some("Problem #1: Fragmentation"),
        headline: Some("Too many contractors. Zero coordination."),
        description: Some("Homeowners act as their own general contractors with no persistent memory of the property."),
        comparison: Some(Comparison {
            left: ComparisonSide {
                label: "Today",
                items: &["12+ Vendors (SMS/Email)", "No Shared History", "Cold Starts Every Time"],
            },
            right: ComparisonSide {
                label: "With HomeVisor",
                items: &["One Concierge", "Vetted Network", "Shared Asset Model"],
            },
        }),
        ..Slide::EMPTY
    },
    Slide {
        id: "problem2",
        layout: "feature-highlight",
        title: Some("Problem #2: Financial Trap"),
        headline: Some("Failures happen on random Tuesdays."),
        description: Some("Roofs and HVACs don't fail on spreadsheets. Homeowners lack a predictable cash flow model."),
        stat: Some("$8\u{2013}20k"),
        stat_label: Some("Unexpected events with 0 days notice"),
        ..Slide::EMPTY
    },
    Slide {
        id: "solution",
        layout: "columns-3",
        title: Some("The Solution"),
        headline: Some("Home Operating System"),
        description: Some("One concierge, one interface, one financial brain."),
        columns: &[
            Column {
                icon: Icon::Activity,
                title: "Source of Truth",
                text: "Every system tracked: age, condition, cost.",
            },
            Column {
                icon: Icon::TrendingUp,
                title: "Proactive Planning",
                text: "3\u{2013}5 year roadmaps. Replacements felt expected.",
            },
            Column {
                icon: Icon::Users,
                title: "Managed Execution",
                text: "Concierge coordinates vetted pros & schedules.",
            },
        ],
        ..Slide::EMPTY
    },
    Slide {
        id: "proactive",
        layout: "visual-dashboard",
        title: Some("Proactive Asset Management"),
        headline: Some("From Surprise to Strategy"),
        content: Some(
            "We track the age, health, and cost profile of every major \
             system\u{2014}translating it into a monthly plan.",
        ),
        features: &["Track Age & Lifespan", "Predict Replacements", "Smart Sinking Fund"],
        ..Slide::EMPTY
    },
    Slide {
        id: "marketplace",
        layout: "split-graphic",
        title: Some("Managed Services Marketplace"),
        headline: Some("Not a Directory. A Managed Network."),
        description: Some(
            "HomeVisor owns the relationship. Full service coordination, centralized billing, and quality control.",
        ),
        points: &["Full Service Coordination", "Vetted Professionals", "Annual Inspections Feed Model"],
        ..Slide::EMPTY
    },
    Slide {
        id: "comparison",
        layout: "comparison-table",
        title: Some("Why HomeVisor Wins"),
        headline: Some("Category-Defining Position"),
        table: &[
            TableRow { feature: "User Role", legacy: "DIY Manager", hv: "Delegator" },
            TableRow { feature: "Model", legacy: "Lead Directory", hv: "Managed Service + Marketplace" },
            TableRow { feature: "Pricing", legacy: "Unpredictable", hv: "Predictable & Centralized" },
            TableRow { feature: "Approach", legacy: "Fix when broken", hv: "Plan, Save, Maintain" },
        ],
        ..Slide::EMPTY
    },
    Slide {
        id: "revenue",
        layout: "big-number",
        title: Some("Revenue Model"),
        headline: Some("Hybrid Recurring + Transactional"),
        description: Some("High-margin SaaS subscription layered with service commissions and high-intent lead deals."),
        ..Slide::EMPTY
    },
    Slide {
        id: "streams",
        layout: "columns-3",
        title: Some("Three Revenue Streams"),
        columns: &[
            Column {
                icon: Icon::Layers,
                title: "Subscription (SaaS)",
                text: "Access to Home Manager & Lifecycle Planning.",
            },
            Column {
                icon: Icon::DollarSign,
                title: "Service Commission",
                text: "30\u{2013}40% take rate on coordinated jobs.",
            },
            Column {
                icon: Icon::Users,
                title: "High-Intent Leads",
                text: "Verified leads for Roofing, HVAC, Remodels.",
            },
        ],
        ..Slide::EMPTY
    },
    Slide {
        id: "roadmap",
        layout: "timeline",
        title: Some("Roadmap"),
        steps: &[
            TimelineStep {
                time: "Phase 1 (Xmas)",
                title: "MVP",
                description: "Urban Company-style interface. Manual concierge.",
            },
            TimelineStep {
                time: "Phase 2 (Launch)",
                title: "Pilot",
                description: "Local launch with trusted networks.",
            },
            TimelineStep {
                time: "Phase 3 (Scale)",
                title: "National",
                description: "AI-driven asset ingestion. Auto-planning.",
            },
        ],
        ..Slide::EMPTY
    },
    Slide {
        id: "cta",
        layout: "hero",
        title: Some("Join Early Access"),
        subtitle: Some("Bring peace of mind to homeownership."),
        content: Some(
            "We're assembling the first managed homeownership platform. Join the list to help shape the product.",
        ),
        is_cta: true,
        ..Slide::EMPTY
    },
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn homevisor_order() {
        let ids: Vec<_> = Catalog::homevisor().iter().map(|slide| slide.id).collect();
        let expected = [
            "hero",
            "challenge",
            "problem1",
            "problem2",
            "solution",
            "proactive",
            "marketplace",
            "comparison",
            "revenue",
            "streams",
            "roadmap",
            "cta",
        ];
        assert_eq!(ids, expected);
    }

    #[test]
    fn only_closing_slide_is_cta() {
        let catalog = Catalog::homevisor();
        let cta: Vec<_> = catalog.iter().filter(|slide| slide.is_cta).map(|slide| slide.id).collect();
        assert_eq!(cta, &["cta"]);
    }

    #[test]
    fn out_of_range() {
        let catalog = Catalog::homevisor();
        assert_eq!(catalog.len(), 12);
        assert!(catalog.get(11).is_some());
        assert!(catalog.get(12).is_none());
    }

    #[test]
    fn serialized_outline_skips_missing_fields() {
        let slide = Catalog::homevisor().get(10).expect("no roadmap");
        let value = serde_json::to_value(slide).expect("serialize failed");
        assert_eq!(value["layout"], "timeline");
        assert_eq!(value["steps"][0]["time"], "Phase 1 (Xmas)");
        assert!(value.get("subtitle").is_none());
        assert!(value.get("points").is_none());
    }

    #[test]
    fn icons_serialize_by_name() {
        let value = serde_json::to_value(Icon::TrendingUp).expect("serialize failed");
        assert_eq!(value, "trending-up");
    }
}
