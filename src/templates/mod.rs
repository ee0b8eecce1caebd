//! Compiled-in industry document templates.
//!
//! A template is an immutable draft skeleton: title, body content, status,
//! and a flat list of `(box, field, value)` metadata triples. Selecting a
//! template copies it into an editable draft; nothing is loaded from or
//! validated against the remote site.
//!
//! Lookup is a pure function over a closed key set. Unknown keys yield the
//! canonical empty template (empty title/content, status `draft`, no
//! metadata) so callers never branch on lookup failure.

use serde::Serialize;
use serde_json::{Value, json};

use crate::api::{Draft, DraftMeta, MetaEntry};

// ---------------------------------------------------------------------------
// Template type
// ---------------------------------------------------------------------------

/// A predefined draft skeleton for one industry document.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub title: String,
    pub content: String,
    pub status: String,
    pub meta: Vec<MetaEntry>,
}

impl Template {
    /// The canonical empty template returned for unknown keys.
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            status: "draft".to_string(),
            meta: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.meta.is_empty()
    }

    /// Copy the skeleton into an editable draft.
    pub fn to_draft(&self) -> Draft {
        Draft {
            title: self.title.clone(),
            content: self.content.clone(),
            status: self.status.clone(),
            acpt: DraftMeta {
                meta: self.meta.clone(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The fixed catalog: category → template names.
pub fn catalog() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        (
            "Real Estate",
            &["Residential Property", "Commercial Property"],
        ),
        ("Stock Market", &["Stock Profile", "Market Analysis"]),
        (
            "DISC Assessment",
            &["Individual Assessment", "Team Assessment"],
        ),
    ]
}

/// Look up a template by `(category, name)`.
///
/// Unknown keys return [`Template::empty`] rather than an error.
pub fn lookup(category: &str, name: &str) -> Template {
    match (category, name) {
        ("Real Estate", "Residential Property") => residential_property(),
        ("Real Estate", "Commercial Property") => commercial_property(),
        ("Stock Market", "Stock Profile") => stock_profile(),
        ("Stock Market", "Market Analysis") => market_analysis(),
        ("DISC Assessment", "Individual Assessment") => disc_individual(),
        ("DISC Assessment", "Team Assessment") => disc_team(),
        _ => Template::empty(),
    }
}

fn entry(box_name: &str, field: &str, value: Value) -> MetaEntry {
    MetaEntry::new(box_name, field, value)
}

fn template(title: &str, content: &str, meta: Vec<MetaEntry>) -> Template {
    Template {
        title: title.to_string(),
        content: content.to_string(),
        status: "draft".to_string(),
        meta,
    }
}

// ---------------------------------------------------------------------------
// Real Estate
// ---------------------------------------------------------------------------

fn residential_property() -> Template {
    template(
        "Sample Residential Property",
        "<p>Beautiful residential property in a prime location.</p>",
        vec![
            entry("property_details", "property_type", json!("Residential")),
            entry("property_details", "bedrooms", json!(3)),
            entry("property_details", "bathrooms", json!(2)),
            entry("property_details", "square_feet", json!(2000)),
            entry("property_details", "year_built", json!(2010)),
            entry("location", "address", json!("123 Main Street")),
            entry("location", "city", json!("Anytown")),
            entry("location", "state", json!("CA")),
            entry("location", "zip_code", json!("90210")),
            entry("location", "country", json!("USA")),
            entry("pricing", "price", json!(450000)),
            entry("pricing", "price_per_sqft", json!(225)),
            entry(
                "features",
                "amenities",
                json!(["Garage", "Swimming Pool", "Garden", "Fireplace"]),
            ),
            entry("features", "heating_cooling", json!("Central Air")),
            entry("features", "parking", json!("2-Car Garage")),
            entry(
                "media",
                "featured_image",
                json!("https://example.com/property-image.jpg"),
            ),
            entry(
                "media",
                "virtual_tour",
                json!("https://example.com/virtual-tour"),
            ),
        ],
    )
}

fn commercial_property() -> Template {
    template(
        "Sample Commercial Property",
        "<p>Prime commercial property for your business needs.</p>",
        vec![
            entry("property_details", "property_type", json!("Commercial")),
            entry("property_details", "building_type", json!("Office")),
            entry("property_details", "square_feet", json!(5000)),
            entry("property_details", "year_built", json!(2005)),
            entry("property_details", "floors", json!(2)),
            entry("location", "address", json!("456 Business Ave")),
            entry("location", "city", json!("Metropolis")),
            entry("location", "state", json!("NY")),
            entry("location", "zip_code", json!("10001")),
            entry("location", "country", json!("USA")),
            entry("pricing", "price", json!(1200000)),
            entry("pricing", "price_per_sqft", json!(240)),
            entry("pricing", "lease_option", json!("Available")),
            entry("pricing", "lease_rate", json!("25 per sqft/year")),
            entry(
                "features",
                "amenities",
                json!(["Elevator", "Conference Room", "Kitchen", "Security System"]),
            ),
            entry("features", "parking", json!("20 Spaces")),
            entry("features", "zoning", json!("Commercial")),
            entry(
                "media",
                "featured_image",
                json!("https://example.com/commercial-property.jpg"),
            ),
            entry(
                "media",
                "floor_plan",
                json!("https://example.com/floor-plan.pdf"),
            ),
        ],
    )
}

// ---------------------------------------------------------------------------
// Stock Market
// ---------------------------------------------------------------------------

fn stock_profile() -> Template {
    template(
        "AAPL - Apple Inc.",
        "<p>Apple Inc. designs, manufactures, and markets smartphones, personal \
         computers, tablets, wearables, and accessories worldwide.</p>",
        vec![
            entry("stock_info", "ticker", json!("AAPL")),
            entry("stock_info", "company_name", json!("Apple Inc.")),
            entry("stock_info", "exchange", json!("NASDAQ")),
            entry("stock_info", "sector", json!("Technology")),
            entry("stock_info", "industry", json!("Consumer Electronics")),
            entry("financials", "current_price", json!(175.43)),
            entry("financials", "market_cap", json!("2.85T")),
            entry("financials", "pe_ratio", json!(28.76)),
            entry("financials", "dividend_yield", json!(0.55)),
            entry("financials", "52_week_high", json!(198.23)),
            entry("financials", "52_week_low", json!(124.17)),
            entry("performance", "daily_change", json!(1.25)),
            entry("performance", "ytd_return", json!(34.8)),
            entry("performance", "one_year_return", json!(42.5)),
            entry("performance", "five_year_return", json!(325.7)),
            entry("analysis", "analyst_rating", json!("Buy")),
            entry("analysis", "price_target", json!(205.00)),
            entry(
                "analysis",
                "analyst_consensus",
                json!(["Buy", "Buy", "Hold", "Buy", "Strong Buy"]),
            ),
            entry(
                "media",
                "company_logo",
                json!("https://example.com/apple-logo.png"),
            ),
            entry(
                "media",
                "price_chart",
                json!("https://example.com/aapl-chart.png"),
            ),
        ],
    )
}

fn market_analysis() -> Template {
    template(
        "Market Analysis - Q2 2023",
        "<p>Comprehensive analysis of market trends and sector performance for Q2 2023.</p>",
        vec![
            entry("analysis_info", "period", json!("Q2 2023")),
            entry("analysis_info", "analyst", json!("Jane Smith")),
            entry("analysis_info", "publication_date", json!("2023-07-15")),
            entry("market_overview", "sp500_performance", json!(8.3)),
            entry("market_overview", "nasdaq_performance", json!(12.5)),
            entry("market_overview", "dow_performance", json!(5.2)),
            entry("market_overview", "vix_average", json!(18.7)),
            entry("sector_performance", "technology", json!(15.3)),
            entry("sector_performance", "healthcare", json!(7.8)),
            entry("sector_performance", "financials", json!(4.2)),
            entry("sector_performance", "energy", json!(-2.5)),
            entry("sector_performance", "consumer_discretionary", json!(9.7)),
            entry("sector_performance", "consumer_staples", json!(3.1)),
            entry("economic_indicators", "gdp_growth", json!(2.4)),
            entry("economic_indicators", "inflation_rate", json!(3.1)),
            entry("economic_indicators", "unemployment_rate", json!(3.6)),
            entry("economic_indicators", "fed_rate", json!(5.25)),
            entry("outlook", "market_outlook", json!("Cautiously Optimistic")),
            entry(
                "outlook",
                "recommended_sectors",
                json!(["Technology", "Healthcare", "Consumer Discretionary"]),
            ),
            entry(
                "outlook",
                "risk_factors",
                json!(["Inflation", "Geopolitical Tensions", "Supply Chain Disruptions"]),
            ),
            entry(
                "media",
                "market_chart",
                json!("https://example.com/market-q2-2023.png"),
            ),
            entry(
                "media",
                "sector_comparison_chart",
                json!("https://example.com/sector-comparison-q2-2023.png"),
            ),
        ],
    )
}

// ---------------------------------------------------------------------------
// DISC Assessment
// ---------------------------------------------------------------------------

fn disc_individual() -> Template {
    template(
        "DISC Assessment - John Doe",
        "<p>DISC personality assessment results for John Doe.</p>",
        vec![
            entry("assessment_info", "client_name", json!("John Doe")),
            entry("assessment_info", "assessment_date", json!("2023-06-10")),
            entry("assessment_info", "assessor", json!("Dr. Emily Johnson")),
            entry("disc_scores", "dominance", json!(68)),
            entry("disc_scores", "influence", json!(82)),
            entry("disc_scores", "steadiness", json!(45)),
            entry("disc_scores", "conscientiousness", json!(73)),
            entry("personality_profile", "primary_style", json!("Influence")),
            entry(
                "personality_profile",
                "secondary_style",
                json!("Conscientiousness"),
            ),
            entry(
                "personality_profile",
                "behavioral_pattern",
                json!("Persuader"),
            ),
            entry(
                "personality_profile",
                "key_strengths",
                json!(["Enthusiastic", "Persuasive", "Organized", "Detail-oriented"]),
            ),
            entry(
                "personality_profile",
                "potential_limitations",
                json!([
                    "May be overly talkative",
                    "Can be impatient with routine tasks"
                ]),
            ),
            entry(
                "work_style",
                "communication_style",
                json!("Open and expressive, but also values accuracy and precision"),
            ),
            entry(
                "work_style",
                "decision_making",
                json!("Makes decisions based on both people impact and logical analysis"),
            ),
            entry(
                "work_style",
                "team_role",
                json!("Motivator and Quality Controller"),
            ),
            entry(
                "work_style",
                "ideal_environment",
                json!(
                    "Collaborative setting with clear guidelines and opportunities to \
                     influence others"
                ),
            ),
            entry(
                "recommendations",
                "development_areas",
                json!([
                    "Active listening",
                    "Patience with routine tasks",
                    "Time management"
                ]),
            ),
            entry(
                "recommendations",
                "career_matches",
                json!([
                    "Sales Manager",
                    "Marketing Director",
                    "Project Manager",
                    "Training Specialist"
                ]),
            ),
            entry(
                "media",
                "disc_chart",
                json!("https://example.com/disc-chart-john-doe.png"),
            ),
        ],
    )
}

fn disc_team() -> Template {
    template(
        "Marketing Team DISC Assessment",
        "<p>Comprehensive DISC assessment for the Marketing Team.</p>",
        vec![
            entry("assessment_info", "team_name", json!("Marketing Team")),
            entry("assessment_info", "department", json!("Marketing")),
            entry("assessment_info", "assessment_date", json!("2023-05-15")),
            entry("assessment_info", "team_size", json!(8)),
            entry("assessment_info", "assessor", json!("Dr. Robert Williams")),
            entry("team_composition", "dominance_percentage", json!(25)),
            entry("team_composition", "influence_percentage", json!(38)),
            entry("team_composition", "steadiness_percentage", json!(12)),
            entry(
                "team_composition",
                "conscientiousness_percentage",
                json!(25),
            ),
            entry("team_composition", "primary_team_style", json!("Influence")),
            entry(
                "team_dynamics",
                "team_strengths",
                json!([
                    "Creative problem-solving",
                    "Persuasive communication",
                    "Attention to detail",
                    "Goal-oriented"
                ]),
            ),
            entry(
                "team_dynamics",
                "team_challenges",
                json!([
                    "May lack patience for implementation",
                    "Could benefit from more process orientation",
                    "Potential for conflict between task-focused and people-focused members"
                ]),
            ),
            entry(
                "team_dynamics",
                "communication_patterns",
                json!(
                    "Primarily open and expressive, with some members preferring direct \
                     and factual communication"
                ),
            ),
            entry(
                "team_dynamics",
                "decision_making_process",
                json!(
                    "Tends to be collaborative but can sometimes move too quickly without \
                     thorough analysis"
                ),
            ),
            entry(
                "team_dynamics",
                "conflict_resolution_style",
                json!(
                    "Generally addresses conflicts openly, though some team members may \
                     avoid confrontation"
                ),
            ),
            entry(
                "recommendations",
                "team_development",
                json!([
                    "Implement structured project management processes",
                    "Create clear roles that leverage individual DISC styles",
                    "Establish communication protocols that respect different styles"
                ]),
            ),
            entry(
                "recommendations",
                "leadership_approach",
                json!(
                    "Balance between providing clear direction and allowing creative \
                     freedom; recognize individual contributions"
                ),
            ),
            entry(
                "recommendations",
                "team_building_activities",
                json!([
                    "Problem-solving workshops",
                    "Communication style training",
                    "Role clarity exercises"
                ]),
            ),
            entry(
                "media",
                "team_disc_chart",
                json!("https://example.com/marketing-team-disc.png"),
            ),
            entry(
                "media",
                "team_dynamics_chart",
                json!("https://example.com/team-dynamics-chart.png"),
            ),
        ],
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_yields_empty_template() {
        let t = lookup("Real Estate", "Castle");
        assert!(t.title.is_empty());
        assert!(t.content.is_empty());
        assert_eq!(t.status, "draft");
        assert!(t.meta.is_empty());

        let t = lookup("Knitting", "Sweater Pattern");
        assert!(t.is_empty());
        assert_eq!(t.status, "draft");
    }

    #[test]
    fn every_catalog_entry_resolves() {
        for (category, names) in catalog() {
            for name in *names {
                let t = lookup(category, name);
                assert!(!t.is_empty(), "{category}/{name} should have content");
                assert_eq!(t.status, "draft");
                assert!(t.meta.iter().all(MetaEntry::is_complete));
            }
        }
    }

    #[test]
    fn residential_template_carries_mixed_value_types() {
        let t = lookup("Real Estate", "Residential Property");
        assert_eq!(t.title, "Sample Residential Property");

        let bedrooms = t.meta.iter().find(|e| e.field == "bedrooms").unwrap();
        assert_eq!(bedrooms.value, json!(3));

        let amenities = t.meta.iter().find(|e| e.field == "amenities").unwrap();
        assert!(amenities.value.is_array());
        assert_eq!(amenities.value[0], "Garage");
    }

    #[test]
    fn template_to_draft_copies_without_mutating() {
        let t = lookup("Stock Market", "Stock Profile");
        let mut draft = t.to_draft();
        draft.title = "MSFT - Microsoft".to_string();
        draft.acpt.meta.clear();

        // The catalog hands out fresh copies; a mutated draft never leaks back.
        let again = lookup("Stock Market", "Stock Profile");
        assert_eq!(again.title, "AAPL - Apple Inc.");
        assert_eq!(again.meta.len(), 20);
    }
}
