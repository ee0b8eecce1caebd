//! Illustrative per-category datasets.
//!
//! These series depend on no remote data; they exist so a template category
//! can be charted before anything is fetched. Values mirror the kinds of
//! documents the catalog templates describe. The stock series uses a small
//! fixed-seed generator so every run draws the same "random" walk.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Point {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
}

fn series(name: &str, labelled: &[(&str, f64)]) -> Series {
    Series {
        name: name.to_string(),
        points: labelled
            .iter()
            .map(|(label, value)| Point {
                label: label.to_string(),
                value: *value,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Category datasets
// ---------------------------------------------------------------------------

/// Sample charts for a template category. Unknown categories get none.
pub fn sample_charts(category: &str) -> Vec<Chart> {
    match category {
        "Real Estate" => real_estate(),
        "Stock Market" => stock_market(),
        "DISC Assessment" => disc_assessment(),
        _ => Vec::new(),
    }
}

fn real_estate() -> Vec<Chart> {
    let months = [
        "2023-01", "2023-02", "2023-03", "2023-04", "2023-05", "2023-06", "2023-07", "2023-08",
        "2023-09", "2023-10", "2023-11", "2023-12",
    ];
    let prices = [
        450000.0, 455000.0, 460000.0, 458000.0, 465000.0, 470000.0, 475000.0, 480000.0, 485000.0,
        490000.0, 495000.0, 500000.0,
    ];
    let neighborhood = [
        440000.0, 445000.0, 450000.0, 455000.0, 460000.0, 465000.0, 470000.0, 475000.0, 480000.0,
        485000.0, 490000.0, 495000.0,
    ];

    let trend = Chart {
        title: "Property Price vs. Neighborhood Average".to_string(),
        series: vec![
            Series {
                name: "Property Price".to_string(),
                points: labelled(&months, &prices),
            },
            Series {
                name: "Neighborhood Average".to_string(),
                points: labelled(&months, &neighborhood),
            },
        ],
    };

    let features = Chart {
        title: "Property Features Comparison".to_string(),
        series: vec![
            series(
                "This Property",
                &[
                    ("Bedrooms", 4.0),
                    ("Bathrooms", 3.0),
                    ("Square Feet", 2500.0),
                    ("Garage Spaces", 2.0),
                    ("Age (Years)", 5.0),
                ],
            ),
            series(
                "Comparable Properties",
                &[
                    ("Bedrooms", 3.0),
                    ("Bathrooms", 2.0),
                    ("Square Feet", 2200.0),
                    ("Garage Spaces", 2.0),
                    ("Age (Years)", 8.0),
                ],
            ),
        ],
    };

    vec![trend, features]
}

fn stock_market() -> Vec<Chart> {
    let mut noise = Lcg::new(7);
    let mut price_points = Vec::with_capacity(30);
    let mut volume_points = Vec::with_capacity(30);
    for day in 0..30 {
        let label = format!("2023-01-{:02}", day + 1);
        let price = 150.0 + day as f64 + (noise.next_f64() * 6.0 - 3.0);
        price_points.push(Point {
            label: label.clone(),
            value: (price * 100.0).round() / 100.0,
        });
        let volume = 5_000_000.0 + noise.next_f64() * 10_000_000.0;
        volume_points.push(Point {
            label,
            value: volume.round(),
        });
    }

    let price_history = Chart {
        title: "Stock Price History".to_string(),
        series: vec![Series {
            name: "Price".to_string(),
            points: price_points,
        }],
    };
    let trading_volume = Chart {
        title: "Trading Volume".to_string(),
        series: vec![Series {
            name: "Volume".to_string(),
            points: volume_points,
        }],
    };
    let sectors = Chart {
        title: "Sector Performance (%)".to_string(),
        series: vec![series(
            "Performance (%)",
            &[
                ("Technology", 12.5),
                ("Healthcare", 8.3),
                ("Financials", 5.7),
                ("Consumer Discretionary", 9.2),
                ("Energy", -3.1),
                ("Utilities", 2.8),
                ("Materials", 4.5),
            ],
        )],
    };

    vec![price_history, trading_volume, sectors]
}

fn disc_assessment() -> Vec<Chart> {
    let profile = Chart {
        title: "DISC Profile Comparison".to_string(),
        series: vec![
            series(
                "Individual Score",
                &[
                    ("Dominance", 68.0),
                    ("Influence", 82.0),
                    ("Steadiness", 45.0),
                    ("Conscientiousness", 73.0),
                ],
            ),
            series(
                "Team Average",
                &[
                    ("Dominance", 60.0),
                    ("Influence", 65.0),
                    ("Steadiness", 55.0),
                    ("Conscientiousness", 62.0),
                ],
            ),
        ],
    };
    let traits = Chart {
        title: "Behavioral Traits Assessment".to_string(),
        series: vec![series(
            "Score",
            &[
                ("Communication", 85.0),
                ("Decision Making", 75.0),
                ("Conflict Resolution", 60.0),
                ("Problem Solving", 80.0),
                ("Team Collaboration", 90.0),
            ],
        )],
    };

    vec![profile, traits]
}

fn labelled(labels: &[&str], values: &[f64]) -> Vec<Point> {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| Point {
            label: label.to_string(),
            value: *value,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Deterministic noise
// ---------------------------------------------------------------------------

/// Minimal linear congruential generator. Fixed seed, same walk every run.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407),
        }
    }

    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_has_no_charts() {
        assert!(sample_charts("Knitting").is_empty());
    }

    #[test]
    fn real_estate_series_are_aligned() {
        let charts = sample_charts("Real Estate");
        assert_eq!(charts.len(), 2);
        let trend = &charts[0];
        assert_eq!(trend.series.len(), 2);
        assert_eq!(trend.series[0].points.len(), 12);
        assert_eq!(trend.series[0].points[0].value, 450000.0);
        assert_eq!(trend.series[1].points[11].value, 495000.0);
    }

    #[test]
    fn stock_walk_is_deterministic() {
        let a = sample_charts("Stock Market");
        let b = sample_charts("Stock Market");
        assert_eq!(a[0].series[0].points[5].value, b[0].series[0].points[5].value);
        assert_eq!(a[0].series[0].points.len(), 30);

        // Prices stay near the 150..180 ramp, volumes in the 5M..15M band.
        for point in &a[0].series[0].points {
            assert!(point.value > 140.0 && point.value < 190.0);
        }
        for point in &a[1].series[0].points {
            assert!(point.value >= 5_000_000.0 && point.value <= 15_000_000.0);
        }
    }

    #[test]
    fn disc_scores_are_bounded() {
        let charts = sample_charts("DISC Assessment");
        for chart in &charts {
            for series in &chart.series {
                for point in &series.points {
                    assert!(point.value >= 0.0 && point.value <= 100.0);
                }
            }
        }
    }
}
