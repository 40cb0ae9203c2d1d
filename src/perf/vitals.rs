//! Core Web Vitals scoring for reports sent by the browser.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Fcp,
    Lcp,
    Fid,
    Cls,
    Ttfb,
    Tbt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    pub fn points(&self) -> u32 {
        match self {
            Rating::Good => 100,
            Rating::NeedsImprovement => 50,
            Rating::Poor => 0,
        }
    }
}

impl Metric {
    /// `(good, needs_improvement)` upper bounds, inclusive.
    pub fn thresholds(&self) -> (f64, f64) {
        match self {
            Metric::Fcp => (1800.0, 3000.0),
            Metric::Lcp => (2500.0, 4000.0),
            Metric::Fid => (100.0, 300.0),
            Metric::Cls => (0.1, 0.25),
            Metric::Ttfb => (800.0, 1800.0),
            Metric::Tbt => (200.0, 600.0),
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Metric::Fcp => "Optimize critical CSS delivery and reduce render-blocking resources",
            Metric::Lcp => "Optimize images, preload key resources, and improve server response times",
            Metric::Fid => "Minimize JavaScript execution time and optimize third-party scripts",
            Metric::Cls => {
                "Set explicit dimensions for images and avoid inserting content above existing elements"
            }
            Metric::Ttfb => "Optimize server response time and consider CDN implementation",
            Metric::Tbt => "Reduce JavaScript execution time and break up long tasks",
        }
    }
}

pub fn rate(metric: Metric, value: f64) -> Rating {
    let (good, needs_improvement) = metric.thresholds();
    if value <= good {
        Rating::Good
    } else if value <= needs_improvement {
        Rating::NeedsImprovement
    } else {
        Rating::Poor
    }
}

/// A browser measurement. Metrics the page could not observe are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitalsReport {
    #[serde(default)]
    pub url: Option<String>,
    pub fcp: Option<f64>,
    pub lcp: Option<f64>,
    pub fid: Option<f64>,
    pub cls: Option<f64>,
    pub ttfb: Option<f64>,
    pub tbt: Option<f64>,
}

impl VitalsReport {
    fn values(&self) -> Vec<(Metric, f64)> {
        [
            (Metric::Fcp, self.fcp),
            (Metric::Lcp, self.lcp),
            (Metric::Fid, self.fid),
            (Metric::Cls, self.cls),
            (Metric::Ttfb, self.ttfb),
            (Metric::Tbt, self.tbt),
        ]
        .into_iter()
        .filter_map(|(m, v)| v.map(|v| (m, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// 0-100
    pub score: u32,
    pub ratings: BTreeMap<Metric, Rating>,
    pub recommendations: Vec<String>,
}

pub fn evaluate(report: &VitalsReport) -> Evaluation {
    let values = report.values();
    let mut ratings = BTreeMap::new();
    let mut recommendations: Vec<String> = Vec::new();
    let mut total = 0u32;

    for (metric, value) in &values {
        let rating = rate(*metric, *value);
        total += rating.points();
        if rating != Rating::Good {
            let rec = metric.recommendation().to_string();
            if !recommendations.contains(&rec) {
                recommendations.push(rec);
            }
        }
        ratings.insert(*metric, rating);
    }

    let score = if values.is_empty() {
        0
    } else {
        (total as f64 / values.len() as f64).round() as u32
    };

    Evaluation {
        score,
        ratings,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_boundaries() {
        assert_eq!(rate(Metric::Fcp, 1800.0), Rating::Good);
        assert_eq!(rate(Metric::Fcp, 1800.5), Rating::NeedsImprovement);
        assert_eq!(rate(Metric::Lcp, 4000.0), Rating::NeedsImprovement);
        assert_eq!(rate(Metric::Lcp, 4001.0), Rating::Poor);
        assert_eq!(rate(Metric::Cls, 0.05), Rating::Good);
        assert_eq!(rate(Metric::Cls, 0.3), Rating::Poor);
    }

    #[test]
    fn test_evaluate_scores_and_recommends() {
        let report = VitalsReport {
            url: None,
            fcp: Some(1000.0),
            lcp: Some(3000.0),
            fid: Some(50.0),
            cls: Some(0.5),
            ttfb: Some(500.0),
            tbt: Some(100.0),
        };
        let evaluation = evaluate(&report);
        // 100 + 50 + 100 + 0 + 100 + 100 = 450 / 6 = 75
        assert_eq!(evaluation.score, 75);
        assert_eq!(evaluation.ratings[&Metric::Lcp], Rating::NeedsImprovement);
        assert_eq!(evaluation.ratings[&Metric::Cls], Rating::Poor);
        assert_eq!(evaluation.recommendations.len(), 2);
    }

    #[test]
    fn test_partial_report_averages_present_metrics() {
        let report = VitalsReport {
            lcp: Some(5000.0),
            ttfb: Some(100.0),
            ..Default::default()
        };
        let evaluation = evaluate(&report);
        assert_eq!(evaluation.score, 50);
        assert_eq!(evaluation.ratings.len(), 2);
        assert_eq!(evaluate(&VitalsReport::default()).score, 0);
    }

    #[test]
    fn test_rating_wire_format() {
        assert_eq!(
            serde_json::to_value(Rating::NeedsImprovement).unwrap(),
            serde_json::json!("needs-improvement")
        );
    }
}
