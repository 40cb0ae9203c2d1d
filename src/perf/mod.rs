//! Front-end performance helpers: critical CSS, Core Web Vitals scoring and
//! image load tracking.

pub mod critical_css;
pub mod vitals;

use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, sync::Arc};
use tokio::sync::RwLock;

/// Only the most recent events are kept.
pub const MAX_IMAGE_EVENTS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLoadEvent {
    pub src: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_time: Option<f64>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default)]
    pub is_fallback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub total: usize,
    pub success: usize,
    pub failures: usize,
    pub fallbacks_used: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ImageMetrics {
    events: Arc<RwLock<VecDeque<ImageLoadEvent>>>,
}

impl ImageMetrics {
    pub async fn record(&self, batch: Vec<ImageLoadEvent>) -> ImageSummary {
        let mut events = self.events.write().await;
        for mut event in batch {
            if event.timestamp == 0 {
                event.timestamp = chrono::Utc::now().timestamp_millis();
            }
            if !event.success {
                tracing::warn!(
                    src = %event.src,
                    error = event.error.as_deref().unwrap_or("unknown"),
                    component = event.component.as_deref().unwrap_or("-"),
                    "Image failed to load"
                );
            }
            events.push_back(event);
            while events.len() > MAX_IMAGE_EVENTS {
                events.pop_front();
            }
        }
        summarize(events.iter())
    }

    pub async fn summary(&self) -> ImageSummary {
        summarize(self.events.read().await.iter())
    }

    pub async fn events(&self) -> Vec<ImageLoadEvent> {
        self.events.read().await.iter().cloned().collect()
    }
}

fn summarize<'a>(events: impl Iterator<Item = &'a ImageLoadEvent>) -> ImageSummary {
    events.fold(ImageSummary::default(), |mut s, e| {
        s.total += 1;
        if e.success {
            s.success += 1;
        } else {
            s.failures += 1;
        }
        if e.is_fallback {
            s.fallbacks_used += 1;
        }
        s
    })
}
