//! Content pipeline status: transcription service health, pipeline stages,
//! modelled content and a recent activity log.

use std::time::Duration;

use mc_sim::{BoundedLog, Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

use crate::clock;

pub const INTERVAL: Duration = Duration::from_secs(12);
pub const ACTIVITY_CAPACITY: usize = 5;
/// Used when no content library is available.
pub const DEFAULT_TOTAL_VIDEOS: u32 = 11;

pub const RESPONSE_TIME: Drift = Drift::new(0.5, 5.0, Bounds::new(10.0, 50.0));
pub const SUCCESS_RATE: Drift = Drift::new(0.4, 1.0, Bounds::new(90.0, 99.0));
pub const ACCURACY: Drift = Drift::new(0.3, 2.0, Bounds::new(85.0, 98.0));

const ACTIVITIES: [&str; 5] = [
    "Content pipeline health check completed",
    "Assembly AI transcription quality verified",
    "Value tier classification updated",
    "Content library indexed successfully",
    "Pipeline performance metrics refreshed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueTier {
    S,
    A,
    B,
    C,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub s: u32,
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub total_size: String,
    pub transcripts: u32,
    pub categories: Vec<String>,
    pub tiers: TierCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetrics {
    pub total_videos: u32,
    pub processed_today: u32,
    pub processing_queue: u32,
    pub average_processing_time: f64,
    pub success_rate: f64,
    pub total_transcript_lines: u32,
    pub average_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcriber {
    pub api_status: String,
    pub response_time: f64,
    pub credits_used: u32,
    pub credits_remaining: u32,
    pub monthly_quota: u32,
    pub last_api_call: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub stage: String,
    pub status: String,
    pub description: String,
    pub processed_count: u32,
    pub avg_time: String,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelledContent {
    pub id: u32,
    pub title: String,
    pub url: String,
    pub processed_at: String,
    pub transcript_lines: u32,
    pub tier: ValueTier,
    pub category: String,
    pub duration: String,
    pub accuracy: f64,
    pub key_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub ticks: u64,
    pub metrics: PipelineMetrics,
    pub library: Library,
    pub activity: BoundedLog<Activity>,
    pub transcriber: Transcriber,
    pub stages: Vec<Stage>,
    pub content: Vec<ModelledContent>,
}

fn stage(
    name: &str,
    description: &str,
    processed_count: u32,
    avg_time: &str,
    success_rate: f64,
) -> Stage {
    Stage {
        stage: name.into(),
        status: "READY".into(),
        description: description.into(),
        processed_count,
        avg_time: avg_time.into(),
        success_rate,
    }
}

#[allow(clippy::too_many_arguments)]
fn content(
    id: u32,
    title: &str,
    url: &str,
    processed_at: &str,
    transcript_lines: u32,
    tier: ValueTier,
    category: &str,
    duration: &str,
    accuracy: f64,
    key_topics: &[&str],
) -> ModelledContent {
    ModelledContent {
        id,
        title: title.into(),
        url: url.into(),
        processed_at: processed_at.into(),
        transcript_lines,
        tier,
        category: category.into(),
        duration: duration.into(),
        accuracy,
        key_topics: key_topics.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn seed() -> Pipeline {
    seed_with_total(DEFAULT_TOTAL_VIDEOS)
}

/// Seed record with the processed-video count read from a content library.
pub fn seed_with_total(total_videos: u32) -> Pipeline {
    Pipeline {
        ticks: 0,
        metrics: PipelineMetrics {
            total_videos,
            processed_today: 3,
            processing_queue: 0,
            average_processing_time: 47.3,
            success_rate: 96.8,
            total_transcript_lines: 847,
            average_accuracy: 94.2,
        },
        library: Library {
            total_size: "2.4MB".into(),
            transcripts: total_videos,
            categories: ["Facebook Ads", "AI Tools", "Business Strategy", "SEO"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            tiers: TierCounts { s: 4, a: 3, b: 3, c: 1 },
        },
        activity: BoundedLog::new(ACTIVITY_CAPACITY),
        transcriber: Transcriber {
            api_status: "OPERATIONAL".into(),
            response_time: 23.7,
            credits_used: 47,
            credits_remaining: 953,
            monthly_quota: 1_000,
            last_api_call: clock::clock_time(clock::mission_epoch()),
        },
        stages: vec![
            stage("URL Input", "Instagram URL validation", total_videos, "2.1s", 100.0),
            stage("Video Download", "yt-dlp extraction", total_videos, "15.3s", 100.0),
            stage("Audio Conversion", "MP4 to audio format", total_videos, "8.7s", 100.0),
            stage("Assembly AI", "Speech transcription", total_videos, "23.4s", 96.8),
            stage("Format Processing", "Line-by-line formatting", total_videos, "1.2s", 100.0),
            stage("Content Analysis", "Value tier classification", total_videos, "3.8s", 94.2),
        ],
        content: vec![
            content(
                1,
                "Facebook Ads Mastery",
                "instagram.com/reel/abc123",
                "2026-02-25 14:23:15",
                87,
                ValueTier::S,
                "Facebook Ads",
                "45s",
                96.4,
                &["Ad targeting", "Conversion optimization", "Creative testing"],
            ),
            content(
                2,
                "AI Tools for Business",
                "instagram.com/reel/def456",
                "2026-02-25 15:47:32",
                73,
                ValueTier::A,
                "AI Tools",
                "38s",
                94.8,
                &["ChatGPT prompts", "Automation", "Productivity"],
            ),
            content(
                3,
                "SaaS Growth Strategy",
                "instagram.com/reel/ghi789",
                "2026-02-26 09:15:47",
                92,
                ValueTier::A,
                "Business Strategy",
                "52s",
                97.2,
                &["Product-market fit", "User acquisition", "Retention"],
            ),
        ],
    }
}

pub fn next(prev: &Pipeline, rng: &mut SimRng) -> Pipeline {
    let ticks = prev.ticks.saturating_add(1);
    let now = clock::clock_time(clock::at(ticks, INTERVAL));

    let transcriber = Transcriber {
        response_time: RESPONSE_TIME.apply(prev.transcriber.response_time, rng),
        last_api_call: now.clone(),
        ..prev.transcriber.clone()
    };
    let metrics = PipelineMetrics {
        success_rate: SUCCESS_RATE.apply(prev.metrics.success_rate, rng),
        average_accuracy: ACCURACY.apply(prev.metrics.average_accuracy, rng),
        ..prev.metrics.clone()
    };
    let event = rng.pick(&ACTIVITIES).copied().unwrap_or(ACTIVITIES[0]);

    Pipeline {
        ticks,
        metrics,
        transcriber,
        activity: prev.activity.pushed(Activity {
            time: now,
            event: event.to_string(),
        }),
        library: prev.library.clone(),
        stages: prev.stages.clone(),
        content: prev.content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_logged_every_tick() {
        let mut rng = SimRng::seeded(12);
        let mut state = seed();
        for i in 1..=8 {
            state = next(&state, &mut rng);
            assert_eq!(state.activity.len(), i.min(ACTIVITY_CAPACITY));
        }
        assert_eq!(state.transcriber.last_api_call, "18:56:36");
    }

    #[test]
    fn library_total_feeds_seed() {
        let state = seed_with_total(27);
        assert_eq!(state.metrics.total_videos, 27);
        assert_eq!(state.library.transcripts, 27);
        assert!(state.stages.iter().all(|s| s.processed_count == 27));
    }
}
