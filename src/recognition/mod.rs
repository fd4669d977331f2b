//! Face recognition boundary.
//!
//! Check-in only depends on the [`RecognitionClient`] trait; the bundled
//! implementation simulates a recognizer with configurable latency and match
//! rate. A real engine plugs in behind the same trait without touching the
//! attendance workflow.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;

/// Outcome of one recognition attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionOutcome {
    pub matched: bool,
    /// Row id of the matched student, drawn from `candidates`.
    pub student_id: Option<i64>,
    pub confidence: f64,
}

impl RecognitionOutcome {
    pub fn no_match() -> Self {
        RecognitionOutcome {
            matched: false,
            student_id: None,
            confidence: 0.0,
        }
    }
}

#[async_trait]
pub trait RecognitionClient: Send + Sync {
    /// Attempt to match `image` (base64) against the candidate students
    /// enrolled in the scanning device's class.
    async fn recognize(
        &self,
        image: &str,
        device_id: &str,
        candidates: &[i64],
    ) -> Result<RecognitionOutcome>;
}

/// Simulated recognizer. Sleeps for the configured latency, then matches a
/// random candidate with the configured probability.
pub struct MockRecognition {
    latency_ms: u64,
    match_rate: f64,
}

impl MockRecognition {
    pub fn new(latency_ms: u64, match_rate: f64) -> Self {
        MockRecognition {
            latency_ms,
            match_rate: match_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl RecognitionClient for MockRecognition {
    async fn recognize(
        &self,
        _image: &str,
        device_id: &str,
        candidates: &[i64],
    ) -> Result<RecognitionOutcome> {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }

        if candidates.is_empty() {
            tracing::debug!("Recognition on device {} with empty roster", device_id);
            return Ok(RecognitionOutcome::no_match());
        }

        let (hit, pick, confidence) = {
            let mut rng = rand::rng();
            (
                rng.random_bool(self.match_rate),
                rng.random_range(0..candidates.len()),
                rng.random_range(0.82..0.995),
            )
        };

        if !hit {
            return Ok(RecognitionOutcome::no_match());
        }

        Ok(RecognitionOutcome {
            matched: true,
            student_id: Some(candidates[pick]),
            confidence,
        })
    }
}

/// Build the process-wide recognition client from configuration.
pub fn create_recognition_client(config: &AppConfig) -> Arc<dyn RecognitionClient> {
    Arc::new(MockRecognition::new(
        config.recognition.latency_ms,
        config.recognition.match_rate,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_matches_at_full_rate() {
        let client = MockRecognition::new(0, 1.0);
        let outcome = client.recognize("aGVsbG8=", "DEV-01", &[3, 5, 9]).await.unwrap();
        assert!(outcome.matched);
        assert!([3, 5, 9].contains(&outcome.student_id.unwrap()));
        assert!(outcome.confidence >= 0.82 && outcome.confidence < 1.0);
    }

    #[tokio::test]
    async fn test_never_matches_at_zero_rate() {
        let client = MockRecognition::new(0, 0.0);
        let outcome = client.recognize("aGVsbG8=", "DEV-01", &[3]).await.unwrap();
        assert_eq!(outcome, RecognitionOutcome::no_match());
    }

    #[tokio::test]
    async fn test_empty_roster_never_matches() {
        let client = MockRecognition::new(0, 1.0);
        let outcome = client.recognize("aGVsbG8=", "DEV-01", &[]).await.unwrap();
        assert!(!outcome.matched);
        assert_eq!(outcome.student_id, None);
    }
}
