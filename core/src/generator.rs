use aippt_client::{TransportClient, TransportError};
use aippt_protocol::{Deck, GenerationRequest, Slide};
use async_trait::async_trait;
use std::time::Duration;

/// Upper bound on slides the offline generator builds, whatever was requested.
pub const MAX_STUB_SLIDES: usize = 50;

/// Something that turns a validated request into a deck.
#[async_trait]
pub trait DeckGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Deck, TransportError>;
}

#[async_trait]
impl DeckGenerator for TransportClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Deck, TransportError> {
        TransportClient::generate(self, request).await
    }
}

/// Offline generator that assembles a canned deck from the request itself.
/// Used by `--offline` and in tests; never fails.
#[derive(Debug, Clone, Default)]
pub struct StubGenerator {
    delay: Duration,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the service takes this long to answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn build_deck(request: &GenerationRequest) -> Deck {
        let sections: Vec<&str> = request
            .slide_breakdown
            .split([',', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let count = usize::try_from(request.slide_count)
            .unwrap_or(MAX_STUB_SLIDES)
            .min(MAX_STUB_SLIDES);

        let slides = (0..count)
            .map(|i| {
                let title = sections
                    .get(i)
                    .map(|s| capitalize(s))
                    .unwrap_or_else(|| format!("Slide {}", i + 1));
                let content = match i {
                    0 => format!(
                        "- What **{}** is about\n- Why it matters to {}\n- Goal: {}",
                        request.topic, request.target_audience, request.objective
                    ),
                    n if n + 1 == count => {
                        "- Key takeaways\n- Next steps\n- Questions?".to_string()
                    }
                    1 => format!(
                        "| Aspect | Value |\n|---|---|\n\
                         | Audience | {} |\n| Language | {} |\n| Source | `{}` |",
                        request.target_audience,
                        request.language.label(),
                        request.source_file_type
                    ),
                    2 => format!(
                        "Request sent to the service:\n\n```json\n{{\n  \"topic\": \"{}\",\n\
                         \x20 \"n_slides\": {},\n  \"lang\": \"{}\"\n}}\n```",
                        request.topic, request.slide_count, request.language
                    ),
                    n => format!("- Point {}.1\n- Point {}.2", n + 1, n + 1),
                };
                Slide { title, content }
            })
            .collect();

        Deck {
            title: request.topic.clone(),
            description: format!("{} for {}", request.objective, request.target_audience),
            slides,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl DeckGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Deck, TransportError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::build_deck(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aippt_protocol::{FileType, Language};

    fn request(n: u32, breakdown: &str) -> GenerationRequest {
        GenerationRequest {
            topic: "Cats".into(),
            objective: "Inform".into(),
            target_audience: "Kids".into(),
            slide_count: n,
            slide_breakdown: breakdown.into(),
            language: Language::Fr,
            source_file_url: "https://x.com/a.pdf".into(),
            source_file_type: FileType::Pdf,
        }
    }

    #[test]
    fn stub_deck_follows_breakdown_and_count() {
        let deck = StubGenerator::build_deck(&request(5, "intro, body,end"));
        let titles: Vec<&str> = deck.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Intro", "Body", "End", "Slide 4", "Slide 5"]);
        assert_eq!(deck.title, "Cats");
        assert_eq!(deck.description, "Inform for Kids");
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn stub_deck_shows_table_and_code() {
        let deck = StubGenerator::build_deck(&request(4, "a,b,c,d"));
        assert!(deck.slides[1].content.contains("| Language | French |"));
        assert!(deck.slides[2].content.contains("```json"));
        assert!(deck.slides[3].content.contains("Key takeaways"));
    }

    #[test]
    fn stub_deck_is_capped() {
        let deck = StubGenerator::build_deck(&request(u32::MAX, ""));
        assert_eq!(deck.slides.len(), MAX_STUB_SLIDES);
        assert_eq!(deck.slides[49].title, "Slide 50");
        assert!(deck.slides[49].content.contains("Key takeaways"));
    }

    #[tokio::test]
    async fn stub_generator_never_fails() {
        let deck = StubGenerator::new().generate(&request(1, "")).await.unwrap();
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].title, "Slide 1");
    }
}
