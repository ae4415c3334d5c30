use crate::error::SessionError;
use crate::generator::DeckGenerator;
use aippt_protocol::{Event, Op, Submission};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info};

/// What the user sees when a generation fails; details only go to the log.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error occurred while generating the presentation.";

/// Handle to the background task that runs generations.
///
/// Submissions are processed one at a time, in order. Each `Op::Generate`
/// yields `GenerationStarted` followed by exactly one of `DeckReady` or
/// `GenerationFailed`, all tagged with the submission id.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

struct Inner {
    tx_submit: mpsc::Sender<Submission>,
    rx_event: Mutex<mpsc::Receiver<Event>>,
}

impl Session {
    pub fn spawn(generator: Arc<dyn DeckGenerator>) -> Self {
        let (tx_submit, mut rx_submit) = mpsc::channel::<Submission>(16);
        let (tx_event, rx_event) = mpsc::channel::<Event>(64);

        tokio::spawn(async move {
            while let Some(Submission { id, op }) = rx_submit.recv().await {
                match op {
                    Op::Generate(request) => {
                        let _ = tx_event
                            .send(Event::GenerationStarted { id: id.clone() })
                            .await;
                        let event = match generator.generate(&request).await {
                            Ok(deck) => {
                                let slides = deck.slides.len();
                                info!(submission = %id, slides, "generation finished");
                                Event::DeckReady { id, deck }
                            }
                            Err(err) => {
                                error!(submission = %id, error = %err, "generation failed");
                                Event::GenerationFailed {
                                    id,
                                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                                }
                            }
                        };
                        if tx_event.send(event).await.is_err() {
                            break;
                        }
                    }
                    Op::Shutdown => {
                        let _ = tx_event.send(Event::ShutdownComplete).await;
                        break;
                    }
                }
            }
        });

        Self {
            inner: Arc::new(Inner {
                tx_submit,
                rx_event: Mutex::new(rx_event),
            }),
        }
    }

    /// Queue an operation and return its submission id.
    pub async fn submit(&self, op: Op) -> Result<String, SessionError> {
        let submission = Submission::new(op);
        let id = submission.id.clone();
        self.inner
            .tx_submit
            .send(submission)
            .await
            .map_err(|_| SessionError::ChannelSend)?;
        Ok(id)
    }

    pub async fn next_event(&self) -> Option<Event> {
        self.inner.rx_event.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::StubGenerator;
    use aippt_client::TransportError;
    use aippt_protocol::{Deck, FileType, GenerationRequest, Language};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DeckGenerator for Failing {
        async fn generate(&self, _request: &GenerationRequest) -> Result<Deck, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Status { status: 502, body: "upstream".into() })
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            topic: "Cats".into(),
            objective: "Inform".into(),
            target_audience: "Kids".into(),
            slide_count: 2,
            slide_breakdown: "intro,end".into(),
            language: Language::En,
            source_file_url: "https://x.com/a.pdf".into(),
            source_file_type: FileType::Pdf,
        }
    }

    #[tokio::test]
    async fn generate_reports_started_then_ready() {
        let session = Session::spawn(Arc::new(StubGenerator::new()));
        let id = session.submit(Op::Generate(request())).await.unwrap();

        match session.next_event().await {
            Some(Event::GenerationStarted { id: started }) => assert_eq!(started, id),
            other => panic!("unexpected event {other:?}"),
        }
        match session.next_event().await {
            Some(Event::DeckReady { id: ready, deck }) => {
                assert_eq!(ready, id);
                assert_eq!(deck.slides.len(), 2);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_is_reported_generically() {
        let generator = Arc::new(Failing { calls: AtomicUsize::new(0) });
        let session = Session::spawn(generator.clone());
        let id = session.submit(Op::Generate(request())).await.unwrap();

        assert!(matches!(session.next_event().await, Some(Event::GenerationStarted { .. })));
        match session.next_event().await {
            Some(Event::GenerationFailed { id: failed, message }) => {
                assert_eq!(failed, id);
                assert_eq!(message, GENERIC_FAILURE_MESSAGE);
                assert!(!message.contains("502"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn shutdown_ends_the_session() {
        let session = Session::spawn(Arc::new(StubGenerator::new()));
        session.submit(Op::Shutdown).await.unwrap();
        assert!(matches!(session.next_event().await, Some(Event::ShutdownComplete)));
        assert!(session.next_event().await.is_none());
        assert!(matches!(
            session.submit(Op::Generate(request())).await,
            Err(SessionError::ChannelSend)
        ));
    }
}
