//! Scripted generation backend for testing.

use async_trait::async_trait;
use fabula_core::PipelineProgress;
use fabula_error::{FabulaResult, GenerationError, GenerationErrorKind, HttpError};
use fabula_interface::{GenerationBackend, LearnRequest, PredictRequest, PredictResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// A single scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 2xx with this `content`
    Content(String),
    /// Non-success status with a body
    Status(u16, String),
    /// 2xx with no usable text
    Empty,
    /// Never resolves
    Hang,
}

/// Backend answering by context label, recording every request.
///
/// Contexts without a script get `fallback`.
pub struct MockBackend {
    scripts: HashMap<String, MockResponse>,
    fallback: MockResponse,
    learn_fails: bool,
    learn_hangs: bool,
    observer: Mutex<Option<watch::Receiver<PipelineProgress>>>,
    progress_at_calls: Arc<Mutex<Vec<u8>>>,
    predictions: Arc<Mutex<Vec<PredictRequest>>>,
    samples: Arc<Mutex<Vec<LearnRequest>>>,
}

impl MockBackend {
    /// Every context gets `fallback` unless scripted.
    pub fn new(fallback: MockResponse) -> Self {
        Self {
            scripts: HashMap::new(),
            fallback,
            learn_fails: false,
            learn_hangs: false,
            observer: Mutex::new(None),
            progress_at_calls: Arc::new(Mutex::new(Vec::new())),
            predictions: Arc::new(Mutex::new(Vec::new())),
            samples: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script the reply for one context label.
    pub fn on(mut self, context: &str, response: MockResponse) -> Self {
        self.scripts.insert(context.to_string(), response);
        self
    }

    /// Make every learn call fail.
    #[allow(dead_code)]
    pub fn failing_learn(mut self) -> Self {
        self.learn_fails = true;
        self
    }

    /// Make every learn call wait forever.
    #[allow(dead_code)]
    pub fn hanging_learn(mut self) -> Self {
        self.learn_hangs = true;
        self
    }

    /// Note the pipeline's progress each time a predict call arrives.
    #[allow(dead_code)]
    pub fn observe(&self, progress: watch::Receiver<PipelineProgress>) {
        *self.observer.lock().unwrap() = Some(progress);
    }

    /// Progress percent seen at each predict call, in call order.
    #[allow(dead_code)]
    pub fn progress_at_calls(&self) -> Vec<u8> {
        self.progress_at_calls.lock().unwrap().clone()
    }

    /// Number of predict calls made.
    pub fn call_count(&self) -> usize {
        self.predictions.lock().unwrap().len()
    }

    /// Predict requests in call order.
    pub fn predictions(&self) -> Vec<PredictRequest> {
        self.predictions.lock().unwrap().clone()
    }

    /// Learn requests received (including ones that were made to fail).
    #[allow(dead_code)]
    pub fn samples(&self) -> Vec<LearnRequest> {
        self.samples.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn predict(&self, request: &PredictRequest) -> FabulaResult<PredictResponse> {
        self.predictions.lock().unwrap().push(request.clone());
        if let Some(progress) = self.observer.lock().unwrap().as_ref() {
            let percent = *progress.borrow().percent();
            self.progress_at_calls.lock().unwrap().push(percent);
        }

        let response = self
            .scripts
            .get(request.context())
            .unwrap_or(&self.fallback)
            .clone();

        match response {
            MockResponse::Content(text) => Ok(PredictResponse::from_content(text)),
            MockResponse::Status(status, body) => {
                Err(GenerationError::new(GenerationErrorKind::Upstream { status, body }).into())
            }
            MockResponse::Empty => Ok(PredictResponse::default()),
            MockResponse::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending never resolves")
            }
        }
    }

    async fn learn(&self, request: &LearnRequest) -> FabulaResult<()> {
        self.samples.lock().unwrap().push(request.clone());
        if self.learn_hangs {
            std::future::pending::<()>().await;
        }
        if self.learn_fails {
            return Err(HttpError::new("learning endpoint unavailable").into());
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
