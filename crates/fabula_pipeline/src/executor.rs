//! Story generation driver.
//!
//! [`StoryPipeline`] runs the stages in order, threading each stage's output
//! into the next prompt, and publishes progress on a watch channel.

use crate::outline::{CharacterPayload, ScenePayload, WriterPayload};
use crate::{
    CHARACTER_CONTEXT, CHARACTER_RATING, CharacterOutline, FeedbackSink, RandomConcept,
    RemoteCaller, SCENE_CONTEXT, SCENE_RATING, STORY_RATING, SceneOutline, Stage, TITLE_CONTEXT,
    TITLE_RATING, TitleDraft, WRITER_CONTEXT, WRITER_RATING, character_prompt,
    fallback_characters, fallback_scenes, fallback_title, fallback_writers, normalize_characters,
    normalize_scenes, parse_json, reconcile_roster, scene_prompt, title_prompt,
    writer_prompt,
};
use fabula_core::{
    FabulaConfig, GeneratedStory, GenerationRequest, Genre, Phase, PipelineConfig,
    PipelineProgress, PromptSource, ServiceConfig, StoryLength, UpdateContext, genre_line,
};
use fabula_error::{
    BuilderError, BuilderErrorKind, FabulaResult, GenerationError, GenerationErrorKind,
};
use fabula_interface::{GenerationBackend, GenerationMode};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// A request with its prompt source resolved.
#[derive(Debug, Clone)]
struct StoryBrief {
    prompt: String,
    length: StoryLength,
    genres: Vec<String>,
    update: Option<UpdateContext>,
}

/// Runs generation requests against a backend.
///
/// One pipeline drives one run at a time; progress from concurrent runs on
/// the same pipeline would interleave on the shared channel.
///
/// # Example
///
/// ```no_run
/// use fabula_core::{FabulaConfig, GenerationRequest, StoryLength};
/// use fabula_models::ZegaClient;
/// use fabula_pipeline::StoryPipeline;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FabulaConfig::load()?;
/// let client = ZegaClient::new(config.service())?;
/// let pipeline = StoryPipeline::new(client, &config);
///
/// let request = GenerationRequest::builder()
///     .source(fabula_core::PromptSource::User("A sci-fi adventure on Mars".into()))
///     .length(StoryLength::Short)
///     .build()?;
/// let story = pipeline.generate(&request).await?;
/// println!("{} ({} scenes)", story.title(), story.scenes().len());
/// # Ok(())
/// # }
/// ```
pub struct StoryPipeline<B: GenerationBackend + 'static> {
    caller: RemoteCaller<B>,
    feedback: FeedbackSink<B>,
    config: PipelineConfig,
    catalog: Vec<Genre>,
    progress: watch::Sender<PipelineProgress>,
}

impl<B: GenerationBackend + 'static> StoryPipeline<B> {
    /// Create a pipeline from a loaded configuration.
    pub fn new(backend: B, config: &FabulaConfig) -> Self {
        Self::with_backend(
            Arc::new(backend),
            config.service(),
            config.pipeline().clone(),
            config.genres().clone(),
        )
    }

    /// Create a pipeline sharing an existing backend.
    pub fn with_backend(
        backend: Arc<B>,
        service: &ServiceConfig,
        config: PipelineConfig,
        catalog: Vec<Genre>,
    ) -> Self {
        let feedback = FeedbackSink::new(
            Arc::clone(&backend),
            service.user_id().clone(),
            *config.feedback_enabled(),
        );
        let (progress, _) = watch::channel(PipelineProgress::idle());
        Self {
            caller: RemoteCaller::new(backend, service),
            feedback,
            config,
            catalog,
            progress,
        }
    }

    /// Watch progress updates.
    pub fn subscribe(&self) -> watch::Receiver<PipelineProgress> {
        self.progress.subscribe()
    }

    /// The latest progress snapshot.
    pub fn progress(&self) -> PipelineProgress {
        self.progress.borrow().clone()
    }

    /// Run a request to completion.
    ///
    /// # Errors
    ///
    /// See [`generate_with_cancel`](Self::generate_with_cancel).
    pub async fn generate(&self, request: &GenerationRequest) -> FabulaResult<GeneratedStory> {
        self.generate_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Run a request, stopping before the next stage once `cancel` fires.
    ///
    /// An in-flight call is not interrupted; it is bounded by the request
    /// timeout. On any error progress resets to zero with phase
    /// [`Phase::Failed`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The prompt is blank
    /// - A remote call times out, fails upstream, or comes back empty
    /// - The scene stage yields no scenes
    /// - The run is cancelled
    #[tracing::instrument(
        skip(self, request, cancel),
        fields(run_id = tracing::field::Empty, length = %request.length())
    )]
    pub async fn generate_with_cancel(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> FabulaResult<GeneratedStory> {
        let run_id = Uuid::new_v4().simple().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());
        tracing::debug!(
            timeout_secs = self.caller.timeout().as_secs(),
            "Starting story generation"
        );

        match self.run(request, &run_id, cancel).await {
            Ok(story) => {
                tracing::info!(
                    title = %story.title(),
                    scenes = story.scenes().len(),
                    characters = story.characters().len(),
                    "Story generated"
                );
                Ok(story)
            }
            Err(e) => {
                tracing::error!(error = %e, "Story generation failed");
                self.progress
                    .send_replace(PipelineProgress::failed(e.user_message()));
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> FabulaResult<GeneratedStory> {
        self.report(Phase::Idle, 0, "Initializing AI Story Generator...");
        let brief = self.resolve(request)?;
        let genres = genre_line(&brief.genres);

        let mut stage = Stage::Title;
        loop {
            let phase = stage.phase();
            let (enter, leave) = stage.checkpoints();
            let label = stage.label(brief.length);

            if let Stage::Complete(story) = stage {
                self.report(phase, leave, label);
                tokio::time::sleep(self.config.completion_delay()).await;
                return Ok(story);
            }

            if cancel.is_cancelled() {
                tracing::info!(stage = %phase, "Generation cancelled");
                return Err(GenerationError::new(GenerationErrorKind::Cancelled).into());
            }

            self.report(phase, enter, label.clone());

            stage = match stage {
                Stage::Title => {
                    let title = self.title_stage(&brief, &genres).await?;
                    Stage::Characters { title }
                }
                Stage::Characters { title } => {
                    let characters = self.character_stage(&title, &genres).await?;
                    Stage::Scenes { title, characters }
                }
                Stage::Scenes { title, characters } => {
                    let scenes = self
                        .scene_stage(&title, &characters, brief.length, &genres)
                        .await?;
                    Stage::Writers {
                        title,
                        characters,
                        scenes,
                    }
                }
                Stage::Writers {
                    title,
                    characters,
                    scenes,
                } => {
                    let writers = self.writer_stage(&title, &brief.genres, &genres).await?;
                    Stage::Finalize {
                        title,
                        characters,
                        scenes,
                        writers,
                    }
                }
                Stage::Finalize {
                    title,
                    characters,
                    scenes,
                    writers,
                } => Stage::Complete(self.finalize(
                    title,
                    &characters,
                    &scenes,
                    writers,
                    run_id,
                    enter,
                )?),
                Stage::Complete(story) => Stage::Complete(story),
            };

            // finalize reports its own intermediate checkpoints
            if phase != Phase::Finalize {
                self.report(phase, leave, label);
            }
        }
    }

    /// Resolve the prompt source, drawing a concept for random requests.
    fn resolve(&self, request: &GenerationRequest) -> FabulaResult<StoryBrief> {
        match request.source() {
            PromptSource::User(prompt) => {
                if prompt.trim().is_empty() {
                    return Err(BuilderError::new(BuilderErrorKind::ValidationFailed(
                        "Please enter a story description".to_string(),
                    ))
                    .into());
                }
                Ok(StoryBrief {
                    prompt: prompt.trim().to_string(),
                    length: *request.length(),
                    genres: request.genres().clone(),
                    update: request.update().clone(),
                })
            }
            PromptSource::Random => {
                let concept = RandomConcept::draw(&mut rand::thread_rng(), &self.catalog);
                tracing::info!(
                    prompt = %concept.prompt(),
                    length = %concept.length(),
                    genres = ?concept.genres(),
                    "Drew random story concept"
                );
                self.report(
                    Phase::Idle,
                    5,
                    format!(
                        "Random story: {} length with {} genres...",
                        concept.length(),
                        concept.genres().len()
                    ),
                );
                Ok(StoryBrief {
                    prompt: concept.prompt().clone(),
                    length: *concept.length(),
                    genres: concept.genres().clone(),
                    update: request.update().clone(),
                })
            }
        }
    }

    async fn title_stage(&self, brief: &StoryBrief, genres: &str) -> FabulaResult<TitleDraft> {
        let prompt = title_prompt(&brief.prompt, brief.update.as_ref(), genres);
        let raw = self
            .caller
            .call(&prompt, TITLE_CONTEXT, GenerationMode::Scene)
            .await?;

        let title = match parse_json::<TitleDraft>(&raw) {
            Ok(draft) if !draft.title().trim().is_empty() => draft,
            Ok(_) => {
                absorb(Phase::Title, "title is blank");
                fallback_title(&raw)
            }
            Err(e) => {
                absorb(Phase::Title, e.user_message());
                fallback_title(&raw)
            }
        };

        self.feedback.submit(
            &format!("Title: {}\nDescription: {}", title.title(), title.description()),
            TITLE_RATING,
        );
        Ok(title)
    }

    async fn character_stage(
        &self,
        title: &TitleDraft,
        genres: &str,
    ) -> FabulaResult<Vec<CharacterOutline>> {
        let prompt = character_prompt(title, genres);
        let raw = self
            .caller
            .call(&prompt, CHARACTER_CONTEXT, GenerationMode::Scene)
            .await?;

        let characters = match parse_json::<CharacterPayload>(&raw) {
            Ok(payload) if !payload.characters.is_empty() => payload.characters,
            Ok(_) => {
                absorb(Phase::Characters, "character list is empty");
                fallback_characters(&raw)
            }
            Err(e) => {
                absorb(Phase::Characters, e.user_message());
                fallback_characters(&raw)
            }
        };

        let sample = characters
            .iter()
            .map(|c| {
                format!(
                    "{}: {}",
                    c.display_name().unwrap_or_default(),
                    c.description().as_deref().unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.feedback.submit(&sample, CHARACTER_RATING);

        tracing::debug!(count = characters.len(), "Character stage complete");
        Ok(characters)
    }

    async fn scene_stage(
        &self,
        title: &TitleDraft,
        characters: &[CharacterOutline],
        length: StoryLength,
        genres: &str,
    ) -> FabulaResult<Vec<SceneOutline>> {
        let prompt = scene_prompt(title, characters, length, genres);
        let raw = self
            .caller
            .call(&prompt, SCENE_CONTEXT, GenerationMode::Scene)
            .await?;

        let scenes = match parse_json::<ScenePayload>(&raw) {
            Ok(payload) => payload.scenes,
            Err(e) => {
                absorb(Phase::Scenes, e.user_message());
                let names: Vec<String> = characters
                    .iter()
                    .filter_map(|c| c.display_name().map(str::to_string))
                    .collect();
                fallback_scenes(&raw, &names)
            }
        };

        if scenes.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::GenerationFailed).into());
        }

        let range = length.scene_range();
        if !range.contains(scenes.len()) {
            tracing::debug!(
                count = scenes.len(),
                min = range.min(),
                max = range.max(),
                "Scene count outside requested range"
            );
        }

        let sample = scenes
            .iter()
            .map(|s| {
                format!(
                    "{}: {}",
                    s.event().as_deref().unwrap_or_default(),
                    s.description().as_deref().unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        self.feedback.submit(&sample, SCENE_RATING);

        Ok(scenes)
    }

    async fn writer_stage(
        &self,
        title: &TitleDraft,
        selected: &[String],
        genres: &str,
    ) -> FabulaResult<String> {
        let prompt = writer_prompt(title, genres);
        let raw = self
            .caller
            .call(&prompt, WRITER_CONTEXT, GenerationMode::Continuation)
            .await?;

        let writers = match parse_json::<WriterPayload>(&raw) {
            Ok(payload) if !payload.writers.trim().is_empty() => payload.writers.trim().to_string(),
            Ok(_) => {
                absorb(Phase::Writers, "writers is blank");
                fallback_writers(&raw, selected)
            }
            Err(e) => {
                absorb(Phase::Writers, e.user_message());
                fallback_writers(&raw, selected)
            }
        };

        let subject = if selected.is_empty() {
            "story".to_string()
        } else {
            selected.join(", ")
        };
        self.feedback.submit(
            &format!("Writers for {}: {}", subject, writers),
            WRITER_RATING,
        );
        Ok(writers)
    }

    fn finalize(
        &self,
        title: TitleDraft,
        characters: &[CharacterOutline],
        scenes: &[SceneOutline],
        writers: String,
        run_id: &str,
        start: u8,
    ) -> FabulaResult<GeneratedStory> {
        let label = "Step 5/5: Processing and finalizing...";

        let scenes = normalize_scenes(scenes, run_id)?;
        self.report(Phase::Finalize, start + 5, label);

        let mut roster = normalize_characters(characters);
        self.report(Phase::Finalize, start + 10, label);

        reconcile_roster(&scenes, &mut roster);
        self.report(Phase::Finalize, start + 15, label);

        let story = GeneratedStory::builder()
            .title(title.title().clone())
            .description(title.description().clone())
            .scenes(scenes)
            .characters(roster)
            .writers(Some(writers))
            .build()?;

        let names = story
            .characters()
            .iter()
            .map(|c| c.name().as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.feedback.submit(
            &format!(
                "Story: {}\n{}\nScenes: {}\nCharacters: {}",
                story.title(),
                story.description(),
                story.scenes().len(),
                names
            ),
            STORY_RATING,
        );

        Ok(story)
    }

    fn report(&self, phase: Phase, percent: u8, label: impl Into<String>) {
        let progress = PipelineProgress::new(phase, percent, label);
        tracing::debug!(
            stage = %progress.phase(),
            percent = progress.percent(),
            label = %progress.label(),
            "Progress"
        );
        self.progress.send_replace(progress);
    }
}

/// Log a parse failure that a fallback is about to absorb.
fn absorb(phase: Phase, message: impl Into<String>) {
    let kind = GenerationErrorKind::ParseFailure {
        stage: phase.to_string(),
        message: message.into(),
    };
    tracing::warn!(stage = %phase, error = %kind, "Using fallback output");
}
