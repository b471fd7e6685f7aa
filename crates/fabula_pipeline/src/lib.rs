//! Staged story generation for Fabula.
//!
//! A run turns one prompt into a [`GeneratedStory`](fabula_core::GeneratedStory)
//! through four remote stages (title, characters, scenes, writer credits) and a
//! local finalize stage.
//!
//! # Features
//!
//! - **Response extraction**: pull JSON out of prose, fences and echoed examples
//! - **Deadline-bounded calls**: every request carries its own timeout
//! - **Fallbacks**: regex recovery, then fixed placeholders, for unparseable output
//! - **Reconciliation**: every character a scene mentions ends up on the roster
//! - **Progress**: checkpoints published on a `tokio::sync::watch` channel
//! - **Feedback**: rated samples posted on detached tasks
//!
//! # Example
//!
//! ```rust,ignore
//! use fabula_pipeline::StoryPipeline;
//!
//! let pipeline = StoryPipeline::new(client, &config);
//! let mut progress = pipeline.subscribe();
//! tokio::spawn(async move {
//!     while progress.changed().await.is_ok() {
//!         println!("{}%", progress.borrow().percent());
//!     }
//! });
//! let story = pipeline.generate(&request).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod executor;
mod extraction;
mod fallback;
mod feedback;
mod outline;
mod prompts;
mod random;
mod reconcile;
mod remote;
mod stage;

pub use executor::StoryPipeline;
pub use extraction::{extract_json, parse_json};
pub use fallback::{
    FALLBACK_DESCRIPTION, FALLBACK_TITLE, FALLBACK_WRITERS, capture_all, capture_first,
    fallback_characters, fallback_scenes, fallback_title, fallback_writers, genre_writers,
    placeholder_characters, placeholder_scenes,
};
pub use feedback::{FEEDBACK_SAMPLE_LIMIT, FeedbackSink};
pub use outline::{CharacterOutline, SceneOutline, TitleDraft};
pub use prompts::{
    CHARACTER_CONTEXT, SCENE_CONTEXT, TITLE_CONTEXT, WRITER_CONTEXT, character_prompt,
    roster_line, scene_prompt, title_prompt, writer_prompt,
};
pub use random::{CONFLICTS, PROTAGONISTS, RandomConcept, SETTINGS, THEMES};
pub use reconcile::{
    DEFAULT_NAME, DEFAULT_ROLE, SCENE_CHARACTER_DESCRIPTION, normalize_characters,
    normalize_scenes, reconcile_roster,
};
pub use remote::{JSON_ONLY_DIRECTIVE, RemoteCaller};
pub use stage::{
    CHARACTER_RATING, SCENE_RATING, STORY_RATING, Stage, TITLE_RATING, WRITER_RATING,
};
