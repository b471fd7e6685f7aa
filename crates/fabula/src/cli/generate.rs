//! Story generation command handlers.

use super::commands::{OutputFormat, StoryOptions};
use super::output::render_story;
use fabula_core::{FabulaConfig, GenerationRequest, Phase, PromptSource, UpdateContext};
use fabula_error::FabulaResult;
use fabula_models::ZegaClient;
use fabula_pipeline::StoryPipeline;
use tokio_util::sync::CancellationToken;

/// Exit status after a second Ctrl-C, as a shell reports SIGINT.
const INTERRUPT_EXIT_CODE: i32 = 130;

/// What a Ctrl-C does at this point in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    /// Stop before the next stage
    Cancel,
    /// Give up on the in-flight call
    Exit,
}

/// The first interrupt cancels the run; any later one exits.
fn escalate(cancel: &CancellationToken) -> Interrupt {
    if cancel.is_cancelled() {
        Interrupt::Exit
    } else {
        cancel.cancel();
        Interrupt::Cancel
    }
}

/// Generate from a user prompt, optionally reworking an existing story.
pub async fn run_generate(
    config: &FabulaConfig,
    prompt: String,
    update_title: Option<String>,
    update_instructions: Option<String>,
    options: StoryOptions,
) -> FabulaResult<()> {
    let update = match (update_title, update_instructions) {
        (Some(title), Some(instructions)) => Some(UpdateContext::new(title, instructions)),
        _ => None,
    };

    let request = GenerationRequest::builder()
        .source(PromptSource::User(prompt))
        .length(
            options
                .length
                .unwrap_or(*config.pipeline().default_length()),
        )
        .genres(options.genres)
        .update(update)
        .build()?;

    execute(config, &request, options.format).await
}

/// Generate from a random concept.
pub async fn run_random(config: &FabulaConfig, format: OutputFormat) -> FabulaResult<()> {
    execute(config, &GenerationRequest::random(), format).await
}

#[tracing::instrument(skip(config, request), fields(format = ?format))]
async fn execute(
    config: &FabulaConfig,
    request: &GenerationRequest,
    format: OutputFormat,
) -> FabulaResult<()> {
    let client = ZegaClient::new(config.service())?;
    let pipeline = StoryPipeline::new(client, config);

    let mut progress = pipeline.subscribe();
    let reporter = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let snapshot = progress.borrow_and_update().clone();
            if *snapshot.phase() != Phase::Failed && !snapshot.label().is_empty() {
                eprintln!("[{:>3}%] {}", snapshot.percent(), snapshot.label());
            }
            if snapshot.phase().is_terminal() {
                break;
            }
        }
    });

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            match escalate(&on_interrupt) {
                Interrupt::Cancel => tracing::warn!(
                    "Interrupt received, stopping after the current stage (Ctrl-C again to quit)"
                ),
                Interrupt::Exit => {
                    tracing::warn!("Second interrupt received, exiting");
                    std::process::exit(INTERRUPT_EXIT_CODE);
                }
            }
        }
    });

    let result = pipeline.generate_with_cancel(request, &cancel).await;

    interrupt.abort();
    drop(pipeline);
    let _ = reporter.await;

    let story = result?;
    println!("{}", render_story(&story, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_interrupt_cancels_second_exits() {
        let cancel = CancellationToken::new();

        assert_eq!(escalate(&cancel), Interrupt::Cancel);
        assert!(cancel.is_cancelled());
        assert_eq!(escalate(&cancel), Interrupt::Exit);
        assert_eq!(escalate(&cancel), Interrupt::Exit);
    }
}
