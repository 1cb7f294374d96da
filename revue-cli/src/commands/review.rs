//! Review command - submit a prompt and stream the merge request list

use clap::Args;
use revue_core::{Config, ReviewController, SessionMessage, SseReviewStream, StatusCategory};

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// The review prompt to send to the backend
    #[arg(required = true)]
    pub prompt: String,

    /// Merge request id to inspect once the list has arrived
    #[arg(short, long)]
    pub select: Option<String>,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let endpoint = config.endpoint_url()?;

        if verbose {
            tracing::info!(
                endpoint = %endpoint,
                prompt = %self.prompt,
                "Starting review session"
            );
        }

        let stream = SseReviewStream::new(endpoint);
        let mut controller = ReviewController::new(Box::new(stream));

        if !controller.submit(&self.prompt).await?.entered() {
            println!("Nothing to review: prompt is empty");
            return Ok(());
        }

        while let Some(message) = controller.next_message().await {
            match message {
                Ok(message @ SessionMessage::List(_)) => {
                    controller.handle_message(message);
                    print_results(&controller);
                }
                Ok(other) => controller.handle_message(other),
                Err(e) => {
                    eprintln!("Stream error: {}", e);
                    break;
                }
            }
        }

        if let Some(id) = &self.select {
            if controller.select(id).entered() {
                print_detail(&controller);
            } else {
                println!("No merge request with id {}", id);
            }
        }

        controller.back_to_prompt();
        Ok(())
    }
}

fn print_results(controller: &ReviewController) {
    println!("Merge Requests");
    println!("==============");
    for mr in controller.results() {
        let label = match mr.category() {
            StatusCategory::Unknown => String::new(),
            category => format!(" [{}]", category),
        };
        println!("  {}{} by {}", mr.id, label, mr.author.name);
    }
    println!();
}

fn print_detail(controller: &ReviewController) {
    // Detail mode guarantees both records are present.
    let Some(mr) = controller.selected() else {
        return;
    };
    let Some(progress) = controller.progress() else {
        return;
    };

    println!("Review: {}", mr.id);
    println!("  author: {}", mr.author.name);
    println!("  status: {}", mr.status.as_deref().unwrap_or("unknown"));
    println!("  files: {} ({} failed)", progress.total_files, progress.failed_files);
    println!("  review: {:?}", progress.status);
}
