//! CLI channel: stdin/stdout REPL driving a single conversation.

use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt, stream};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::enrich::{DestinationEnricher, insight_for};
use crate::export::write_export;
use crate::planner::commands::HELP_TEXT;
use crate::planner::engine::ITINERARY_INTRO;
use crate::planner::{Command, Conversation, EngineOptions, GenerateOutcome};

/// Stream of raw input lines.
pub type LineStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// A REPL that reads answers from stdin and writes prompts to stdout.
pub struct CliChannel {
    options: EngineOptions,
    export_dir: PathBuf,
    enricher: Option<Arc<dyn DestinationEnricher>>,
}

impl CliChannel {
    pub fn new(
        options: EngineOptions,
        export_dir: PathBuf,
        enricher: Option<Arc<dyn DestinationEnricher>>,
    ) -> Self {
        Self {
            options,
            export_dir,
            enricher,
        }
    }

    /// Spawn the stdin reader and return its lines as a stream.
    fn start(&self) -> LineStream {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|line| (line, rx))
        });

        Box::pin(stream)
    }

    /// Run the REPL until `/quit` or end of input.
    pub async fn run(&self) {
        self.run_with(self.start()).await;
    }

    /// Drive a conversation from `lines`; returns it as it stood at exit.
    async fn run_with(&self, mut lines: LineStream) -> Conversation {
        let mut convo = Conversation::new(self.options);
        if let Some(greeting) = convo.log().first() {
            println!("\n{}\n", greeting.message);
        }
        eprint!("> ");

        while let Some(line) = lines.next().await {
            match self.handle_line(&mut convo, &line).await {
                Some(output) => println!("\n{output}\n"),
                None => break,
            }
            eprint!("> ");
        }
        tracing::debug!("CLI input closed");
        convo
    }

    /// Handle one input line. Returns the text to print, or `None` to quit.
    pub async fn handle_line(&self, convo: &mut Conversation, line: &str) -> Option<String> {
        let output = match Command::parse(line) {
            Command::Answer(text) => convo.submit_utterance(&text).message,
            Command::Reset => convo.reset().to_string(),
            Command::Status => status_text(convo),
            Command::Help => HELP_TEXT.to_string(),
            Command::Quit => return None,
            Command::Itinerary => {
                let insight = insight_for(self.enricher.as_deref(), convo).await;
                match convo.generate_itinerary(insight.as_ref()) {
                    GenerateOutcome::Generated(doc) => format!("{ITINERARY_INTRO}\n\n{}", doc.text),
                    GenerateOutcome::AlreadyGenerated(doc) => doc.text,
                    GenerateOutcome::Incomplete { .. } => format!(
                        "I still need a few details first. {}",
                        convo.next_prompt().message()
                    ),
                }
            }
            Command::Export => match convo.export() {
                Ok(export) => match write_export(&self.export_dir, &export).await {
                    Ok(paths) => format!(
                        "Saved your itinerary to {} and trip details to {}",
                        paths.itinerary.display(),
                        paths.profile.display()
                    ),
                    Err(e) => {
                        tracing::warn!("Export failed: {}", e);
                        format!("Sorry, I couldn't save your trip: {e}")
                    }
                },
                Err(e) => format!("{e}. Type /itinerary once every question is answered."),
            },
        };
        Some(output)
    }
}

fn status_text(convo: &Conversation) -> String {
    let mut parts = vec!["Your Trip Details".to_string()];
    let lines = convo.profile().summary_lines();
    if lines.is_empty() {
        parts.push("(nothing collected yet)".to_string());
    } else {
        parts.extend(lines);
    }
    if !convo.next_prompt().is_complete() {
        parts.push(String::new());
        parts.push(format!("Next question: {}", convo.next_prompt().message()));
    }
    parts.join("\n")
}
