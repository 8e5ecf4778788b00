//! Batch command handler.
//!
//! Processes line-delimited JSON questions, emitting one output line per
//! input line, order-preserving. A record whose processing fails still
//! produces an output line with zero confidence and an error-carrying
//! answer — a single bad record never aborts the batch.

use clap::Args;
use copilot_agent::{Agent, AgentOutcome};
use copilot_core::{config::AppConfig, AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

fn default_format_hint() -> String {
    "text".to_string()
}

/// One input question record.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchQuestion {
    pub id: String,
    pub question: String,
    #[serde(default = "default_format_hint")]
    pub format_hint: String,
}

/// One output answer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnswer {
    pub id: String,
    pub final_answer: String,
    pub sql: String,
    pub confidence: f64,
    pub explanation: String,
    pub citations: Vec<String>,
}

impl BatchAnswer {
    fn from_outcome(id: String, outcome: AgentOutcome) -> Self {
        Self {
            id,
            final_answer: outcome.final_answer,
            sql: outcome.sql,
            confidence: outcome.confidence,
            explanation: outcome.explanation,
            citations: outcome.citations,
        }
    }

    /// Record emitted for a line that could not be processed.
    fn error(id: String, message: &str) -> Self {
        Self {
            id,
            final_answer: format!("Error: {}", message),
            sql: String::new(),
            confidence: 0.0,
            explanation: "Processing failed".to_string(),
            citations: Vec::new(),
        }
    }
}

/// Process a JSONL batch of questions
#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Input JSONL file with question records
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSONL file for answer records
    #[arg(short, long)]
    pub out: PathBuf,
}

impl BatchCommand {
    /// Execute the batch command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Processing batch: {:?} -> {:?}", self.input, self.out);

        let input = File::open(&self.input).map_err(|e| {
            AppError::Config(format!("Failed to open input {:?}: {}", self.input, e))
        })?;
        let output = File::create(&self.out).map_err(|e| {
            AppError::Config(format!("Failed to create output {:?}: {}", self.out, e))
        })?;

        let mut agent = Agent::new(config);
        let count = process_batch(&mut agent, BufReader::new(input), BufWriter::new(output))?;

        tracing::info!("Batch complete: {} questions processed", count);
        println!("Processed {} questions -> {:?}", count, self.out);

        Ok(())
    }
}

/// Run every question in `reader` through the agent, writing one JSON line
/// per non-blank input line to `writer`, in input order.
///
/// Malformed lines produce an error record instead of aborting. Returns
/// the number of records written.
pub fn process_batch(
    agent: &mut Agent,
    reader: impl BufRead,
    mut writer: impl Write,
) -> AppResult<usize> {
    let mut count = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let answer = match serde_json::from_str::<BatchQuestion>(&line) {
            Ok(record) => {
                tracing::info!("Processing record '{}'", record.id);
                let outcome = agent.run(&record.question, &record.format_hint);
                BatchAnswer::from_outcome(record.id, outcome)
            }
            Err(e) => {
                tracing::warn!("Malformed input line: {}", e);
                BatchAnswer::error(salvage_id(&line), &e.to_string())
            }
        };

        writeln!(writer, "{}", serde_json::to_string(&answer)?)?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

/// Recover the record id from a line that failed to parse as a question.
///
/// A line can be valid JSON yet still not a question record (e.g. missing
/// the `question` field); its id should be echoed rather than replaced.
fn salvage_id(line: &str) -> String {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|value| value.get("id")?.as_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}
