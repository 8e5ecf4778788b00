//! Ask command handler.
//!
//! Runs a single question through the pipeline and prints the structured
//! result for human consumption.

use clap::Args;
use copilot_agent::Agent;
use copilot_core::{config::AppConfig, AppResult};

/// Answer a single question interactively
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to answer
    pub question: String,

    /// Expected answer format (e.g. text, int, list)
    #[arg(long, default_value = "text")]
    pub format_hint: String,

    /// Output the envelope as JSON instead of the readable form
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Processing question: {}", self.question);

        let mut agent = Agent::new(config);
        let outcome = agent.run(&self.question, &self.format_hint);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            return Ok(());
        }

        println!("Question:    {}", outcome.question);
        println!("Answer:      {}", outcome.final_answer);
        if outcome.sql.is_empty() {
            println!("SQL:         (none)");
        } else {
            println!("SQL:         {}", outcome.sql.replace('\n', "\n             "));
        }
        println!("Confidence:  {:.2}", outcome.confidence);
        println!("Explanation: {}", outcome.explanation);
        println!("Citations:   {}", outcome.citations.join(", "));

        Ok(())
    }
}
