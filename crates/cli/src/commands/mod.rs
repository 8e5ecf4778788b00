//! Command handlers for the Retail Analytics Copilot CLI.

pub mod ask;
pub mod batch;
pub mod init;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use batch::BatchCommand;
pub use init::InitCommand;
