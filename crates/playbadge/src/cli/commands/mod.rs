//! CLI commands

mod badge;
mod completions;
mod fetch;
mod init;
mod placeholders;
mod serve;

pub use badge::BadgeCommand;
pub use completions::CompletionsCommand;
pub use fetch::FetchCommand;
pub use init::InitCommand;
pub use placeholders::PlaceholdersCommand;
pub use serve::ServeCommand;
