//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 3.0.0: Handlers declare their own commands and component capabilities
//! - 2.1.0: Add LogHandler (log get, log set)
//! - 2.0.0: Add UserHandler and CommitStatsHandler
//! - 1.2.0: Add QuoteHandler (Add Quote context menu)
//! - 1.1.0: Add ManHandler with collapsible sections
//! - 1.0.0: Initial extraction of github, plan, quick links, emoji, and slap

pub mod commit_stats;
pub mod emoji;
pub mod github;
pub mod log_level;
pub mod man;
pub mod plan;
pub mod quick_links;
pub mod quote;
pub mod slap;
pub mod user;

use std::sync::Arc;

use super::handler::CommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(github::GithubHandler),
        Arc::new(man::ManHandler),
        Arc::new(commit_stats::CommitStatsHandler),
        Arc::new(user::UserHandler),
        Arc::new(quote::QuoteHandler),
        Arc::new(plan::PlanHandler),
        Arc::new(quick_links::QuickLinksHandler),
        Arc::new(emoji::EmojiHandler),
        Arc::new(slap::SlapHandler),
        Arc::new(log_level::LogHandler),
    ]
}
