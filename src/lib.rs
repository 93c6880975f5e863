// Core layer - shared types and configuration
pub mod core;

// Features layer - view state machines
pub mod features;

// GitHub access and issue/man page rendering
pub mod github;

// UI components
pub mod message_components;

// Application layer
pub mod commands;

// serenity adapter
pub mod gateway;

// Re-export core config for convenience
pub use core::Config;
