pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod github;
pub mod output;
pub mod prompt;
pub mod run;
