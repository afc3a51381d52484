pub mod app;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod fetcher;
pub mod i18n;
pub mod model;
pub mod output;
pub mod render;
pub mod repl;
pub mod summary;
pub mod view;

#[cfg(test)]
mod tests;
