pub mod html;
pub mod text;

use anyhow::{Context, Result};
use clap::ValueEnum;
use storefront_core::PageModel;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

pub fn render(page: &PageModel, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(page)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(page).context("failed to serialize page model")
        }
        OutputFormat::Html => html::render(page),
    }
}
