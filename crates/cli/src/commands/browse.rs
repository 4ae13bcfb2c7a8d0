use std::sync::Arc;

use clap::Args;
use storefront_client::{CatalogSession, CatalogSource, HttpCatalogSource};
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::{ApplicationError, CategoryOptions, PageModel, PageStatus, ViewEvent};
use tracing::warn;

use crate::commands::{current_thread_runtime, CommandResult, EXIT_INTERNAL, EXIT_LOAD_FAILED};
use crate::render::{render, OutputFormat};

#[derive(Clone, Debug, Default, Args)]
pub struct BrowseArgs {
    #[arg(long, default_value = "", help = "Case-insensitive title search")]
    pub search: String,
    #[arg(long, default_value = "", help = "Category to show; empty shows all")]
    pub category: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    pub format: OutputFormat,
}

pub fn run(args: BrowseArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::from_error(
                "browse",
                ApplicationError::Configuration(error.to_string()),
                "unassigned",
            )
        }
    };

    let source = match HttpCatalogSource::from_config(&config.catalog) {
        Ok(source) => source,
        Err(error) => {
            return CommandResult::from_error(
                "browse",
                ApplicationError::Configuration(error.to_string()),
                "unassigned",
            )
        }
    };

    run_with_source(&config, Arc::new(source), &args)
}

/// Loads the catalog once from `source`, applies the requested criteria and
/// renders the resulting page. A failed load still renders (with its notice)
/// but exits with the load-failure code.
pub fn run_with_source(
    config: &AppConfig,
    source: Arc<dyn CatalogSource>,
    args: &BrowseArgs,
) -> CommandResult {
    let categories = CategoryOptions::new(config.catalog.categories.clone());
    let category = match resolve_category(&categories, &args.category) {
        Ok(category) => category,
        Err(error) => return CommandResult::from_error("browse", error, "unassigned"),
    };

    let runtime = match current_thread_runtime() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::from_error("browse", error, "unassigned"),
    };

    let page = runtime.block_on(async {
        let mut session = CatalogSession::open(source);
        session.settle().await;

        let inputs =
            [ViewEvent::SearchChanged(args.search.clone()), ViewEvent::CategoryChanged(category)];
        for event in inputs {
            if let Err(error) = session.input(event) {
                warn!(
                    event_name = "cli.browse.input_rejected",
                    visit_id = %session.visit_id(),
                    error = %error,
                    "filter input rejected"
                );
            }
        }

        PageModel::from_view(session.view(), &config.display, &categories)
    });

    match render(&page, args.format) {
        Ok(output) => {
            let exit_code = if page.status == PageStatus::Failed { EXIT_LOAD_FAILED } else { 0 };
            CommandResult { exit_code, output }
        }
        Err(error) => {
            CommandResult::failure("browse", "render", format!("{error:#}"), EXIT_INTERNAL)
        }
    }
}

/// Maps a user-supplied category onto the configured option set.
pub fn resolve_category(
    categories: &CategoryOptions,
    requested: &str,
) -> Result<String, ApplicationError> {
    if requested.is_empty() {
        return Ok(String::new());
    }
    categories.canonical(requested).map(str::to_string).ok_or_else(|| {
        ApplicationError::InvalidInput(format!(
            "unknown category `{requested}` (expected one of: {})",
            categories.options().join(", ")
        ))
    })
}
