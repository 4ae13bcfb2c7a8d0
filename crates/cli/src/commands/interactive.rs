use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use storefront_client::{CatalogSession, CatalogSource, HttpCatalogSource};
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::{ApplicationError, CategoryOptions, LoadState, PageModel, ViewEvent};

use crate::commands::browse::resolve_category;
use crate::commands::{current_thread_runtime, CommandResult, EXIT_INTERNAL, EXIT_LOAD_FAILED};
use crate::render::text;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputCommand {
    Apply(ViewEvent),
    Quit,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::from_error(
                "interactive",
                ApplicationError::Configuration(error.to_string()),
                "unassigned",
            )
        }
    };

    let source = match HttpCatalogSource::from_config(&config.catalog) {
        Ok(source) => source,
        Err(error) => {
            return CommandResult::from_error(
                "interactive",
                ApplicationError::Configuration(error.to_string()),
                "unassigned",
            )
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with_io(&config, Arc::new(source), stdin.lock(), stdout.lock())
}

/// Drives one page visit: renders the loading page, waits for the single
/// load, then re-renders after every accepted input line. A failed load keeps
/// the session open but exits with the load-failure code.
pub fn run_with_io<R, W>(
    config: &AppConfig,
    source: Arc<dyn CatalogSource>,
    input: R,
    mut output: W,
) -> CommandResult
where
    R: BufRead,
    W: Write,
{
    match drive(config, source, input, &mut output) {
        Ok((applied, LoadState::Failed)) => CommandResult::failure(
            "interactive",
            "catalog_load",
            format!("catalog did not load; session closed after {applied} input events"),
            EXIT_LOAD_FAILED,
        ),
        Ok((applied, _)) => CommandResult::success(
            "interactive",
            format!("session closed after {applied} input events"),
        ),
        Err(error) => {
            CommandResult::failure("interactive", "io", format!("{error:#}"), EXIT_INTERNAL)
        }
    }
}

fn drive<R, W>(
    config: &AppConfig,
    source: Arc<dyn CatalogSource>,
    input: R,
    output: &mut W,
) -> Result<(usize, LoadState)>
where
    R: BufRead,
    W: Write,
{
    let categories = CategoryOptions::new(config.catalog.categories.clone());
    let runtime = current_thread_runtime()?;

    let mut session = runtime.block_on(async {
        let mut session = CatalogSession::open(source);
        write_page(output, &session, config, &categories)?;
        session.settle().await;
        Ok::<_, anyhow::Error>(session)
    })?;
    write_page(output, &session, config, &categories)?;

    let mut applied = 0;
    for line in input.lines() {
        let line = line.context("failed to read input line")?;
        match parse_input(&line, &categories) {
            Ok(None) => continue,
            Ok(Some(InputCommand::Quit)) => break,
            Ok(Some(InputCommand::Apply(event))) => {
                session.input(event)?;
                applied += 1;
                write_page(output, &session, config, &categories)?;
            }
            Err(error) => {
                let interface = error.into_interface(session.visit_id().to_string());
                writeln!(output, "{} ({interface})", interface.user_message())
                    .context("failed to write output")?;
            }
        }
    }

    let state = session.view().state();
    session.close();
    Ok((applied, state))
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_input(
    line: &str,
    categories: &CategoryOptions,
) -> Result<Option<InputCommand>, ApplicationError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (command, argument) = match trimmed.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (trimmed, ""),
    };

    let parsed = match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" => InputCommand::Quit,
        "clear" => InputCommand::Apply(ViewEvent::FiltersCleared),
        "search" => InputCommand::Apply(ViewEvent::SearchChanged(argument.to_string())),
        "category" => InputCommand::Apply(ViewEvent::CategoryChanged(resolve_category(
            categories, argument,
        )?)),
        other => {
            return Err(ApplicationError::InvalidInput(format!(
                "unknown command `{other}` (expected search|category|clear|quit)"
            )))
        }
    };

    Ok(Some(parsed))
}

fn write_page<W: Write>(
    output: &mut W,
    session: &CatalogSession,
    config: &AppConfig,
    categories: &CategoryOptions,
) -> Result<()> {
    let page = PageModel::from_view(session.view(), &config.display, categories);
    writeln!(output, "{}\n", text::render(&page)).context("failed to write page")
}

#[cfg(test)]
mod tests {
    use storefront_core::{ApplicationError, CategoryOptions, ViewEvent};

    use super::{parse_input, InputCommand};

    #[test]
    fn parses_search_with_spaces() {
        let parsed = parse_input("search  red shirt ", &CategoryOptions::default());

        assert_eq!(
            parsed,
            Ok(Some(InputCommand::Apply(ViewEvent::SearchChanged("red shirt".to_string()))))
        );
    }

    #[test]
    fn bare_search_clears_the_term() {
        let parsed = parse_input("search", &CategoryOptions::default());

        assert_eq!(parsed, Ok(Some(InputCommand::Apply(ViewEvent::SearchChanged(String::new())))));
    }

    #[test]
    fn category_is_validated_against_options() {
        let options = CategoryOptions::default();

        assert_eq!(
            parse_input("category Jewelery", &options),
            Ok(Some(InputCommand::Apply(ViewEvent::CategoryChanged("jewelery".to_string()))))
        );
        assert!(matches!(
            parse_input("category books", &options),
            Err(ApplicationError::InvalidInput(_))
        ));
    }

    #[test]
    fn control_words_and_blank_lines() {
        let options = CategoryOptions::default();

        assert_eq!(parse_input("   ", &options), Ok(None));
        assert_eq!(parse_input("QUIT", &options), Ok(Some(InputCommand::Quit)));
        assert_eq!(
            parse_input("clear", &options),
            Ok(Some(InputCommand::Apply(ViewEvent::FiltersCleared)))
        );
        assert!(parse_input("sort price", &options).is_err());
    }
}
