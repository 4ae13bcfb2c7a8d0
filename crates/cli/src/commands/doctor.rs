use std::sync::Arc;

use serde::Serialize;
use storefront_client::{CatalogSource, HttpCatalogSource};
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::{CategoryOptions, Product};

use crate::commands::{current_thread_runtime, CommandResult, EXIT_CONFIG, EXIT_LOAD_FAILED};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
pub struct DoctorCheck {
    pub name: &'static str,
    pub status: CheckStatus,
    pub details: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub overall_status: CheckStatus,
    pub summary: String,
    pub checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => match HttpCatalogSource::from_config(&config.catalog) {
            Ok(source) => build_report(&config, Arc::new(source)),
            Err(error) => config_failure_report(error.to_string()),
        },
        Err(error) => config_failure_report(error.to_string()),
    };

    finish(&report, json_output)
}

pub fn run_with_source(
    config: &AppConfig,
    source: Arc<dyn CatalogSource>,
    json_output: bool,
) -> CommandResult {
    finish(&build_report(config, source), json_output)
}

fn finish(report: &DoctorReport, json_output: bool) -> CommandResult {
    let output = if json_output {
        serde_json::to_string_pretty(report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(report)
    };

    let config_failed = report
        .checks
        .iter()
        .any(|check| check.name == "config_validation" && check.status == CheckStatus::Fail);
    let exit_code = match report.overall_status {
        CheckStatus::Pass => 0,
        _ if config_failed => EXIT_CONFIG,
        _ => EXIT_LOAD_FAILED,
    };

    CommandResult { exit_code, output }
}

pub fn build_report(config: &AppConfig, source: Arc<dyn CatalogSource>) -> DoctorReport {
    let mut checks = vec![DoctorCheck {
        name: "config_validation",
        status: CheckStatus::Pass,
        details: "configuration loaded and validated".to_string(),
    }];

    match fetch_catalog(source.as_ref()) {
        Ok(products) => {
            checks.push(DoctorCheck {
                name: "catalog_endpoint",
                status: CheckStatus::Pass,
                details: format!("{} returned {} products", source.describe(), products.len()),
            });
            checks.push(check_category_coverage(config, &products));
        }
        Err(details) => {
            checks.push(DoctorCheck {
                name: "catalog_endpoint",
                status: CheckStatus::Fail,
                details: format!("{}: {details}", source.describe()),
            });
            checks.push(DoctorCheck {
                name: "category_coverage",
                status: CheckStatus::Skipped,
                details: "skipped because the catalog did not load".to_string(),
            });
        }
    }

    summarize(checks)
}

fn config_failure_report(details: String) -> DoctorReport {
    summarize(vec![
        DoctorCheck { name: "config_validation", status: CheckStatus::Fail, details },
        DoctorCheck {
            name: "catalog_endpoint",
            status: CheckStatus::Skipped,
            details: "skipped because configuration did not load".to_string(),
        },
        DoctorCheck {
            name: "category_coverage",
            status: CheckStatus::Skipped,
            details: "skipped because configuration did not load".to_string(),
        },
    ])
}

fn summarize(checks: Vec<DoctorCheck>) -> DoctorReport {
    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn fetch_catalog(source: &dyn CatalogSource) -> Result<Vec<Product>, String> {
    let runtime = current_thread_runtime().map_err(|error| error.to_string())?;
    runtime.block_on(source.fetch()).map_err(|error| error.to_string())
}

/// Every category the endpoint serves should be selectable, otherwise those
/// products can only be reached through an unfiltered view.
fn check_category_coverage(config: &AppConfig, products: &[Product]) -> DoctorCheck {
    let options = CategoryOptions::new(config.catalog.categories.clone());
    let mut missing: Vec<&str> = products
        .iter()
        .map(|product| product.category.as_str())
        .filter(|category| !options.accepts(category))
        .collect();
    missing.sort_unstable();
    missing.dedup();

    if missing.is_empty() {
        DoctorCheck {
            name: "category_coverage",
            status: CheckStatus::Pass,
            details: "every served category is selectable".to_string(),
        }
    } else {
        DoctorCheck {
            name: "category_coverage",
            status: CheckStatus::Fail,
            details: format!("categories not in catalog.categories: {}", missing.join(", ")),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
