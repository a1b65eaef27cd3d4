// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crd_presence::config::{ReportFormat, SuiteSettings};
use crd_presence::suite::{run_suite, SuiteFixture};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting CRD presence suite");

    let settings = SuiteSettings::from_env()?;
    info!(
        "Configuration loaded: crd={}, timeout={:?}, interval={:?}",
        settings.crd_name, settings.wait_timeout, settings.wait_interval
    );
    let format = settings.report_format;

    // Resolved once; every check borrows the same fixture
    let fixture = SuiteFixture::setup(settings)
        .await
        .context("Suite setup failed, no checks were run")?;

    let report = run_suite(&fixture).await;

    match format {
        ReportFormat::Text => println!("{}", report),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    if report.passed() {
        info!("All checks passed");
        Ok(ExitCode::SUCCESS)
    } else {
        error!("{} check(s) failed", report.failures());
        Ok(ExitCode::FAILURE)
    }
}
