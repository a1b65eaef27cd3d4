// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The CRD presence suite: a fixture built once per run and the checks that use it.

use crate::config::SuiteSettings;
use crate::constants::checks;
use crate::error::{CrdCheckError, Result};
use crate::kubernetes::crd::is_established;
use crate::kubernetes::{
    build_client, load_connection_config, ConfigSource, CrdVerifier, ResolvedConfig,
};
use crate::poll::PollOutcome;
use kube::Client;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use tokio::time::Instant;
use tracing::{error, info, instrument};

/// Everything the checks share. Built once, then only borrowed.
pub struct SuiteFixture {
    pub settings: SuiteSettings,
    pub source: Option<ConfigSource>,
    verifier: CrdVerifier,
}

impl SuiteFixture {
    /// Resolve credentials and build the client. Any error here aborts the run.
    pub async fn setup(settings: SuiteSettings) -> Result<Self> {
        let resolved = load_connection_config().await?;
        Self::from_resolved(resolved, settings)
    }

    /// Build the client for already resolved credentials
    pub fn from_resolved(resolved: ResolvedConfig, settings: SuiteSettings) -> Result<Self> {
        let client = build_client(&resolved)?;

        let mut fixture = Self::with_client(client, settings);
        fixture.source = Some(resolved.source);
        Ok(fixture)
    }

    pub fn with_client(client: Client, settings: SuiteSettings) -> Self {
        Self {
            settings,
            source: None,
            verifier: CrdVerifier::new(client),
        }
    }

    pub fn verifier(&self) -> &CrdVerifier {
        &self.verifier
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub name: String,
    pub passed: bool,
    pub detail: String,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub checks: Vec<CheckReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => writeln!(f, "CRD presence suite ({})", source)?,
            None => writeln!(f, "CRD presence suite")?,
        }
        for check in &self.checks {
            let status = if check.passed { "PASS" } else { "FAIL" };
            writeln!(
                f,
                "  {} {} [{}ms]: {}",
                status, check.name, check.elapsed_ms, check.detail
            )?;
        }
        write!(f, "{} checks, {} failed", self.checks.len(), self.failures())
    }
}

/// Run every check in order. A failing check never stops the ones after it.
#[instrument(skip(fixture), fields(crd = %fixture.settings.crd_name))]
pub async fn run_suite(fixture: &SuiteFixture) -> SuiteReport {
    let checks = vec![
        run_check(checks::FIND_CRD, check_crd_present(fixture)).await,
        run_check(checks::LIST_CRDS, check_crd_listing(fixture)).await,
    ];

    SuiteReport {
        source: fixture.source.as_ref().map(|s| s.to_string()),
        checks,
    }
}

/// Wait for the configured CRD to show up
pub async fn check_crd_present(fixture: &SuiteFixture) -> Result<String> {
    let settings = &fixture.settings;
    let outcome = fixture
        .verifier
        .wait_for(
            &settings.crd_name,
            settings.wait_timeout,
            settings.wait_interval,
        )
        .await;

    match outcome {
        PollOutcome::Found {
            value,
            attempts,
            elapsed,
        } => {
            let state = if is_established(&value) {
                "established"
            } else {
                "not yet established"
            };
            Ok(format!(
                "CRD {} found after {} attempt(s) in {:?}, {}",
                settings.crd_name, attempts, elapsed, state
            ))
        }
        PollOutcome::TimedOut { .. } => Err(CrdCheckError::CheckTimeout {
            name: settings.crd_name.clone(),
            timeout: settings.wait_timeout,
        }),
        PollOutcome::Aborted { error, .. } => Err(error.into()),
    }
}

/// List all CRDs and log their names
pub async fn check_crd_listing(fixture: &SuiteFixture) -> Result<String> {
    let names = fixture.verifier.list_all().await?;
    for name in &names {
        info!("Found CRD: {}", name);
    }
    Ok(format!("{} CRD(s) listed", names.len()))
}

async fn run_check<F>(name: &str, check: F) -> CheckReport
where
    F: Future<Output = Result<String>>,
{
    info!("Running check: {}", name);
    let start = Instant::now();
    let result = check.await;
    let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(detail) => {
            info!("PASS {}: {}", name, detail);
            CheckReport {
                name: name.to_string(),
                passed: true,
                detail,
                elapsed_ms,
            }
        }
        Err(e) => {
            error!("FAIL {}: {}", name, e);
            CheckReport {
                name: name.to_string(),
                passed: false,
                detail: e.to_string(),
                elapsed_ms,
            }
        }
    }
}
