// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, poll};
use crate::error::CrdCheckError;
use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// How the suite report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = CrdCheckError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(CrdCheckError::InvalidSetting(format!(
                "unknown report format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Suite configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct SuiteSettings {
    /// CRD the existence check waits for, e.g. `widgets.example.com`
    pub crd_name: String,
    pub wait_timeout: Duration,
    pub wait_interval: Duration,
    pub report_format: ReportFormat,
}

impl SuiteSettings {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let crd_name = lookup(vars::CRD_NAME)
            .filter(|name| !name.trim().is_empty())
            .with_context(|| format!("{} environment variable not set", vars::CRD_NAME))?;

        let wait_timeout = parse_secs(&lookup, vars::WAIT_TIMEOUT_SECS, poll::WAIT_TIMEOUT_SECS)?;
        let wait_interval =
            parse_secs(&lookup, vars::WAIT_INTERVAL_SECS, poll::WAIT_INTERVAL_SECS)?;
        if wait_interval.is_zero() {
            bail!("{} must be greater than zero", vars::WAIT_INTERVAL_SECS);
        }

        let report_format = match lookup(vars::REPORT_FORMAT) {
            Some(value) => value
                .parse::<ReportFormat>()
                .with_context(|| format!("invalid {}", vars::REPORT_FORMAT))?,
            None => ReportFormat::default(),
        };

        Ok(SuiteSettings {
            crd_name: crd_name.trim().to_string(),
            wait_timeout,
            wait_interval,
            report_format,
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be a whole number of seconds, got '{}'", key, value))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}
