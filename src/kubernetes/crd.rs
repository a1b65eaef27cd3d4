// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD presence and listing checks

use crate::error::{CrdCheckError, Result};
use crate::poll::{poll_until, PollOutcome};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::runtime::wait::{conditions, Condition};
use kube::{api::ListParams, Api, Client, ResourceExt};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Read-only checks against the cluster's CustomResourceDefinitions
#[derive(Clone)]
pub struct CrdVerifier {
    crds: Api<CustomResourceDefinition>,
}

impl CrdVerifier {
    pub fn new(client: Client) -> Self {
        Self {
            crds: Api::all(client),
        }
    }

    /// Poll for `name` until it is found (`true`) or `timeout` passes (`false`).
    ///
    /// Every failed request, not found or otherwise, just means another attempt.
    pub async fn verify_exists(
        &self,
        name: &str,
        timeout: Duration,
        interval: Duration,
    ) -> Result<bool> {
        match self.wait_for(name, timeout, interval).await {
            PollOutcome::Found { .. } => Ok(true),
            PollOutcome::TimedOut { .. } => Ok(false),
            PollOutcome::Aborted { error, .. } => Err(error.into()),
        }
    }

    /// Poll for `name` and return the fetched CRD with attempt statistics
    #[instrument(skip(self))]
    pub async fn wait_for(
        &self,
        name: &str,
        timeout: Duration,
        interval: Duration,
    ) -> PollOutcome<CustomResourceDefinition, kube::Error> {
        let outcome = poll_until(
            interval,
            timeout,
            move || self.crds.get(name),
            |_: &kube::Error| false,
        )
        .await;

        match &outcome {
            PollOutcome::Found {
                attempts, elapsed, ..
            } => info!(
                "CRD {} found after {} attempt(s) in {:?}",
                name, attempts, elapsed
            ),
            PollOutcome::TimedOut { attempts, elapsed } => warn!(
                "CRD {} not found after {} attempt(s) in {:?}",
                name, attempts, elapsed
            ),
            PollOutcome::Aborted { error, attempts } => warn!(
                "Giving up on CRD {} after {} attempt(s): {}",
                name, attempts, error
            ),
        }

        outcome
    }

    /// Names of all CRDs in the order the API server returned them
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<String>> {
        let list = self
            .crds
            .list(&ListParams::default())
            .await
            .map_err(CrdCheckError::ListError)?;

        let names: Vec<String> = list.items.iter().map(|crd| crd.name_any()).collect();
        debug!("Listed {} CRDs", names.len());
        Ok(names)
    }
}

/// Whether the CRD has an `Established=True` condition
pub fn is_established(crd: &CustomResourceDefinition) -> bool {
    conditions::is_crd_established().matches_object(Some(crd))
}
