// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! API client construction from a resolved connection configuration

use crate::error::{CrdCheckError, Result};
use crate::kubernetes::credentials::ResolvedConfig;
use kube::Client;
use tracing::{info, instrument};

/// Create a Kubernetes client bound to `resolved`
#[instrument(skip(resolved), fields(source = %resolved.source))]
pub fn build_client(resolved: &ResolvedConfig) -> Result<Client> {
    let client =
        Client::try_from(resolved.config.clone()).map_err(CrdCheckError::ClientConstructionError)?;
    info!("Created client for {}", resolved.config.cluster_url);
    Ok(client)
}
