// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrdCheckError {
    #[error("No usable Kubernetes credentials: {0}")]
    ConfigError(String),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Failed to create Kubernetes client: {0}")]
    ClientConstructionError(#[source] kube::Error),

    #[error("CRD {name} not found within {timeout:?}")]
    CheckTimeout { name: String, timeout: Duration },

    #[error("Failed to list CRDs: {0}")]
    ListError(#[source] kube::Error),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

pub type Result<T> = std::result::Result<T, CrdCheckError>;
