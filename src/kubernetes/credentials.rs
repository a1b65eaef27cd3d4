// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Connection configuration resolution: kubeconfig first, in-cluster as fallback

use crate::constants::{env as vars, DEFAULT_KUBECONFIG_DIR, DEFAULT_KUBECONFIG_FILE};
use crate::error::{CrdCheckError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use std::ffi::OsString;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Where a resolved connection configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Kubeconfig(PathBuf),
    InCluster,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Kubeconfig(path) => write!(f, "kubeconfig {}", path.display()),
            ConfigSource::InCluster => write!(f, "in-cluster service account"),
        }
    }
}

/// Connection configuration for one API server, resolved once per run
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: kube::Config,
    pub source: ConfigSource,
}

/// Kubeconfig path as picked from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KubeconfigPath {
    /// Set through `KUBECONFIG`
    Explicit(PathBuf),
    /// `<home>/.kube/config`
    HomeDefault(PathBuf),
}

impl KubeconfigPath {
    pub fn path(&self) -> &Path {
        match self {
            KubeconfigPath::Explicit(p) | KubeconfigPath::HomeDefault(p) => p,
        }
    }
}

/// Pick the kubeconfig path from the `KUBECONFIG` value and the home directory.
///
/// An empty `KUBECONFIG` counts as unset. Only when neither the variable nor a
/// home directory is available does the path stay unresolved.
pub fn resolve_kubeconfig_path(
    kubeconfig_env: Option<OsString>,
    home: Option<PathBuf>,
) -> Option<KubeconfigPath> {
    if let Some(value) = kubeconfig_env.filter(|v| !v.is_empty()) {
        return Some(KubeconfigPath::Explicit(PathBuf::from(value)));
    }

    home.map(|home| {
        KubeconfigPath::HomeDefault(
            home.join(DEFAULT_KUBECONFIG_DIR)
                .join(DEFAULT_KUBECONFIG_FILE),
        )
    })
}

/// The two ways of producing a connection configuration
pub trait ConfigLoader {
    fn from_kubeconfig(&self, path: &Path) -> impl Future<Output = Result<kube::Config>> + Send;

    fn in_cluster(&self) -> Result<kube::Config>;
}

/// Loader backed by the kube client library
#[derive(Debug, Clone, Copy, Default)]
pub struct KubeLoader;

impl ConfigLoader for KubeLoader {
    async fn from_kubeconfig(&self, path: &Path) -> Result<kube::Config> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            CrdCheckError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let kubeconfig: Kubeconfig = serde_yaml::from_str(&raw).map_err(|e| {
            CrdCheckError::KubeconfigError(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                CrdCheckError::KubeconfigError(format!(
                    "Failed to create config from {}: {}",
                    path.display(),
                    e
                ))
            })
    }

    fn in_cluster(&self) -> Result<kube::Config> {
        kube::Config::incluster().map_err(|e| {
            CrdCheckError::ConfigError(format!("in-cluster config unavailable: {}", e))
        })
    }
}

/// Resolve the connection configuration from the process environment
pub async fn load_connection_config() -> Result<ResolvedConfig> {
    let kubeconfig_env = std::env::var_os(vars::KUBECONFIG);
    debug!("{} = {:?}", vars::KUBECONFIG, kubeconfig_env);
    let path = resolve_kubeconfig_path(kubeconfig_env, dirs::home_dir());
    resolve_connection_config(&KubeLoader, path).await
}

/// Build a configuration from the kubeconfig path, falling back to in-cluster
/// discovery only when no path was resolved
#[instrument(skip(loader))]
pub async fn resolve_connection_config<L: ConfigLoader>(
    loader: &L,
    path: Option<KubeconfigPath>,
) -> Result<ResolvedConfig> {
    match path {
        Some(path) => {
            let config = loader.from_kubeconfig(path.path()).await?;
            let source = ConfigSource::Kubeconfig(path.path().to_path_buf());
            info!("Using {} ({})", source, config.cluster_url);
            Ok(ResolvedConfig { config, source })
        }
        None => {
            warn!("No kubeconfig found, trying in-cluster configuration");
            let config = loader.in_cluster().map_err(|e| match e {
                CrdCheckError::ConfigError(msg) => CrdCheckError::ConfigError(format!(
                    "no kubeconfig found and {}",
                    msg
                )),
                other => other,
            })?;
            info!("Using in-cluster configuration ({})", config.cluster_url);
            Ok(ResolvedConfig {
                config,
                source: ConfigSource::InCluster,
            })
        }
    }
}
