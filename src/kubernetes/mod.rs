// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for credential resolution, client creation, and CRD checks.

pub mod client;
pub mod credentials;
pub mod crd;

pub use client::build_client;
pub use credentials::{load_connection_config, ConfigSource, ResolvedConfig};
pub use crd::CrdVerifier;
