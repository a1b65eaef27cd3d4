// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by the suite
pub mod env {
    /// Path to a kubeconfig file
    pub const KUBECONFIG: &str = "KUBECONFIG";
    /// Name of the CRD the existence check waits for
    pub const CRD_NAME: &str = "CRD_NAME";
    pub const WAIT_TIMEOUT_SECS: &str = "CRD_WAIT_TIMEOUT_SECS";
    pub const WAIT_INTERVAL_SECS: &str = "CRD_WAIT_INTERVAL_SECS";
    /// `text` or `json`
    pub const REPORT_FORMAT: &str = "CRD_REPORT_FORMAT";
}

/// CRD polling configuration
pub mod poll {
    /// How long the existence check waits for the CRD
    pub const WAIT_TIMEOUT_SECS: u64 = 30;
    /// Fixed spacing between existence attempts
    pub const WAIT_INTERVAL_SECS: u64 = 1;
}

/// Kubeconfig location relative to the home directory
pub const DEFAULT_KUBECONFIG_DIR: &str = ".kube";
pub const DEFAULT_KUBECONFIG_FILE: &str = "config";

/// Check names as they appear in the suite report
pub mod checks {
    pub const FIND_CRD: &str = "should find the Custom Resource Definition";
    pub const LIST_CRDS: &str = "should list Custom Resource Definitions";
}
