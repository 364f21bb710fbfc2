//! Audit orchestrator for coordinating the entire workflow
//!
//! This module provides:
//! - Workflow coordination: resolve → parse → dedupe → fetch + scan → assess
//! - Bounded, order-preserving registry lookups
//! - An import scan on a blocking thread, concurrent with the lookups
//! - Partial continuation: manifest problems become warnings, lookup
//!   failures stay on their own record

use crate::config::AuditConfig;
use crate::domain::{dedupe, AuditReport, Ecosystem, RawDependency};
use crate::error::{AppError, RegistryError};
use crate::health::HealthAssessor;
use crate::manifest::{parse_manifest, resolve_target};
use crate::registry::{create_adapter, HttpClient, RegistryAdapter, ReleaseInfo};
use crate::usage::{ImportScanner, ImportSet};
use futures::stream::{self, StreamExt};
use std::path::Path;

/// Hooks for observing registry lookups (progress display, logging)
pub trait AuditObserver: Send + Sync {
    /// Lookups are about to start for `total` dependencies
    fn fetch_started(&self, _total: usize) {}

    /// One lookup finished
    fn dependency_fetched(&self, _dependency: &RawDependency, _success: bool) {}

    /// All lookups finished
    fn fetch_finished(&self) {}
}

/// Observer that ignores every event
pub struct NoopObserver;

impl AuditObserver for NoopObserver {}

/// Orchestrator for coordinating the audit workflow
pub struct Orchestrator {
    config: AuditConfig,
    pypi: Box<dyn RegistryAdapter>,
    npm: Box<dyn RegistryAdapter>,
    scanner: ImportScanner,
}

impl Orchestrator {
    /// Create an orchestrator against the public registries
    pub fn new(config: AuditConfig) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        Self::with_adapters(
            config,
            create_adapter(Ecosystem::Pypi, client.clone()),
            create_adapter(Ecosystem::Npm, client),
        )
    }

    /// Create an orchestrator with custom registry adapters (for testing)
    pub fn with_adapters(
        config: AuditConfig,
        pypi: Box<dyn RegistryAdapter>,
        npm: Box<dyn RegistryAdapter>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            config,
            pypi,
            npm,
            scanner: ImportScanner::new(),
        })
    }

    /// Run the audit workflow
    pub async fn run(&self) -> Result<AuditReport, AppError> {
        self.run_with_observer(&NoopObserver).await
    }

    /// Run the audit workflow, reporting lookup progress to `observer`
    pub async fn run_with_observer(
        &self,
        observer: &dyn AuditObserver,
    ) -> Result<AuditReport, AppError> {
        // Step 1: Resolve the target into manifests
        let target = resolve_target(&self.config.path)?;

        // Step 2: Parse manifests; problems are warnings, not failures
        let mut warnings = Vec::new();
        let mut dependencies = Vec::new();
        for manifest in &target.manifests {
            match parse_manifest(&manifest.path, manifest.kind) {
                Ok(deps) => {
                    tracing::debug!("{}: {} dependencies", manifest.path.display(), deps.len());
                    dependencies.extend(deps);
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    warnings.push(e.to_string());
                }
            }
        }

        let dependencies = dedupe(dependencies);
        if dependencies.is_empty() {
            return Ok(AuditReport::new(Vec::new(), warnings, false));
        }

        // Step 3: Fetch release data while scanning imports
        let scan_imports = self.config.check_imports
            && dependencies.iter().any(|d| d.ecosystem == Ecosystem::Pypi);

        observer.fetch_started(dependencies.len());
        let (lookups, imports) = tokio::join!(
            self.fetch_all(&dependencies, observer),
            self.scan_imports(&target.root, scan_imports)
        );
        observer.fetch_finished();

        // An empty scan means no Python sources, not that nothing is used
        let imports = imports.filter(|set| !set.is_empty());

        // Step 4: Assess each dependency
        let assessor = HealthAssessor::new(self.config.thresholds);
        let records = dependencies
            .iter()
            .zip(&lookups)
            .map(|(dep, lookup)| assessor.evaluate(dep, lookup, imports.as_ref()))
            .collect();

        Ok(AuditReport::new(records, warnings, imports.is_some()))
    }

    /// Get the registry adapter for an ecosystem
    fn adapter(&self, ecosystem: Ecosystem) -> &dyn RegistryAdapter {
        match ecosystem {
            Ecosystem::Pypi => self.pypi.as_ref(),
            Ecosystem::Npm => self.npm.as_ref(),
        }
    }

    /// Fetch every dependency, at most `concurrency` at a time, in input order
    async fn fetch_all(
        &self,
        dependencies: &[RawDependency],
        observer: &dyn AuditObserver,
    ) -> Vec<Result<ReleaseInfo, RegistryError>> {
        stream::iter(dependencies)
            .map(|dep| async move {
                let result = self.adapter(dep.ecosystem).fetch_release(&dep.name).await;
                if let Err(e) = &result {
                    tracing::debug!("{}: {}", dep, e);
                }
                observer.dependency_fetched(dep, result.is_ok());
                result
            })
            .buffered(self.config.concurrency)
            .collect()
            .await
    }

    /// Scan the project root for imports on a blocking thread
    async fn scan_imports(&self, root: &Path, enabled: bool) -> Option<ImportSet> {
        if !enabled {
            return None;
        }

        let scanner = self.scanner.clone();
        let root = root.to_path_buf();
        match tokio::task::spawn_blocking(move || scanner.collect_imports(&root)).await {
            Ok(imports) => Some(imports),
            Err(e) => {
                tracing::warn!("import scan failed: {}", e);
                Some(ImportSet::new())
            }
        }
    }
}
