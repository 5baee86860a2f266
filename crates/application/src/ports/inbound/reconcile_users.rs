//! Host user reconciliation inbound port.

/// Inbound port for the host user reconciliation pass.
pub trait ReconcileUsers: Send + Sync {
    /// Run one pass. In dry-run mode candidates are only reported.
    ///
    /// Outcomes are observable through logs and host state; the pass has
    /// no synchronous consumer.
    fn execute(&self, dry_run: bool);
}
