//! Runs in its own process so the global subscriber it installs cannot clash
//! with the capturing subscriber used by the observability tests.

use tracing::Level;
use webaudit_core::{init_tracing, init_tracing_from_env, AuditRunner, GatheredArtifacts};

#[test]
fn init_tracing_is_idempotent() {
    init_tracing(true, Level::DEBUG);
    init_tracing(false, Level::INFO);
    init_tracing_from_env();

    // events flow through the installed subscriber without panicking
    let report = AuditRunner::default().run(GatheredArtifacts::default());
    assert_eq!(report.audits.len(), 6);
}
