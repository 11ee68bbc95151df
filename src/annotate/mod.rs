pub mod fallback;
pub mod math;
pub mod model;
pub mod scope;
pub mod service;
pub mod snapshot;
pub mod targets;
pub mod zone_details;

#[cfg(test)]
mod fixtures;

pub use model::{
    AnnotateError, AnnotatedScope, AnnotatedZoneDetail, AnnotationSummary, ScenarioAnnotation,
};
pub use scope::ScopeAnnotator;
pub use service::AnnotationService;
pub use snapshot::{PricingSnapshot, SnapshotIndex};
pub use zone_details::ZoneDetailAnnotator;

/// Zone-level annotation of every consistent detail row in the snapshot.
pub fn annotate_zone_details(snapshot: &PricingSnapshot) -> Vec<AnnotatedZoneDetail> {
    let index = snapshot.index();
    ZoneDetailAnnotator::new(&index).annotate()
}

/// Scope-level annotation of every scope in the snapshot.
pub fn annotate_scopes(snapshot: &PricingSnapshot) -> Vec<AnnotatedScope> {
    annotate_all(snapshot).0
}

/// Both levels from a single index build.
pub fn annotate_all(snapshot: &PricingSnapshot) -> (Vec<AnnotatedScope>, Vec<AnnotatedZoneDetail>) {
    let index = snapshot.index();
    let zone_rows = ZoneDetailAnnotator::new(&index).annotate();
    let scopes = ScopeAnnotator::new(&index).annotate(&zone_rows);
    (scopes, zone_rows)
}

pub fn summarize(
    snapshot: &PricingSnapshot,
    scopes: &[AnnotatedScope],
    zone_rows: &[AnnotatedZoneDetail],
) -> AnnotationSummary {
    AnnotationSummary {
        scopes: scopes.len(),
        zone_rows: zone_rows.len(),
        excluded_zone_rows: snapshot.zone_details.len().saturating_sub(zone_rows.len()),
        primary_violations: zone_rows.iter().filter(|r| r.primary_index_violation).count(),
        secondary_violations: zone_rows.iter().filter(|r| r.secondary_index_violation).count(),
    }
}
