//! Read-time pricing KPIs for pricing scenarios.
//!
//! The storage layer declares the relational schema (sea-orm entities) and
//! loads the rows a set of scopes depends on. The annotators turn those rows
//! into zone-level and scope-level records with suggested prices, AUR,
//! competitive indices, index target ranges and violation flags. Nothing is
//! written back.

pub mod annotate;
pub mod config;
pub mod storage;

pub use annotate::{
    annotate_all, annotate_scopes, annotate_zone_details, AnnotateError, AnnotatedScope,
    AnnotatedZoneDetail, AnnotationService, PricingSnapshot, ScenarioAnnotation,
};
pub use config::StoreConfig;
pub use storage::repository::ScopeSelection;
