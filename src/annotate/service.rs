use crate::annotate::model::{
    AnnotateError, AnnotatedScope, AnnotatedZoneDetail, ScenarioAnnotation,
};
use crate::annotate::{annotate_all, annotate_scopes, annotate_zone_details, summarize};
use crate::storage::repository::{ScopeSelection, SnapshotRepository};
use log::info;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Loads the rows a selection needs and runs the annotators over them.
/// Every call reads fresh rows; nothing is kept between calls.
pub struct AnnotationService {
    db: Arc<DatabaseConnection>,
}

impl AnnotationService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn annotate_zone_details(
        &self,
        selection: &ScopeSelection,
    ) -> Result<Vec<AnnotatedZoneDetail>, AnnotateError> {
        let snapshot = SnapshotRepository::load(&self.db, selection).await?;
        Ok(annotate_zone_details(&snapshot))
    }

    pub async fn annotate_scopes(
        &self,
        selection: &ScopeSelection,
    ) -> Result<Vec<AnnotatedScope>, AnnotateError> {
        let snapshot = SnapshotRepository::load(&self.db, selection).await?;
        Ok(annotate_scopes(&snapshot))
    }

    pub async fn annotate_scenario(
        &self,
        scenario_id: i32,
    ) -> Result<ScenarioAnnotation, AnnotateError> {
        let scenario = SnapshotRepository::scenario(&self.db, scenario_id)
            .await?
            .ok_or(AnnotateError::ScenarioNotFound(scenario_id))?;

        let snapshot =
            SnapshotRepository::load(&self.db, &ScopeSelection::Scenario(scenario_id)).await?;
        let (scopes, zone_details) = annotate_all(&snapshot);
        let summary = summarize(&snapshot, &scopes, &zone_details);

        info!(
            "annotated scenario [{}] {}: {} scopes, {} zone rows ({} excluded), \
             violations primary={} secondary={}",
            scenario.id,
            scenario.name,
            summary.scopes,
            summary.zone_rows,
            summary.excluded_zone_rows,
            summary.primary_violations,
            summary.secondary_violations,
        );

        Ok(ScenarioAnnotation {
            scenario,
            scopes,
            zone_details,
            summary,
        })
    }
}
