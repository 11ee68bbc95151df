use crate::storage::entity::{pricing_scenario, pricing_scenario_scope, scenario_scope_zone_details};
use sea_orm::DbErr;
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AnnotateError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),
    #[error("pricing scenario {0} not found")]
    ScenarioNotFound(i32),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A scope-zone fact row with its read-time derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedZoneDetail {
    #[serde(flatten)]
    pub detail: scenario_scope_zone_details::Model,

    // CM override > pricing override > model recommendation
    pub suggested_price: Option<f64>,
    pub suggested_tiered_price: Option<f64>,
    pub suggested_tiered_multiple: Option<i32>,

    pub incr_gp: Option<f64>,
    pub incr_units: Option<f64>,
    pub incr_sales: Option<f64>,

    // scope-wide, repeated on every zone of the scope
    pub sugg_aur: Option<f64>,
    pub curr_aur: Option<f64>,

    pub sugg_primary_bpi: Option<f64>,
    pub sugg_secondary_bpi: Option<f64>,
    pub curr_primary_bpi: Option<f64>,
    pub curr_secondary_bpi: Option<f64>,
    pub sugg_primary_api: Option<f64>,
    pub sugg_secondary_api: Option<f64>,
    pub curr_primary_api: Option<f64>,
    pub curr_secondary_api: Option<f64>,

    pub primary_competitor: Option<String>,
    pub secondary_competitor: Option<String>,

    pub primary_target_bpi_min: Option<i32>,
    pub primary_target_bpi_max: Option<i32>,
    pub secondary_target_bpi_min: Option<i32>,
    pub secondary_target_bpi_max: Option<i32>,

    pub primary_index_violation: bool,
    pub secondary_index_violation: bool,
}

impl AnnotatedZoneDetail {
    pub(crate) fn new(detail: scenario_scope_zone_details::Model) -> Self {
        Self {
            detail,
            suggested_price: None,
            suggested_tiered_price: None,
            suggested_tiered_multiple: None,
            incr_gp: None,
            incr_units: None,
            incr_sales: None,
            sugg_aur: None,
            curr_aur: None,
            sugg_primary_bpi: None,
            sugg_secondary_bpi: None,
            curr_primary_bpi: None,
            curr_secondary_bpi: None,
            sugg_primary_api: None,
            sugg_secondary_api: None,
            curr_primary_api: None,
            curr_secondary_api: None,
            primary_competitor: None,
            secondary_competitor: None,
            primary_target_bpi_min: None,
            primary_target_bpi_max: None,
            secondary_target_bpi_min: None,
            secondary_target_bpi_max: None,
            primary_index_violation: false,
            secondary_index_violation: false,
        }
    }

    pub fn scope_id(&self) -> i32 {
        self.detail.scope_id
    }

    pub fn zone_id(&self) -> i32 {
        self.detail.zone_id
    }
}

/// A pricing scenario scope with its scope-level derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedScope {
    #[serde(flatten)]
    pub scope: pricing_scenario_scope::Model,

    pub ob_role: Option<String>,
    pub nb_ob_min_gap_pct: Option<f64>,
    pub nb_ob_max_gap_pct: Option<f64>,

    pub national_elasticity: Option<f64>,

    pub curr_aur: Option<f64>,
    pub sugg_aur: Option<f64>,
    pub aur_change: Option<f64>,
    pub aur_change_pct: Option<f64>,

    pub curr_mcp_sur: Option<f64>,
    pub curr_mcp_tiered_multiple: Option<i32>,
    pub curr_mcp_tiered_price: Option<f64>,
    pub planned_mcp_sur: Option<f64>,
    pub planned_mcp_tiered_multiple: Option<i32>,
    pub planned_mcp_tiered_price: Option<f64>,
    pub mcp_sur_change: Option<f64>,
    pub mcp_sur_change_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationSummary {
    pub scopes: usize,
    pub zone_rows: usize,
    /// stored detail rows dropped by the zone consistency filter
    pub excluded_zone_rows: usize,
    pub primary_violations: usize,
    pub secondary_violations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioAnnotation {
    pub scenario: pricing_scenario::Model,
    pub scopes: Vec<AnnotatedScope>,
    pub zone_details: Vec<AnnotatedZoneDetail>,
    pub summary: AnnotationSummary,
}
