use crate::annotate::snapshot::PricingSnapshot;
use crate::storage::entity::{
    article, competitor_weighting, kvi_index_target, kvi_promo_status, nbob_pair, nbob_role,
    price_index_target, pricing_cm_planned_price, pricing_cost, pricing_current_price,
    pricing_planned_price, pricing_recommended_price, pricing_scenario, pricing_scenario_scope,
    scenario_scope_zone_details, zone,
};
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::BTreeSet;

/// Which scopes to annotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSelection {
    Scenario(i32),
    Scopes(Vec<i32>),
}

pub struct SnapshotRepository;

impl SnapshotRepository {
    pub async fn scenario(
        db: &DatabaseConnection,
        scenario_id: i32,
    ) -> Result<Option<pricing_scenario::Model>, DbErr> {
        pricing_scenario::Entity::find_by_id(scenario_id).one(db).await
    }

    /// Read every row the annotators need for the selected scopes. Rows come
    /// back in primary-key order. Global tables (zones, KVI index targets,
    /// NBOB pairs) are read whole.
    pub async fn load(
        db: &DatabaseConnection,
        selection: &ScopeSelection,
    ) -> Result<PricingSnapshot, DbErr> {
        let scope_query = match selection {
            ScopeSelection::Scenario(id) => pricing_scenario_scope::Entity::find()
                .filter(pricing_scenario_scope::Column::ScenarioId.eq(*id)),
            ScopeSelection::Scopes(ids) => pricing_scenario_scope::Entity::find()
                .filter(pricing_scenario_scope::Column::Id.is_in(ids.clone())),
        };
        let scopes = scope_query
            .order_by_asc(pricing_scenario_scope::Column::Id)
            .all(db)
            .await?;
        if scopes.is_empty() {
            debug!("no scopes for {:?}", selection);
            return Ok(PricingSnapshot::default());
        }

        let scope_ids: Vec<i32> = scopes.iter().map(|s| s.id).collect();
        let scenario_ids: BTreeSet<i32> = scopes.iter().map(|s| s.scenario_id).collect();
        let article_ids: BTreeSet<i32> = scopes.iter().map(|s| s.article_id).collect();

        let articles = article::Entity::find()
            .filter(article::Column::Id.is_in(article_ids.iter().copied()))
            .order_by_asc(article::Column::Id)
            .all(db)
            .await?;
        let plns: Vec<String> = articles.iter().map(|a| a.pln.clone()).collect();
        let opstudy_ids: BTreeSet<i32> = articles.iter().map(|a| a.opstudy_id).collect();

        let (
            zones,
            zone_details,
            current_prices,
            costs,
            recommended_prices,
            planned_prices,
            cm_planned_prices,
        ) = futures::try_join!(
            zone::Entity::find()
                .order_by_asc(zone::Column::Id)
                .all(db),
            scenario_scope_zone_details::Entity::find()
                .filter(scenario_scope_zone_details::Column::ScopeId.is_in(scope_ids.clone()))
                .order_by_asc(scenario_scope_zone_details::Column::Id)
                .all(db),
            pricing_current_price::Entity::find()
                .filter(pricing_current_price::Column::Pln.is_in(plns.clone()))
                .order_by_asc(pricing_current_price::Column::Id)
                .all(db),
            pricing_cost::Entity::find()
                .filter(pricing_cost::Column::Pln.is_in(plns.clone()))
                .order_by_asc(pricing_cost::Column::Id)
                .all(db),
            pricing_recommended_price::Entity::find()
                .filter(pricing_recommended_price::Column::ScopeId.is_in(scope_ids.clone()))
                .order_by_asc(pricing_recommended_price::Column::Id)
                .all(db),
            pricing_planned_price::Entity::find()
                .filter(pricing_planned_price::Column::ScopeId.is_in(scope_ids.clone()))
                .order_by_asc(pricing_planned_price::Column::Id)
                .all(db),
            pricing_cm_planned_price::Entity::find()
                .filter(pricing_cm_planned_price::Column::ScopeId.is_in(scope_ids.clone()))
                .order_by_asc(pricing_cm_planned_price::Column::Id)
                .all(db),
        )?;

        let (
            competitor_weightings,
            kvi_promo_statuses,
            price_index_targets,
            kvi_index_targets,
            nbob_roles,
            nbob_pairs,
        ) = futures::try_join!(
            competitor_weighting::Entity::find()
                .filter(competitor_weighting::Column::OpstudyId.is_in(opstudy_ids.iter().copied()))
                .order_by_asc(competitor_weighting::Column::Id)
                .all(db),
            kvi_promo_status::Entity::find()
                .filter(kvi_promo_status::Column::ArticleId.is_in(article_ids.iter().copied()))
                .order_by_asc(kvi_promo_status::Column::Id)
                .all(db),
            price_index_target::Entity::find()
                .filter(price_index_target::Column::ScenarioId.is_in(scenario_ids.iter().copied()))
                .filter(price_index_target::Column::OpstudyId.is_in(opstudy_ids.iter().copied()))
                .order_by_asc(price_index_target::Column::Id)
                .all(db),
            kvi_index_target::Entity::find()
                .order_by_asc(kvi_index_target::Column::Id)
                .all(db),
            nbob_role::Entity::find()
                .filter(nbob_role::Column::OpstudyId.is_in(opstudy_ids.iter().copied()))
                .order_by_asc(nbob_role::Column::Id)
                .all(db),
            nbob_pair::Entity::find()
                .order_by_asc(nbob_pair::Column::Id)
                .all(db),
        )?;

        debug!(
            "loaded snapshot for {:?}: {} scopes, {} zone detail rows, {} index targets",
            selection,
            scopes.len(),
            zone_details.len(),
            price_index_targets.len() + kvi_index_targets.len(),
        );

        Ok(PricingSnapshot {
            scopes,
            articles,
            zones,
            zone_details,
            current_prices,
            costs,
            recommended_prices,
            planned_prices,
            cm_planned_prices,
            competitor_weightings,
            kvi_promo_statuses,
            price_index_targets,
            kvi_index_targets,
            nbob_roles,
            nbob_pairs,
        })
    }
}
