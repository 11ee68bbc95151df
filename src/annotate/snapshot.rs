//! In-memory form of the relational source the annotators read.
//!
//! [`PricingSnapshot`] is plain rows, one `Vec` per table. [`SnapshotIndex`]
//! borrows a snapshot and builds the hash lookups the annotation steps need.
//! An index is built per annotation call and dropped with it.

use crate::annotate::targets::{TargetBounds, TargetKey, TargetTable};
use crate::storage::entity::{
    article, competitor_weighting, kvi_index_target, kvi_promo_status, nbob_pair, nbob_role,
    price_index_target, pricing_cm_planned_price, pricing_cost, pricing_current_price,
    pricing_planned_price, pricing_recommended_price, pricing_scenario_scope,
    scenario_scope_zone_details, zone,
};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingSnapshot {
    pub scopes: Vec<pricing_scenario_scope::Model>,
    pub articles: Vec<article::Model>,
    pub zones: Vec<zone::Model>,
    pub zone_details: Vec<scenario_scope_zone_details::Model>,
    pub current_prices: Vec<pricing_current_price::Model>,
    pub costs: Vec<pricing_cost::Model>,
    pub recommended_prices: Vec<pricing_recommended_price::Model>,
    pub planned_prices: Vec<pricing_planned_price::Model>,
    pub cm_planned_prices: Vec<pricing_cm_planned_price::Model>,
    pub competitor_weightings: Vec<competitor_weighting::Model>,
    pub kvi_promo_statuses: Vec<kvi_promo_status::Model>,
    pub price_index_targets: Vec<price_index_target::Model>,
    pub kvi_index_targets: Vec<kvi_index_target::Model>,
    pub nbob_roles: Vec<nbob_role::Model>,
    pub nbob_pairs: Vec<nbob_pair::Model>,
}

impl PricingSnapshot {
    pub fn index(&self) -> SnapshotIndex<'_> {
        SnapshotIndex::new(self)
    }
}

/// (scope_id, zone_id)
type ScopeZone = (i32, i32);

pub struct SnapshotIndex<'a> {
    snapshot: &'a PricingSnapshot,
    scopes: HashMap<i32, &'a pricing_scenario_scope::Model>,
    articles: HashMap<i32, &'a article::Model>,
    zones: HashMap<i32, &'a zone::Model>,
    details_by_scope: HashMap<i32, Vec<&'a scenario_scope_zone_details::Model>>,
    current_prices: HashMap<(&'a str, i32), &'a pricing_current_price::Model>,
    current_prices_by_pln: HashMap<&'a str, Vec<&'a pricing_current_price::Model>>,
    costs: HashSet<(&'a str, i32)>,
    recommended: HashMap<ScopeZone, &'a pricing_recommended_price::Model>,
    planned: HashMap<ScopeZone, &'a pricing_planned_price::Model>,
    cm_planned: HashMap<ScopeZone, &'a pricing_cm_planned_price::Model>,
    weightings_by_opstudy: HashMap<i32, Vec<&'a competitor_weighting::Model>>,
    kvi_promo: HashMap<i32, &'a kvi_promo_status::Model>,
    targets: HashMap<TargetKey, TargetBounds>,
    nbob_roles: HashMap<i32, &'a nbob_role::Model>,
    nbob_pairs: HashMap<&'a str, &'a nbob_pair::Model>,
}

/// Rows in primary-key order, so that "first match" is the lowest id.
fn by_id<T>(rows: &[T], id: impl Fn(&T) -> i32) -> Vec<&T> {
    let mut sorted: Vec<&T> = rows.iter().collect();
    sorted.sort_by_key(|row| id(*row));
    sorted
}

fn first_by_key<'a, T, K>(
    rows: &'a [T],
    id: impl Fn(&T) -> i32,
    key: impl Fn(&'a T) -> K,
) -> HashMap<K, &'a T>
where
    K: std::hash::Hash + Eq,
{
    let mut map = HashMap::with_capacity(rows.len());
    for row in by_id(rows, id) {
        map.entry(key(row)).or_insert(row);
    }
    map
}

fn group_by_key<'a, T, K>(
    rows: &'a [T],
    id: impl Fn(&T) -> i32,
    key: impl Fn(&'a T) -> K,
) -> HashMap<K, Vec<&'a T>>
where
    K: std::hash::Hash + Eq,
{
    let mut map: HashMap<K, Vec<&'a T>> = HashMap::new();
    for row in by_id(rows, id) {
        map.entry(key(row)).or_default().push(row);
    }
    map
}

impl<'a> SnapshotIndex<'a> {
    pub fn new(snapshot: &'a PricingSnapshot) -> Self {
        let mut targets = HashMap::new();
        for row in by_id(&snapshot.price_index_targets, |t| t.id) {
            let key = TargetKey::new(
                TargetTable::Scenario(row.scenario_id),
                &row.opstudy_id.to_string(),
                &row.zone,
                &row.kvi_class,
                &row.promo_status,
                &row.competitor_type,
                &row.primary_secondary,
            );
            targets.entry(key).or_insert(TargetBounds {
                index_min: row.index_min,
                index_max: row.index_max,
            });
        }
        for row in by_id(&snapshot.kvi_index_targets, |t| t.id) {
            let key = TargetKey::new(
                TargetTable::Global,
                &row.opstudy,
                &row.zone,
                &row.kvi_class,
                &row.promo_status,
                &row.competitor_type,
                &row.primary_secondary,
            );
            targets.entry(key).or_insert(TargetBounds {
                index_min: row.index_min,
                index_max: row.index_max,
            });
        }

        Self {
            snapshot,
            scopes: first_by_key(&snapshot.scopes, |s| s.id, |s| s.id),
            articles: first_by_key(&snapshot.articles, |a| a.id, |a| a.id),
            zones: first_by_key(&snapshot.zones, |z| z.id, |z| z.id),
            details_by_scope: group_by_key(&snapshot.zone_details, |d| d.id, |d| d.scope_id),
            current_prices: first_by_key(
                &snapshot.current_prices,
                |p| p.id,
                |p| (p.pln.as_str(), p.zone_id),
            ),
            current_prices_by_pln: group_by_key(
                &snapshot.current_prices,
                |p| p.id,
                |p| p.pln.as_str(),
            ),
            costs: snapshot
                .costs
                .iter()
                .map(|c| (c.pln.as_str(), c.zone_id))
                .collect(),
            recommended: first_by_key(
                &snapshot.recommended_prices,
                |p| p.id,
                |p| (p.scope_id, p.zone_id),
            ),
            planned: first_by_key(
                &snapshot.planned_prices,
                |p| p.id,
                |p| (p.scope_id, p.zone_id),
            ),
            cm_planned: first_by_key(
                &snapshot.cm_planned_prices,
                |p| p.id,
                |p| (p.scope_id, p.zone_id),
            ),
            weightings_by_opstudy: group_by_key(
                &snapshot.competitor_weightings,
                |w| w.id,
                |w| w.opstudy_id,
            ),
            kvi_promo: first_by_key(&snapshot.kvi_promo_statuses, |k| k.id, |k| k.article_id),
            targets,
            nbob_roles: first_by_key(&snapshot.nbob_roles, |r| r.id, |r| r.opstudy_id),
            nbob_pairs: first_by_key(&snapshot.nbob_pairs, |p| p.id, |p| p.ob_role.as_str()),
        }
    }

    pub fn snapshot(&self) -> &'a PricingSnapshot {
        self.snapshot
    }

    pub fn scope(&self, id: i32) -> Option<&'a pricing_scenario_scope::Model> {
        self.scopes.get(&id).copied()
    }

    pub fn article(&self, id: i32) -> Option<&'a article::Model> {
        self.articles.get(&id).copied()
    }

    pub fn zone(&self, id: i32) -> Option<&'a zone::Model> {
        self.zones.get(&id).copied()
    }

    /// Every stored detail row of a scope, whether or not it passes the
    /// zone consistency filter.
    pub fn details_for_scope(&self, scope_id: i32) -> &[&'a scenario_scope_zone_details::Model] {
        self.details_by_scope
            .get(&scope_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn current_price(
        &self,
        pln: &str,
        zone_id: i32,
    ) -> Option<&'a pricing_current_price::Model> {
        self.current_prices.get(&(pln, zone_id)).copied()
    }

    pub fn current_prices_for(&self, pln: &str) -> &[&'a pricing_current_price::Model] {
        self.current_prices_by_pln
            .get(pln)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_cost(&self, pln: &str, zone_id: i32) -> bool {
        self.costs.contains(&(pln, zone_id))
    }

    pub fn recommended(
        &self,
        scope_id: i32,
        zone_id: i32,
    ) -> Option<&'a pricing_recommended_price::Model> {
        self.recommended.get(&(scope_id, zone_id)).copied()
    }

    pub fn planned(&self, scope_id: i32, zone_id: i32) -> Option<&'a pricing_planned_price::Model> {
        self.planned.get(&(scope_id, zone_id)).copied()
    }

    pub fn cm_planned(
        &self,
        scope_id: i32,
        zone_id: i32,
    ) -> Option<&'a pricing_cm_planned_price::Model> {
        self.cm_planned.get(&(scope_id, zone_id)).copied()
    }

    pub fn competitor_weightings(&self, opstudy_id: i32) -> &[&'a competitor_weighting::Model] {
        self.weightings_by_opstudy
            .get(&opstudy_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn kvi_promo_status(&self, article_id: i32) -> Option<&'a kvi_promo_status::Model> {
        self.kvi_promo.get(&article_id).copied()
    }

    pub fn target(&self, key: &TargetKey) -> Option<TargetBounds> {
        self.targets.get(key).copied()
    }

    pub fn nbob_role(&self, opstudy_id: i32) -> Option<&'a nbob_role::Model> {
        self.nbob_roles.get(&opstudy_id).copied()
    }

    pub fn nbob_pair(&self, ob_role: &str) -> Option<&'a nbob_pair::Model> {
        self.nbob_pairs.get(ob_role).copied()
    }
}
