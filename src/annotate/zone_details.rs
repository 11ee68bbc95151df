//! Zone-level annotation of scope-zone fact rows.
//!
//! Steps run in dependency order over the whole batch:
//! consistency filter, suggested prices, incremental deltas, scope-wide AUR,
//! competitive indices, competitor names, target ranges, violation flags.
//! Each step reads only what earlier steps filled in.

use crate::annotate::fallback::Cascade;
use crate::annotate::math::{div, index, sub, SqlSum};
use crate::annotate::model::AnnotatedZoneDetail;
use crate::annotate::snapshot::SnapshotIndex;
use crate::annotate::targets::{
    resolve_competitor, resolve_target, CompetitorRank, TargetContext, DEFAULT_KVI_CLASS,
    DEFAULT_PROMO_STATUS,
};
use crate::storage::entity::{
    article, pricing_cm_planned_price, pricing_current_price, pricing_planned_price,
    pricing_recommended_price, pricing_scenario_scope,
};
use log::debug;
use std::collections::HashMap;

/// Where a suggested price comes from, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    CmOverride,
    PricingOverride,
    Recommended,
}

pub const PRICE_CASCADE: Cascade<PriceSource> = Cascade::new(&[
    PriceSource::CmOverride,
    PriceSource::PricingOverride,
    PriceSource::Recommended,
]);

#[derive(Debug, Clone, Copy, Default)]
struct ScenarioPrice {
    price: Option<f64>,
    tiered_price: Option<f64>,
    tiered_multiple: Option<i32>,
}

impl From<&pricing_cm_planned_price::Model> for ScenarioPrice {
    fn from(row: &pricing_cm_planned_price::Model) -> Self {
        Self {
            price: row.price,
            tiered_price: row.tiered_price,
            tiered_multiple: row.tiered_multiple,
        }
    }
}

impl From<&pricing_planned_price::Model> for ScenarioPrice {
    fn from(row: &pricing_planned_price::Model) -> Self {
        Self {
            price: row.price,
            tiered_price: row.tiered_price,
            tiered_multiple: row.tiered_multiple,
        }
    }
}

impl From<&pricing_recommended_price::Model> for ScenarioPrice {
    fn from(row: &pricing_recommended_price::Model) -> Self {
        Self {
            price: Some(row.price),
            tiered_price: row.tiered_price,
            tiered_multiple: row.tiered_multiple,
        }
    }
}

/// A detail row that passed the consistency filter, with the rows it joins to.
struct Draft<'a> {
    scope: &'a pricing_scenario_scope::Model,
    article: &'a article::Model,
    current: &'a pricing_current_price::Model,
    row: AnnotatedZoneDetail,
}

#[derive(Debug, Default)]
struct AurSums {
    sugg_numerator: SqlSum,
    sugg_denominator: SqlSum,
    curr_numerator: SqlSum,
    curr_denominator: SqlSum,
}

pub struct ZoneDetailAnnotator<'i, 'a> {
    index: &'i SnapshotIndex<'a>,
}

impl<'i, 'a> ZoneDetailAnnotator<'i, 'a> {
    pub fn new(index: &'i SnapshotIndex<'a>) -> Self {
        Self { index }
    }

    /// Annotated rows in input order. Rows failing the zone consistency
    /// check are dropped; no other row is added or removed.
    pub fn annotate(&self) -> Vec<AnnotatedZoneDetail> {
        let mut drafts = self.consistent_rows();
        let total = self.index.snapshot().zone_details.len();
        if drafts.len() < total {
            debug!(
                "zone consistency filter dropped {} of {} detail rows",
                total - drafts.len(),
                total
            );
        }

        self.suggested_prices(&mut drafts);
        Self::incremental_fields(&mut drafts);
        Self::zone_level_aur(&mut drafts);
        Self::competitive_indices(&mut drafts);
        self.competitor_types(&mut drafts);
        self.target_ranges(&mut drafts);
        Self::index_violations(&mut drafts);

        drafts.into_iter().map(|d| d.row).collect()
    }

    /// Keep a detail row only when the scope's recommended price and the
    /// article's current price and cost all exist for the row's own zone.
    fn consistent_rows(&self) -> Vec<Draft<'a>> {
        let index = self.index;
        index
            .snapshot()
            .zone_details
            .iter()
            .filter_map(|detail| {
                let scope = index.scope(detail.scope_id)?;
                let article = index.article(scope.article_id)?;
                index.recommended(scope.id, detail.zone_id)?;
                let current = index.current_price(&article.pln, detail.zone_id)?;
                if !index.has_cost(&article.pln, detail.zone_id) {
                    return None;
                }
                Some(Draft {
                    scope,
                    article,
                    current,
                    row: AnnotatedZoneDetail::new(detail.clone()),
                })
            })
            .collect()
    }

    fn scenario_price(
        &self,
        source: PriceSource,
        scope_id: i32,
        zone_id: i32,
    ) -> Option<ScenarioPrice> {
        let index = self.index;
        match source {
            PriceSource::CmOverride => index.cm_planned(scope_id, zone_id).map(ScenarioPrice::from),
            PriceSource::PricingOverride => {
                index.planned(scope_id, zone_id).map(ScenarioPrice::from)
            }
            PriceSource::Recommended => index
                .recommended(scope_id, zone_id)
                .map(ScenarioPrice::from),
        }
    }

    /// Price, tiered price and tiered multiple each cascade on their own, so
    /// an override row with a null tiered price still defers that field.
    fn suggested_prices(&self, drafts: &mut [Draft<'a>]) {
        for draft in drafts.iter_mut() {
            let (scope_id, zone_id) = (draft.row.scope_id(), draft.row.zone_id());
            let lookup = |source| self.scenario_price(source, scope_id, zone_id);

            draft.row.suggested_price = PRICE_CASCADE.value(|s| lookup(s)?.price);
            draft.row.suggested_tiered_price = PRICE_CASCADE.value(|s| lookup(s)?.tiered_price);
            draft.row.suggested_tiered_multiple =
                PRICE_CASCADE.value(|s| lookup(s)?.tiered_multiple);
        }
    }

    fn incremental_fields(drafts: &mut [Draft<'a>]) {
        for draft in drafts.iter_mut() {
            let d = &draft.row.detail;
            let (gp, units, sales) = (
                sub(d.total_gp, d.curr_gp),
                sub(d.total_units, d.curr_units),
                sub(d.total_sales, d.curr_sales),
            );
            draft.row.incr_gp = gp;
            draft.row.incr_units = units;
            draft.row.incr_sales = sales;
        }
    }

    /// Unit-weighted average prices, aggregated once per scope and written
    /// back onto every zone row of that scope.
    fn zone_level_aur(drafts: &mut [Draft<'a>]) {
        let mut sums: HashMap<i32, AurSums> = HashMap::new();
        for draft in drafts.iter() {
            let d = &draft.row.detail;
            let s = sums.entry(draft.row.scope_id()).or_default();
            s.sugg_numerator
                .add(draft.row.suggested_price.zip(d.total_units).map(|(p, u)| p * u));
            s.sugg_denominator.add(d.total_units);
            s.curr_numerator.add(d.curr_units.map(|u| draft.current.price * u));
            s.curr_denominator.add(d.curr_units);
        }

        let aur: HashMap<i32, (Option<f64>, Option<f64>)> = sums
            .into_iter()
            .map(|(scope_id, s)| {
                (
                    scope_id,
                    (
                        div(s.sugg_numerator.value(), s.sugg_denominator.value()),
                        div(s.curr_numerator.value(), s.curr_denominator.value()),
                    ),
                )
            })
            .collect();

        for draft in drafts.iter_mut() {
            if let Some(&(sugg, curr)) = aur.get(&draft.row.scope_id()) {
                draft.row.sugg_aur = sugg;
                draft.row.curr_aur = curr;
            }
        }
    }

    fn competitive_indices(drafts: &mut [Draft<'a>]) {
        for draft in drafts.iter_mut() {
            let row = &mut draft.row;
            let d = &row.detail;
            let (sugg, curr) = (row.sugg_aur, row.curr_aur);

            let bpi = (
                index(sugg, d.primary_comp_price),
                index(sugg, d.secondary_comp_price),
                index(curr, d.primary_comp_price),
                index(curr, d.secondary_comp_price),
            );
            let api = (
                index(discounted(sugg, d.discount_pct), d.primary_comp_price_api),
                index(discounted(sugg, d.discount_pct), d.secondary_comp_price_api),
                index(discounted(curr, d.discount_pct), d.primary_comp_price_api),
                index(discounted(curr, d.discount_pct), d.secondary_comp_price_api),
            );

            (
                row.sugg_primary_bpi,
                row.sugg_secondary_bpi,
                row.curr_primary_bpi,
                row.curr_secondary_bpi,
            ) = bpi;
            (
                row.sugg_primary_api,
                row.sugg_secondary_api,
                row.curr_primary_api,
                row.curr_secondary_api,
            ) = api;
        }
    }

    fn competitor_types(&self, drafts: &mut [Draft<'a>]) {
        for draft in drafts.iter_mut() {
            let (opstudy_id, zone_id) = (draft.article.opstudy_id, draft.row.zone_id());
            draft.row.primary_competitor =
                resolve_competitor(self.index, opstudy_id, zone_id, CompetitorRank::Primary);
            draft.row.secondary_competitor =
                resolve_competitor(self.index, opstudy_id, zone_id, CompetitorRank::Secondary);
        }
    }

    fn target_ranges(&self, drafts: &mut [Draft<'a>]) {
        for draft in drafts.iter_mut() {
            let status = self.index.kvi_promo_status(draft.article.id);
            let ctx = TargetContext {
                scenario_id: draft.scope.scenario_id,
                opstudy_id: draft.article.opstudy_id,
                zone_id: draft.row.zone_id(),
                kvi_class: status.map_or(DEFAULT_KVI_CLASS, |s| s.kvi_class.as_str()),
                promo_status: status.map_or(DEFAULT_PROMO_STATUS, |s| s.promo_status.as_str()),
            };

            let primary = resolve_target(
                self.index,
                &ctx,
                draft.row.primary_competitor.as_deref(),
                CompetitorRank::Primary,
            );
            let secondary = resolve_target(
                self.index,
                &ctx,
                draft.row.secondary_competitor.as_deref(),
                CompetitorRank::Secondary,
            );

            draft.row.primary_target_bpi_min = primary.index_min;
            draft.row.primary_target_bpi_max = primary.index_max;
            draft.row.secondary_target_bpi_min = secondary.index_min;
            draft.row.secondary_target_bpi_max = secondary.index_max;
        }
    }

    fn index_violations(drafts: &mut [Draft<'a>]) {
        for draft in drafts.iter_mut() {
            let row = &mut draft.row;
            row.primary_index_violation = outside_range(
                row.sugg_primary_bpi,
                row.primary_target_bpi_min,
                row.primary_target_bpi_max,
            );
            row.secondary_index_violation = outside_range(
                row.sugg_secondary_bpi,
                row.secondary_target_bpi_min,
                row.secondary_target_bpi_max,
            );
        }
    }
}

/// `aur * (1 - discount_pct)`
fn discounted(aur: Option<f64>, discount_pct: Option<f64>) -> Option<f64> {
    Some(aur? * (1.0 - discount_pct?))
}

/// False unless the index and both bounds are known.
fn outside_range(value: Option<f64>, min: Option<i32>, max: Option<i32>) -> bool {
    match (value, min, max) {
        (Some(v), Some(min), Some(max)) => v > f64::from(max) || v < f64::from(min),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::fixtures::{self, priced_scope, OPSTUDY, SCENARIO};
    use crate::annotate::snapshot::PricingSnapshot;
    use crate::storage::entity::{competitor_weighting, kvi_index_target, kvi_promo_status};

    fn annotate(snapshot: &PricingSnapshot) -> Vec<AnnotatedZoneDetail> {
        let index = snapshot.index();
        ZoneDetailAnnotator::new(&index).annotate()
    }

    #[test]
    fn override_precedence_falls_through_levels() {
        let mut snapshot = priced_scope(&[(1, 10, 9.0, 10.0)]);
        snapshot.planned_prices.push(fixtures::planned(1, 1, 1, Some(11.0)));
        snapshot.cm_planned_prices.push(fixtures::cm_planned(1, 1, 1, Some(12.0)));
        assert_eq!(annotate(&snapshot)[0].suggested_price, Some(12.0));

        snapshot.cm_planned_prices.clear();
        assert_eq!(annotate(&snapshot)[0].suggested_price, Some(11.0));

        snapshot.planned_prices.clear();
        assert_eq!(annotate(&snapshot)[0].suggested_price, Some(10.0));
    }

    #[test]
    fn null_override_price_defers_to_next_level() {
        let mut snapshot = priced_scope(&[(1, 10, 9.0, 10.0)]);
        let mut cm = fixtures::cm_planned(1, 1, 1, None);
        cm.tiered_multiple = Some(2);
        cm.tiered_price = Some(19.0);
        snapshot.cm_planned_prices.push(cm);
        snapshot.planned_prices.push(fixtures::planned(1, 1, 1, Some(11.0)));

        let row = &annotate(&snapshot)[0];
        assert_eq!(row.suggested_price, Some(11.0));
        assert_eq!(row.suggested_tiered_multiple, Some(2));
        assert_eq!(row.suggested_tiered_price, Some(19.0));
    }

    #[test]
    fn rows_without_matching_zone_rows_are_excluded() {
        let mut snapshot = priced_scope(&[
            (1, 10, 9.0, 10.0),
            (2, 10, 9.0, 10.0),
            (3, 10, 9.0, 10.0),
        ]);
        snapshot.recommended_prices.retain(|r| r.zone_id != 1);
        snapshot.costs.retain(|c| c.zone_id != 2);

        let rows = annotate(&snapshot);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].zone_id(), 3);
    }

    #[test]
    fn aur_is_unit_weighted_per_scope() {
        let mut snapshot = priced_scope(&[(1, 10, 8.0, 10.0), (2, 10, 16.0, 20.0)]);
        snapshot.zone_details[0].total_units = Some(100.0);
        snapshot.zone_details[1].total_units = Some(300.0);
        snapshot.zone_details[0].curr_units = Some(50.0);
        snapshot.zone_details[1].curr_units = Some(150.0);

        let rows = annotate(&snapshot);
        for row in &rows {
            assert_eq!(row.sugg_aur, Some(17.5));
            assert_eq!(row.curr_aur, Some(14.0));
        }
    }

    #[test]
    fn aur_with_zero_units_is_null() {
        let mut snapshot = priced_scope(&[(1, 10, 8.0, 10.0), (2, 10, 16.0, 20.0)]);
        for detail in snapshot.zone_details.iter_mut() {
            detail.total_units = Some(0.0);
        }
        let rows = annotate(&snapshot);
        assert!(rows.iter().all(|r| r.sugg_aur.is_none() && r.curr_aur.is_none()));
    }

    #[test]
    fn aur_does_not_mix_scopes() {
        let mut snapshot = priced_scope(&[(1, 10, 8.0, 10.0)]);
        snapshot.zone_details[0].total_units = Some(100.0);
        snapshot.articles.push(fixtures::article(2, "P2"));
        snapshot.scopes.push(fixtures::scope(2, 2));
        let mut other = fixtures::detail(10, 2, 1);
        other.total_units = Some(100.0);
        snapshot.zone_details.push(other);
        snapshot.current_prices.push(fixtures::current(10, "P2", 1, 30.0));
        snapshot.costs.push(fixtures::cost(10, "P2", 1));
        snapshot.recommended_prices.push(fixtures::recommended(10, 2, 1, 30.0));

        let rows = annotate(&snapshot);
        assert_eq!(rows[0].sugg_aur, Some(10.0));
        assert_eq!(rows[1].sugg_aur, Some(30.0));
    }

    #[test]
    fn indices_and_incremental_fields() {
        let mut snapshot = priced_scope(&[(1, 10, 8.0, 10.0)]);
        let d = &mut snapshot.zone_details[0];
        d.total_units = Some(10.0);
        d.curr_units = Some(12.0);
        d.total_gp = Some(40.0);
        d.curr_gp = Some(30.0);
        d.total_sales = Some(100.0);
        d.curr_sales = None;
        d.primary_comp_price = Some(8.0);
        d.secondary_comp_price = Some(0.0);
        d.primary_comp_price_api = Some(9.0);
        d.discount_pct = Some(0.1);

        let row = &annotate(&snapshot)[0];
        assert_eq!(row.incr_gp, Some(10.0));
        assert_eq!(row.incr_units, Some(-2.0));
        assert_eq!(row.incr_sales, None);
        assert_eq!(row.sugg_primary_bpi, Some(125.0));
        assert_eq!(row.curr_primary_bpi, Some(100.0));
        assert_eq!(row.sugg_secondary_bpi, None);
        assert_eq!(row.sugg_primary_api, Some(10.0 * 0.9 / 9.0 * 100.0));
        assert_eq!(row.sugg_secondary_api, None);
    }

    fn weighting(zone: &str, primary: &str) -> competitor_weighting::Model {
        competitor_weighting::Model {
            id: 1,
            opstudy_id: OPSTUDY,
            zone: Some(zone.to_string()),
            primary_competitor_name: Some(primary.to_string()),
            secondary_competitor_name: None,
        }
    }

    fn wildcard_target(kvi_class: &str, min: i32, max: i32) -> kvi_index_target::Model {
        kvi_index_target::Model {
            id: 1,
            opstudy: "all".to_string(),
            zone: "all".to_string(),
            kvi_class: kvi_class.to_string(),
            primary_secondary: "primary".to_string(),
            promo_status: "non-promo".to_string(),
            competitor_type: "walmart".to_string(),
            index_min: Some(min),
            index_max: Some(max),
        }
    }

    #[test]
    fn wildcard_competitor_applies_to_every_zone() {
        let mut snapshot = priced_scope(&[(1, 10, 8.0, 10.0), (2, 10, 8.0, 10.0)]);
        snapshot.competitor_weightings.push(weighting("All", "Walmart"));

        let rows = annotate(&snapshot);
        assert!(rows
            .iter()
            .all(|r| r.primary_competitor.as_deref() == Some("Walmart")));
        assert!(rows.iter().all(|r| r.secondary_competitor.is_none()));
    }

    #[test]
    fn default_kvi_status_is_used_for_targets() {
        let mut snapshot = priced_scope(&[(1, 10, 8.0, 10.0)]);
        snapshot.competitor_weightings.push(weighting("1", "WALMART"));
        snapshot.kvi_index_targets.push(wildcard_target("Non-KVI", 90, 110));

        let row = &annotate(&snapshot)[0];
        assert_eq!(row.primary_target_bpi_min, Some(90));
        assert_eq!(row.primary_target_bpi_max, Some(110));

        snapshot.kvi_promo_statuses.push(kvi_promo_status::Model {
            id: 1,
            article_id: 1,
            kvi_class: "KVI".to_string(),
            promo_status: "non-promo".to_string(),
        });
        let row = &annotate(&snapshot)[0];
        assert_eq!(row.primary_target_bpi_min, None);
        assert_eq!(row.primary_target_bpi_max, None);
    }

    #[test]
    fn violation_requires_index_and_both_bounds() {
        let mut snapshot = priced_scope(&[(1, 10, 8.0, 12.0)]);
        snapshot.zone_details[0].total_units = Some(10.0);
        snapshot.zone_details[0].primary_comp_price = Some(10.0);
        snapshot.competitor_weightings.push(weighting("all", "walmart"));
        snapshot.kvi_index_targets.push(wildcard_target("non-kvi", 90, 110));

        // 120 > 110
        let row = &annotate(&snapshot)[0];
        assert_eq!(row.sugg_primary_bpi, Some(120.0));
        assert!(row.primary_index_violation);
        assert!(!row.secondary_index_violation);

        snapshot.kvi_index_targets[0].index_max = None;
        let row = &annotate(&snapshot)[0];
        assert_eq!(row.primary_target_bpi_max, None);
        assert!(!row.primary_index_violation);
    }

    #[test]
    fn scenario_target_beats_global_wildcard() {
        let mut snapshot = priced_scope(&[(1, 10, 8.0, 10.0)]);
        snapshot.competitor_weightings.push(weighting("all", "Walmart"));
        snapshot.kvi_index_targets.push(wildcard_target("non-kvi", 50, 60));
        snapshot.price_index_targets.push(crate::storage::entity::price_index_target::Model {
            id: 1,
            scenario_id: SCENARIO,
            opstudy_id: OPSTUDY,
            zone: "1".to_string(),
            primary_secondary: "PRIMARY".to_string(),
            promo_status: "NON-PROMO".to_string(),
            competitor_type: "Walmart".to_string(),
            kvi_class: "NON-KVI".to_string(),
            actual_index: None,
            index_min: Some(95),
            index_max: Some(105),
        });

        let row = &annotate(&snapshot)[0];
        assert_eq!(row.primary_target_bpi_min, Some(95));
        assert_eq!(row.primary_target_bpi_max, Some(105));
    }

    #[test]
    fn annotation_is_repeatable() {
        let mut snapshot = priced_scope(&[(1, 10, 8.1, 10.3), (2, 25, 7.7, 9.9)]);
        snapshot.zone_details[0].total_units = Some(33.3);
        snapshot.zone_details[1].total_units = Some(71.9);
        snapshot.zone_details[0].curr_units = Some(12.5);
        snapshot.zone_details[1].curr_units = Some(3.25);
        assert_eq!(annotate(&snapshot), annotate(&snapshot));
    }
}
