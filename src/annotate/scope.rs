//! Scope-level annotation: NBOB gap limits, national elasticity, AUR and
//! most-common-price fields, built on top of the zone-level rows.

use crate::annotate::math::{mean, pct_change, sub, weighted_mode};
use crate::annotate::model::{AnnotatedScope, AnnotatedZoneDetail};
use crate::annotate::snapshot::SnapshotIndex;
use crate::storage::entity::{article, pricing_scenario_scope};
use std::collections::HashMap;

pub struct ScopeAnnotator<'i, 'a> {
    index: &'i SnapshotIndex<'a>,
}

impl<'i, 'a> ScopeAnnotator<'i, 'a> {
    pub fn new(index: &'i SnapshotIndex<'a>) -> Self {
        Self { index }
    }

    /// One annotated row per stored scope, in input order. `zone_rows` is the
    /// zone-level annotation of the same snapshot.
    pub fn annotate(&self, zone_rows: &[AnnotatedZoneDetail]) -> Vec<AnnotatedScope> {
        let mut by_scope: HashMap<i32, Vec<&AnnotatedZoneDetail>> = HashMap::new();
        for row in zone_rows {
            by_scope.entry(row.scope_id()).or_default().push(row);
        }

        self.index
            .snapshot()
            .scopes
            .iter()
            .map(|scope| {
                let rows = by_scope.get(&scope.id).map(Vec::as_slice).unwrap_or(&[]);
                self.annotate_scope(scope, rows)
            })
            .collect()
    }

    fn annotate_scope(
        &self,
        scope: &pricing_scenario_scope::Model,
        zone_rows: &[&AnnotatedZoneDetail],
    ) -> AnnotatedScope {
        let article = self.index.article(scope.article_id);
        let mut out = AnnotatedScope {
            scope: scope.clone(),
            ob_role: None,
            nb_ob_min_gap_pct: None,
            nb_ob_max_gap_pct: None,
            national_elasticity: None,
            curr_aur: None,
            sugg_aur: None,
            aur_change: None,
            aur_change_pct: None,
            curr_mcp_sur: None,
            curr_mcp_tiered_multiple: None,
            curr_mcp_tiered_price: None,
            planned_mcp_sur: None,
            planned_mcp_tiered_multiple: None,
            planned_mcp_tiered_price: None,
            mcp_sur_change: None,
            mcp_sur_change_pct: None,
        };

        if let Some(article) = article {
            self.nbob_fields(&mut out, article);
            self.current_mcp(&mut out, article);
        }
        self.national_elasticity(&mut out);
        Self::aur(&mut out, zone_rows);
        self.planned_mcp(&mut out, zone_rows);

        out.mcp_sur_change = sub(out.planned_mcp_sur, out.curr_mcp_sur);
        out.mcp_sur_change_pct = pct_change(out.planned_mcp_sur, out.curr_mcp_sur);
        out
    }

    /// The opstudy's own-brand role, then that role's allowed gap.
    fn nbob_fields(&self, out: &mut AnnotatedScope, article: &article::Model) {
        let Some(role) = self.index.nbob_role(article.opstudy_id) else {
            return;
        };
        out.ob_role = Some(role.ob_role.clone());
        if let Some(pair) = self.index.nbob_pair(&role.ob_role) {
            out.nb_ob_min_gap_pct = pair.min_percent_price_diff;
            out.nb_ob_max_gap_pct = pair.max_percent_price_diff;
        }
    }

    /// Mean over every stored detail row of the scope, including rows the
    /// zone consistency filter would drop.
    fn national_elasticity(&self, out: &mut AnnotatedScope) {
        let details = self.index.details_for_scope(out.scope.id);
        out.national_elasticity = mean(details.iter().map(|d| d.elasticity));
    }

    /// AUR is uniform across a scope's zone rows, so any row carries it.
    fn aur(out: &mut AnnotatedScope, zone_rows: &[&AnnotatedZoneDetail]) {
        if let Some(row) = zone_rows.first() {
            out.curr_aur = row.curr_aur;
            out.sugg_aur = row.sugg_aur;
        }
        out.aur_change = sub(out.sugg_aur, out.curr_aur);
        out.aur_change_pct = pct_change(out.sugg_aur, out.curr_aur);
    }

    /// Store-weighted mode of the article's in-market prices across zones.
    fn current_mcp(&self, out: &mut AnnotatedScope, article: &article::Model) {
        let weighted: Vec<_> = self
            .index
            .current_prices_for(&article.pln)
            .iter()
            .filter_map(|p| Some((*p, self.store_count(p.zone_id)?)))
            .collect();

        out.curr_mcp_sur = weighted_mode(weighted.iter().map(|(p, n)| (p.price, *n)));
        out.curr_mcp_tiered_multiple = weighted_mode(
            weighted
                .iter()
                .filter_map(|(p, n)| Some((p.tiered_multiple?, *n))),
        );
        out.curr_mcp_tiered_price = weighted_mode(
            weighted
                .iter()
                .filter_map(|(p, n)| Some((p.tiered_price?, *n))),
        );
    }

    /// Store-weighted mode of the suggested prices over the scope's zones.
    fn planned_mcp(&self, out: &mut AnnotatedScope, zone_rows: &[&AnnotatedZoneDetail]) {
        let weighted: Vec<_> = zone_rows
            .iter()
            .filter_map(|row| Some((*row, self.store_count(row.zone_id())?)))
            .collect();

        out.planned_mcp_sur = weighted_mode(
            weighted
                .iter()
                .filter_map(|(row, n)| Some((row.suggested_price?, *n))),
        );
        out.planned_mcp_tiered_multiple = weighted_mode(
            weighted
                .iter()
                .filter_map(|(row, n)| Some((row.suggested_tiered_multiple?, *n))),
        );
        out.planned_mcp_tiered_price = weighted_mode(
            weighted
                .iter()
                .filter_map(|(row, n)| Some((row.suggested_tiered_price?, *n))),
        );
    }

    fn store_count(&self, zone_id: i32) -> Option<i64> {
        self.index.zone(zone_id).map(|z| i64::from(z.store_count))
    }
}
