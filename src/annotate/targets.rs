//! Competitor identity and competitive-index target resolution.

use crate::annotate::fallback::Cascade;
use crate::annotate::snapshot::SnapshotIndex;
use log::trace;
use serde::{Deserialize, Serialize};

/// Sentinel matching every opstudy or every zone.
pub const ALL: &str = "all";

pub const DEFAULT_KVI_CLASS: &str = "non-kvi";
pub const DEFAULT_PROMO_STATUS: &str = "non-promo";

/// Text keys are compared case-insensitively everywhere. Whitespace is
/// significant: `" all"` is not the wildcard.
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

pub fn is_all(value: &str) -> bool {
    normalize(value) == ALL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitorRank {
    Primary,
    Secondary,
}

impl CompetitorRank {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitorRank::Primary => "primary",
            CompetitorRank::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetTable {
    /// `price_index_targets` rows of one scenario
    Scenario(i32),
    /// `kvi_index_targets`
    Global,
}

/// Normalized match key of a target row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetKey {
    pub table: TargetTable,
    pub opstudy: String,
    pub zone: String,
    pub kvi_class: String,
    pub promo_status: String,
    pub competitor_type: String,
    pub rank: String,
}

impl TargetKey {
    pub fn new(
        table: TargetTable,
        opstudy: &str,
        zone: &str,
        kvi_class: &str,
        promo_status: &str,
        competitor_type: &str,
        rank: &str,
    ) -> Self {
        Self {
            table,
            opstudy: normalize(opstudy),
            zone: normalize(zone),
            kvi_class: normalize(kvi_class),
            promo_status: normalize(promo_status),
            competitor_type: normalize(competitor_type),
            rank: normalize(rank),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetBounds {
    pub index_min: Option<i32>,
    pub index_max: Option<i32>,
}

/// Specificity levels, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLevel {
    ScenarioOpstudyZone,
    GlobalOpstudyZone,
    ScenarioOpstudyAllZones,
    GlobalOpstudyAllZones,
    GlobalAll,
}

pub const TARGET_CASCADE: Cascade<TargetLevel> = Cascade::new(&[
    TargetLevel::ScenarioOpstudyZone,
    TargetLevel::GlobalOpstudyZone,
    TargetLevel::ScenarioOpstudyAllZones,
    TargetLevel::GlobalOpstudyAllZones,
    TargetLevel::GlobalAll,
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetitorSource {
    Zone,
    AllZones,
}

pub const COMPETITOR_CASCADE: Cascade<CompetitorSource> =
    Cascade::new(&[CompetitorSource::Zone, CompetitorSource::AllZones]);

/// Where a scope-zone row sits in the target tables.
#[derive(Debug, Clone)]
pub struct TargetContext<'k> {
    pub scenario_id: i32,
    pub opstudy_id: i32,
    pub zone_id: i32,
    pub kvi_class: &'k str,
    pub promo_status: &'k str,
}

impl TargetContext<'_> {
    fn key(&self, level: TargetLevel, competitor: &str, rank: CompetitorRank) -> TargetKey {
        let opstudy = self.opstudy_id.to_string();
        let zone = self.zone_id.to_string();
        let (table, opstudy, zone) = match level {
            TargetLevel::ScenarioOpstudyZone => {
                (TargetTable::Scenario(self.scenario_id), opstudy.as_str(), zone.as_str())
            }
            TargetLevel::GlobalOpstudyZone => {
                (TargetTable::Global, opstudy.as_str(), zone.as_str())
            }
            TargetLevel::ScenarioOpstudyAllZones => {
                (TargetTable::Scenario(self.scenario_id), opstudy.as_str(), ALL)
            }
            TargetLevel::GlobalOpstudyAllZones => (TargetTable::Global, opstudy.as_str(), ALL),
            TargetLevel::GlobalAll => (TargetTable::Global, ALL, ALL),
        };
        TargetKey::new(
            table,
            opstudy,
            zone,
            self.kvi_class,
            self.promo_status,
            competitor,
            rank.as_str(),
        )
    }
}

/// Target range for one competitor rank. Min and max cascade independently:
/// a level whose row lacks `index_max` still supplies `index_min`.
pub fn resolve_target(
    index: &SnapshotIndex<'_>,
    ctx: &TargetContext<'_>,
    competitor: Option<&str>,
    rank: CompetitorRank,
) -> TargetBounds {
    // a missing competitor name matches no target row
    let Some(competitor) = competitor else {
        return TargetBounds::default();
    };

    let lookup = |level: TargetLevel| index.target(&ctx.key(level, competitor, rank));
    let min = TARGET_CASCADE.resolve(|level| lookup(level).and_then(|t| t.index_min));
    let max = TARGET_CASCADE.resolve(|level| lookup(level).and_then(|t| t.index_max));

    trace!(
        "target {} opstudy={} zone={} competitor={}: min from {:?}, max from {:?}",
        rank.as_str(),
        ctx.opstudy_id,
        ctx.zone_id,
        competitor,
        min.map(|(level, _)| level),
        max.map(|(level, _)| level),
    );

    TargetBounds {
        index_min: min.map(|(_, v)| v),
        index_max: max.map(|(_, v)| v),
    }
}

/// Competitor name for an (opstudy, zone): the zone-specific weighting row if
/// it names one, else the all-zones row.
pub fn resolve_competitor(
    index: &SnapshotIndex<'_>,
    opstudy_id: i32,
    zone_id: i32,
    rank: CompetitorRank,
) -> Option<String> {
    let zone_key = zone_id.to_string();
    let weightings = index.competitor_weightings(opstudy_id);

    COMPETITOR_CASCADE.value(|source| {
        let row = weightings.iter().find(|w| match (source, w.zone.as_deref()) {
            (CompetitorSource::Zone, Some(zone)) => zone == zone_key,
            (CompetitorSource::AllZones, Some(zone)) => is_all(zone),
            (_, None) => false,
        })?;
        match rank {
            CompetitorRank::Primary => row.primary_competitor_name.clone(),
            CompetitorRank::Secondary => row.secondary_competitor_name.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::snapshot::PricingSnapshot;
    use crate::storage::entity::{competitor_weighting, kvi_index_target, price_index_target};

    fn weighting(
        id: i32,
        zone: Option<&str>,
        primary: Option<&str>,
        secondary: Option<&str>,
    ) -> competitor_weighting::Model {
        competitor_weighting::Model {
            id,
            opstudy_id: 40,
            zone: zone.map(str::to_string),
            primary_competitor_name: primary.map(str::to_string),
            secondary_competitor_name: secondary.map(str::to_string),
        }
    }

    fn scenario_target(
        id: i32,
        zone: &str,
        rank: &str,
        min: Option<i32>,
        max: Option<i32>,
    ) -> price_index_target::Model {
        price_index_target::Model {
            id,
            scenario_id: 7,
            opstudy_id: 40,
            zone: zone.to_string(),
            primary_secondary: rank.to_string(),
            promo_status: "Non-Promo".to_string(),
            competitor_type: "WALMART".to_string(),
            kvi_class: "KVI".to_string(),
            actual_index: None,
            index_min: min,
            index_max: max,
        }
    }

    fn global_target(
        id: i32,
        opstudy: &str,
        zone: &str,
        min: Option<i32>,
        max: Option<i32>,
    ) -> kvi_index_target::Model {
        kvi_index_target::Model {
            id,
            opstudy: opstudy.to_string(),
            zone: zone.to_string(),
            kvi_class: "kvi".to_string(),
            primary_secondary: "primary".to_string(),
            promo_status: "non-promo".to_string(),
            competitor_type: "walmart".to_string(),
            index_min: min,
            index_max: max,
        }
    }

    fn ctx() -> TargetContext<'static> {
        TargetContext {
            scenario_id: 7,
            opstudy_id: 40,
            zone_id: 3,
            kvi_class: "kvi",
            promo_status: "non-promo",
        }
    }

    #[test]
    fn zone_specific_competitor_wins_over_wildcard() {
        let snapshot = PricingSnapshot {
            competitor_weightings: vec![
                weighting(1, Some("ALL"), Some("Walmart"), Some("Target")),
                weighting(2, Some("3"), Some("Kroger"), None),
            ],
            ..Default::default()
        };
        let index = snapshot.index();

        assert_eq!(
            resolve_competitor(&index, 40, 3, CompetitorRank::Primary).as_deref(),
            Some("Kroger")
        );
        // zone row has no secondary, so the wildcard row answers
        assert_eq!(
            resolve_competitor(&index, 40, 3, CompetitorRank::Secondary).as_deref(),
            Some("Target")
        );
        assert_eq!(
            resolve_competitor(&index, 40, 9, CompetitorRank::Primary).as_deref(),
            Some("Walmart")
        );
        assert_eq!(resolve_competitor(&index, 41, 3, CompetitorRank::Primary), None);
    }

    #[test]
    fn most_specific_target_level_wins() {
        let snapshot = PricingSnapshot {
            price_index_targets: vec![scenario_target(1, "3", "Primary", Some(95), Some(105))],
            kvi_index_targets: vec![global_target(1, "all", "all", Some(80), Some(120))],
            ..Default::default()
        };
        let index = snapshot.index();

        let bounds = resolve_target(&index, &ctx(), Some("Walmart"), CompetitorRank::Primary);
        assert_eq!(
            bounds,
            TargetBounds {
                index_min: Some(95),
                index_max: Some(105)
            }
        );
    }

    #[test]
    fn min_and_max_cascade_independently() {
        let snapshot = PricingSnapshot {
            price_index_targets: vec![scenario_target(1, "all", "primary", Some(97), None)],
            kvi_index_targets: vec![
                global_target(1, "40", "3", None, None),
                global_target(2, "ALL", "All", Some(80), Some(120)),
            ],
            ..Default::default()
        };
        let index = snapshot.index();

        let bounds = resolve_target(&index, &ctx(), Some("walmart"), CompetitorRank::Primary);
        assert_eq!(bounds.index_min, Some(97));
        assert_eq!(bounds.index_max, Some(120));
    }

    #[test]
    fn global_exact_zone_beats_scenario_all_zones() {
        let snapshot = PricingSnapshot {
            price_index_targets: vec![scenario_target(1, "all", "primary", Some(1), Some(2))],
            kvi_index_targets: vec![global_target(1, "40", "3", Some(10), Some(20))],
            ..Default::default()
        };
        let index = snapshot.index();

        let bounds = resolve_target(&index, &ctx(), Some("Walmart"), CompetitorRank::Primary);
        assert_eq!(
            bounds,
            TargetBounds {
                index_min: Some(10),
                index_max: Some(20)
            }
        );
    }

    #[test]
    fn global_opstudy_beats_global_wildcard() {
        let snapshot = PricingSnapshot {
            kvi_index_targets: vec![
                global_target(1, "all", "all", Some(80), Some(120)),
                global_target(2, "40", "All", Some(30), Some(40)),
            ],
            ..Default::default()
        };
        let index = snapshot.index();

        let bounds = resolve_target(&index, &ctx(), Some("Walmart"), CompetitorRank::Primary);
        assert_eq!(
            bounds,
            TargetBounds {
                index_min: Some(30),
                index_max: Some(40)
            }
        );
    }

    #[test]
    fn padded_keys_are_not_wildcards() {
        let snapshot = PricingSnapshot {
            competitor_weightings: vec![weighting(1, Some("ALL "), Some("Walmart"), None)],
            kvi_index_targets: vec![global_target(1, " all", "ALL ", Some(10), Some(20))],
            ..Default::default()
        };
        let index = snapshot.index();

        assert_eq!(resolve_competitor(&index, 40, 3, CompetitorRank::Primary), None);
        assert_eq!(
            resolve_target(&index, &ctx(), Some("Walmart"), CompetitorRank::Primary),
            TargetBounds::default()
        );

        let clean = PricingSnapshot {
            kvi_index_targets: vec![global_target(1, "all", "all", Some(10), Some(20))],
            ..Default::default()
        };
        let index = clean.index();
        assert_eq!(
            resolve_target(&index, &ctx(), Some("walmart "), CompetitorRank::Primary),
            TargetBounds::default()
        );
        assert_eq!(
            resolve_target(&index, &ctx(), Some("WalMart"), CompetitorRank::Primary).index_max,
            Some(20)
        );
    }

    #[test]
    fn other_scenario_and_rank_do_not_match() {
        let mut other = scenario_target(1, "3", "primary", Some(1), Some(2));
        other.scenario_id = 8;
        let snapshot = PricingSnapshot {
            price_index_targets: vec![
                other,
                scenario_target(2, "3", "secondary", Some(3), Some(4)),
            ],
            ..Default::default()
        };
        let index = snapshot.index();

        let bounds = resolve_target(&index, &ctx(), Some("Walmart"), CompetitorRank::Primary);
        assert_eq!(bounds, TargetBounds::default());
    }

    #[test]
    fn missing_competitor_matches_nothing() {
        let snapshot = PricingSnapshot {
            kvi_index_targets: vec![global_target(1, "all", "all", Some(80), Some(120))],
            ..Default::default()
        };
        let index = snapshot.index();
        assert_eq!(
            resolve_target(&index, &ctx(), None, CompetitorRank::Primary),
            TargetBounds::default()
        );
    }
}
