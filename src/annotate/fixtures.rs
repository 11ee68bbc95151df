//! Row builders shared by the engine's unit tests.

use crate::annotate::snapshot::PricingSnapshot;
use crate::storage::entity::{
    article, pricing_cm_planned_price, pricing_cost, pricing_current_price, pricing_planned_price,
    pricing_recommended_price, pricing_scenario_scope, scenario_scope_zone_details, zone,
};

pub const SCENARIO: i32 = 7;
pub const OPSTUDY: i32 = 40;

pub fn article(id: i32, pln: &str) -> article::Model {
    article::Model {
        id,
        pln: pln.to_string(),
        article_id: None,
        opstudy_id: OPSTUDY,
        price_family: None,
        description: format!("article {id}"),
        brand: String::new(),
        vendor_name: String::new(),
        uom: "EA".to_string(),
        uom_size: 1.0,
        private_label_ind: None,
        is_basic: true,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn zone(id: i32, store_count: i32) -> zone::Model {
    zone::Model {
        id,
        zone_code: 100 + id,
        zone_description: format!("Zone {id}"),
        zone_group: None,
        order: Some(id),
        store_count,
        corp_or_market_opt: None,
        is_active: true,
    }
}

pub fn scope(id: i32, article_id: i32) -> pricing_scenario_scope::Model {
    pricing_scenario_scope::Model {
        id,
        scenario_id: SCENARIO,
        article_id,
        vendor_funding: None,
        dept_cost_override: None,
        dept_cost_override_date: None,
    }
}

pub fn detail(id: i32, scope_id: i32, zone_id: i32) -> scenario_scope_zone_details::Model {
    scenario_scope_zone_details::Model {
        id,
        scope_id,
        zone_id,
        elasticity: None,
        baseline_base_price_units: None,
        baseline_base_price: None,
        gradient: None,
        curr_gp: None,
        curr_sales: None,
        curr_units: None,
        total_gp: None,
        total_sales: None,
        total_units: None,
        primary_comp_price: None,
        primary_comp_units: None,
        primary_comp_price_api: None,
        primary_comp_units_api: None,
        secondary_comp_price: None,
        secondary_comp_units: None,
        secondary_comp_price_api: None,
        secondary_comp_units_api: None,
        discount_pct: None,
        ppu_violation: false,
        plg_violation: false,
        price_rounding_violation: false,
        zone_violation: false,
        rationale: "-".to_string(),
        created_at: 0,
        updated_at: 0,
    }
}

pub fn current(id: i32, pln: &str, zone_id: i32, price: f64) -> pricing_current_price::Model {
    pricing_current_price::Model {
        id,
        pln: pln.to_string(),
        zone_id,
        from_date: None,
        to_date: None,
        price,
        tiered_multiple: None,
        tiered_price: None,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn cost(id: i32, pln: &str, zone_id: i32) -> pricing_cost::Model {
    pricing_cost::Model {
        id,
        pln: pln.to_string(),
        zone_id,
        curr_base_cost: 1.0,
        curr_final_cost: None,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn recommended(
    id: i32,
    scope_id: i32,
    zone_id: i32,
    price: f64,
) -> pricing_recommended_price::Model {
    pricing_recommended_price::Model {
        id,
        scope_id,
        zone_id,
        pln: String::new(),
        price,
        tiered_multiple: None,
        tiered_price: None,
        units_baseline: None,
        units_forecast: None,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn planned(
    id: i32,
    scope_id: i32,
    zone_id: i32,
    price: Option<f64>,
) -> pricing_planned_price::Model {
    pricing_planned_price::Model {
        id,
        scope_id,
        zone_id,
        pln: String::new(),
        price,
        tiered_multiple: None,
        tiered_price: None,
        zone_differential: None,
        comments: String::new(),
        created_at: 0,
        updated_at: 0,
    }
}

pub fn cm_planned(
    id: i32,
    scope_id: i32,
    zone_id: i32,
    price: Option<f64>,
) -> pricing_cm_planned_price::Model {
    pricing_cm_planned_price::Model {
        id,
        scope_id,
        zone_id,
        pln: String::new(),
        price,
        tiered_multiple: None,
        tiered_price: None,
        zone_differential: None,
        comments: String::new(),
        created_at: 0,
        updated_at: 0,
    }
}

/// One scope (id 1, article "P1") priced in the given zones, with the
/// current, cost and recommended rows the consistency filter requires.
/// `zones` is `(zone_id, store_count, current_price, recommended_price)`.
pub fn priced_scope(zones: &[(i32, i32, f64, f64)]) -> PricingSnapshot {
    let mut snapshot = PricingSnapshot {
        scopes: vec![scope(1, 1)],
        articles: vec![article(1, "P1")],
        ..Default::default()
    };
    for (n, &(zone_id, stores, curr, rec)) in zones.iter().enumerate() {
        let id = n as i32 + 1;
        snapshot.zones.push(zone(zone_id, stores));
        snapshot.zone_details.push(detail(id, 1, zone_id));
        snapshot.current_prices.push(current(id, "P1", zone_id, curr));
        snapshot.costs.push(cost(id, "P1", zone_id));
        snapshot.recommended_prices.push(recommended(id, 1, zone_id, rec));
    }
    snapshot
}
