pub mod article;
pub mod competitor_weighting;
pub mod kvi_index_target;
pub mod kvi_promo_status;
pub mod nbob_pair;
pub mod nbob_role;
pub mod price_index_target;
pub mod pricing_cm_planned_price;
pub mod pricing_cost;
pub mod pricing_current_price;
pub mod pricing_planned_price;
pub mod pricing_recommended_price;
pub mod pricing_scenario;
pub mod pricing_scenario_scope;
pub mod scenario_scope_zone_details;
pub mod zone;

pub use article::Entity as Article;
pub use pricing_scenario::Entity as PricingScenario;
pub use pricing_scenario_scope::Entity as PricingScenarioScope;
pub use scenario_scope_zone_details::Entity as ScenarioScopeZoneDetails;
pub use zone::Entity as Zone;
