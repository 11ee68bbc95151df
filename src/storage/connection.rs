use crate::config::StoreConfig;
use crate::storage::entity::{
    article, competitor_weighting, kvi_index_target, kvi_promo_status, nbob_pair, nbob_role,
    price_index_target, pricing_cm_planned_price, pricing_cost, pricing_current_price,
    pricing_planned_price, pricing_recommended_price, pricing_scenario, pricing_scenario_scope,
    scenario_scope_zone_details, zone,
};
use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
    Statement,
};
use std::time::Duration;

/// Composite uniqueness the fact and price tables rely on.
const UNIQUE_INDEXES: &[(&str, &str, &str)] = &[
    ("idx_scopes_scenario_article", "pricing_scenario_scopes", "scenario_id, article_id"),
    ("idx_zone_details_scope_zone", "scenario_scope_zone_details", "scope_id, zone_id"),
    ("idx_current_prices_pln_zone", "pricing_current_prices", "pln, zone_id"),
    ("idx_costs_pln_zone", "pricing_costs", "pln, zone_id"),
    ("idx_recommended_scope_zone", "pricing_recommended_prices", "scope_id, zone_id"),
    ("idx_planned_scope_zone", "pricing_planned_prices", "scope_id, zone_id"),
    ("idx_cm_planned_scope_zone", "pricing_cm_planned_prices", "scope_id, zone_id"),
    (
        "idx_kvi_index_targets_unique",
        "kvi_index_targets",
        "opstudy, zone, kvi_class, promo_status, competitor_type, primary_secondary",
    ),
];

pub async fn establish_connection(config: &StoreConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.to_owned());
    opt.connect_timeout(config.connect_timeout)
        .acquire_timeout(config.connect_timeout)
        .sqlx_logging(config.sql_logging)
        .sqlx_logging_level(log::LevelFilter::Info);

    if config.is_in_memory() {
        // every pooled connection would otherwise get its own empty database
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(30 * 60));
    }

    let db = Database::connect(opt).await?;
    let backend = db.get_database_backend();

    if config.is_sqlite() && !config.is_in_memory() {
        db.execute(Statement::from_string(
            backend,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;
    }

    create_schema(&db).await?;

    info!(
        "Database connection established ({:?}), pricing schema ready.",
        backend
    );

    Ok(db)
}

/// Create every table (parents first) and the composite unique indexes.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, zone::Entity).await?;
    create_table(db, article::Entity).await?;
    create_table(db, pricing_scenario::Entity).await?;
    create_table(db, pricing_scenario_scope::Entity).await?;
    create_table(db, scenario_scope_zone_details::Entity).await?;
    create_table(db, pricing_current_price::Entity).await?;
    create_table(db, pricing_cost::Entity).await?;
    create_table(db, pricing_recommended_price::Entity).await?;
    create_table(db, pricing_planned_price::Entity).await?;
    create_table(db, pricing_cm_planned_price::Entity).await?;
    create_table(db, competitor_weighting::Entity).await?;
    create_table(db, kvi_promo_status::Entity).await?;
    create_table(db, price_index_target::Entity).await?;
    create_table(db, kvi_index_target::Entity).await?;
    create_table(db, nbob_role::Entity).await?;
    create_table(db, nbob_pair::Entity).await?;

    let backend = db.get_database_backend();
    for (name, table, columns) in UNIQUE_INDEXES {
        db.execute(Statement::from_string(
            backend,
            format!("CREATE UNIQUE INDEX IF NOT EXISTS {name} ON {table}({columns});"),
        ))
        .await?;
    }

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let stmt = builder.build(schema.create_table_from_entity(entity).if_not_exists());
    db.execute(stmt).await?;
    Ok(())
}
