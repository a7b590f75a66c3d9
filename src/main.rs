use catering_costing::{
    config::{
        catalog::{catalog_is_empty, load_catalog_seed, seed_catalog},
        database::{create_connection, create_tables, ensure_sqlite_directory},
        settings::AppSettings,
    },
    core::{
        catalog::Catalog,
        comparison::compare_suppliers,
        costing::calculate_recipe_cost,
        recipe::list_recipes,
        report::{format_comparison_table, format_cost_summary},
    },
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Settings
    let settings = AppSettings::from_env()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!(tenant_id = ?settings.tenant_id, "Loaded settings");

    // 4. Database
    ensure_sqlite_directory(&settings.database_url)?;
    let db = create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db).await?;

    // 5. Seed an empty store from the catalog file
    if catalog_is_empty(&db).await? {
        if settings.catalog_path.exists() {
            let seed = load_catalog_seed(&settings.catalog_path)?;
            seed_catalog(&db, &seed)
                .await
                .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;
        } else {
            warn!(
                "Catalog is empty and no seed file found at {}",
                settings.catalog_path.display()
            );
        }
    }

    // 6. Cost every recipe against the catalog view of its own tenant
    for recipe in list_recipes(&db, settings.tenant_id).await? {
        match calculate_recipe_cost(&db, recipe.id).await {
            Ok(Some(summary)) => println!("{}", format_cost_summary(&summary)),
            Ok(None) => {}
            Err(e) => warn!(recipe_id = recipe.id, "Skipping recipe: {}", e),
        }
    }

    // 7. Compare suppliers in the configured tenant's view
    let catalog = Catalog::load(&db, settings.tenant_id).await?;

    for article in catalog.neutral_articles_by_name() {
        println!("{} ({})", article.name, article.base_unit.symbol());
        println!("{}", format_comparison_table(&compare_suppliers(&catalog, article.id)));
    }

    Ok(())
}
