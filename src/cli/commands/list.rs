use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::load_places_with_inventory;
use crate::errors::AppResult;
use crate::models::inventory::InventoryStatus;
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::List { unresolved } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    let rows = load_places_with_inventory(&pool.conn)?;

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("NAME", 24),
        Column::new("LOCATION", 24),
        Column::new("ADDRESS", 36),
        Column::new("STATUS", 10),
        Column::new("PRICE", 8),
        Column::new("STOCK", 6),
    ]);

    let mut counts = [0usize; 3];
    for (place, inv) in &rows {
        let coords = place.coordinates();
        if *unresolved && !coords.is_unresolved() {
            continue;
        }

        let location = if coords.is_unresolved() {
            "no location".to_string()
        } else {
            format!("{:.7}, {:.7}", coords.lat, coords.lng)
        };
        let status = inv.as_ref().map(|i| i.status).unwrap_or_default();
        counts[match status {
            InventoryStatus::Available => 0,
            InventoryStatus::SoldOut => 1,
            InventoryStatus::Unknown => 2,
        }] += 1;

        table.add_row(vec![
            place.id.to_string(),
            place.name.clone(),
            location,
            place.address.clone(),
            status.label().to_string(),
            inv.as_ref().map(|i| i.price.to_string()).unwrap_or_default(),
            inv.as_ref()
                .and_then(|i| i.stock_count)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "--".to_string()),
        ]);
    }

    if table.rows.is_empty() {
        println!("No places stored.");
        return Ok(());
    }

    print!("{}", table.render());
    println!();
    println!(
        "{}{} available{}  {}{} sold out{}  {}{} unknown{}",
        color_for_status(InventoryStatus::Available),
        counts[0],
        RESET,
        color_for_status(InventoryStatus::SoldOut),
        counts[1],
        RESET,
        color_for_status(InventoryStatus::Unknown),
        counts[2],
        RESET,
    );

    Ok(())
}
