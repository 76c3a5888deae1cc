use tabled::Table;

use crate::{
    error,
    types::{SearchKind, SearchTableRow},
    warning,
};

/// Searches the catalog and prints the results as a table.
pub async fn search(query: String, kind: SearchKind, limit: u64, offset: u64) {
    let mut client = super::connect_client(false).await;

    let pb = super::spinner("Searching...");
    let result = client.search(&query, kind, limit, offset).await;
    pb.finish_and_clear();

    match result {
        Ok(items) => {
            if items.is_empty() {
                warning!("No {} results for '{}'.", kind, query);
                return;
            }

            let rows: Vec<SearchTableRow> = items
                .into_iter()
                .map(|item| SearchTableRow {
                    id: item.id,
                    name: item.name,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => {
            error!("Search failed: {}", e);
        }
    }
}
