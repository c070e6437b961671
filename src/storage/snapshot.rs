use super::kv::{KeyValueStore, WriteBatch};
use crate::catalog::Catalog;
use crate::error::DbResult;
use crate::session::Session;

/// Key holding the serialized catalog
pub const CATALOG_KEY: &str = "catalog";
/// Key holding the selected database name
pub const SELECTED_DATABASE_KEY: &str = "selected_database";

/// Writes the catalog and the selection under their keys in one batch.
/// With nothing selected the selection key is removed.
pub fn save_state<S: KeyValueStore + ?Sized>(
    store: &mut S,
    catalog: &Catalog,
    session: &Session,
) -> DbResult<()> {
    let json = serde_json::to_string(catalog)?;

    let mut batch = WriteBatch::new();
    batch.set(CATALOG_KEY, &json);
    match session.selected_database() {
        Some(name) => batch.set(SELECTED_DATABASE_KEY, name),
        None => batch.remove(SELECTED_DATABASE_KEY),
    }
    store.apply(batch)?;

    tracing::debug!(
        "Saved snapshot: {} databases, selected {:?}",
        catalog.databases.len(),
        session.selected_database()
    );
    Ok(())
}

/// Reads back what [`save_state`] wrote. Missing keys give an empty catalog
/// and no selection; a selection naming an unknown database is discarded.
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> DbResult<(Catalog, Session)> {
    let catalog: Catalog = match store.get(CATALOG_KEY)? {
        Some(json) => serde_json::from_str(&json)?,
        None => Catalog::new(),
    };

    let session = match store.get(SELECTED_DATABASE_KEY)? {
        Some(name) if catalog.has_database(&name) => Session::with_database(name),
        Some(name) => {
            tracing::warn!("Ignoring saved selection of missing database '{}'", name);
            Session::new()
        }
        None => Session::new(),
    };

    Ok((catalog, session))
}
