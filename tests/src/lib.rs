//! Shared helpers for the end-to-end tests.

use std::sync::Once;

use geostat_tables::TableId;

static LOGGER: Once = Once::new();

/// Route `log` output through env_logger once per test binary.
pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// The built-in CSV text for `id`, for tests that write tables to disk.
pub fn embedded_csv(id: TableId) -> String {
    use geostat_tables::{EmbeddedTables, TableResolver};
    match EmbeddedTables.read(id) {
        Ok(text) => text,
        Err(e) => panic!("embedded table {id} unreadable: {e}"),
    }
}
