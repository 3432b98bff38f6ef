//! The opaque table-storage collaborator and the dense store that holds
//! one handle per registered table.

use crate::id::TableId;

/// A per-table-id handle. Both operations are pure functions of the
/// table's current state plus the input bytes; no invariants beyond that
/// are enforced by this crate. How a table parses its request/delta bytes
/// or represents its values is entirely up to the implementation; this
/// core never looks inside the payload.
pub trait ServerTable: Send {
    /// Apply a delta (e.g. a gradient) to the table in place.
    fn process_add(&mut self, delta: &[u8]);

    /// Serve a read request described by `request`, appending the result
    /// bytes to `out`.
    fn process_get(&mut self, request: &[u8], out: &mut Vec<u8>);
}

/// Dense id -> table mapping. Ids are issued monotonically starting at 0
/// by [`TableStore::register`]; no table is ever removed.
#[derive(Default)]
pub struct TableStore {
    tables: Vec<Box<dyn ServerTable>>,
}

impl TableStore {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Registers a new table, returning the id it was assigned.
    pub fn register(&mut self, table: Box<dyn ServerTable>) -> TableId {
        let id = TableId(self.tables.len());
        self.tables.push(table);
        id
    }

    /// Looks up a table by id. Panics if `id` is out of range; an invalid
    /// table id is a programmer error, not something to recover from.
    pub fn get_mut(&mut self, id: TableId) -> &mut dyn ServerTable {
        match self.tables.get_mut(id.0) {
            Some(table) => table.as_mut(),
            None => panic!(
                "invalid table id {} (store has {} tables)",
                id,
                self.tables.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A minimal table used only to exercise `TableStore`'s bookkeeping:
    /// values add, reads echo the running sum.
    struct SumTable {
        sum: i64,
    }

    impl ServerTable for SumTable {
        fn process_add(&mut self, delta: &[u8]) {
            let delta = i64::from_le_bytes(delta.try_into().unwrap());
            self.sum += delta;
        }

        fn process_get(&mut self, _request: &[u8], out: &mut Vec<u8>) {
            out.extend_from_slice(&self.sum.to_le_bytes());
        }
    }

    #[test]
    fn registration_is_monotonic_and_dense() {
        let mut store = TableStore::new();
        let id0 = store.register(Box::new(SumTable { sum: 0 }));
        let id1 = store.register(Box::new(SumTable { sum: 10 }));
        assert_eq!(id0, TableId(0));
        assert_eq!(id1, TableId(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn lookup_returns_the_registered_handle() {
        let mut store = TableStore::new();
        let id = store.register(Box::new(SumTable { sum: 42 }));
        let mut out = Vec::new();
        store.get_mut(id).process_get(&[], &mut out);
        assert_eq!(i64::from_le_bytes(out.try_into().unwrap()), 42);
    }

    #[test]
    #[should_panic(expected = "invalid table id")]
    fn invalid_table_id_is_fatal() {
        let mut store = TableStore::new();
        store.get_mut(TableId(0));
    }
}
