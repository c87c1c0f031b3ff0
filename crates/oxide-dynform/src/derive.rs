//! Schemas derived from the value store.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::schema::Schema;
use crate::value::{ValueStore, Values};

/// A schema that is a pure function of the value store.
///
/// The schema is rebuilt only when the store's revision moved since the last
/// build; otherwise the same `Arc` is handed out, so a form receiving it skips
/// its re-render.
pub struct DerivedSchema {
    build: Box<dyn Fn(&Values) -> Schema>,
    cached: Option<(u64, Arc<Schema>)>,
}

impl DerivedSchema {
    /// Creates a derived schema from its build function.
    pub fn new(build: impl Fn(&Values) -> Schema + 'static) -> Self {
        Self {
            build: Box::new(build),
            cached: None,
        }
    }

    /// Returns the schema for the store's current values.
    pub fn current(&mut self, store: &ValueStore) -> Arc<Schema> {
        match &self.cached {
            Some((revision, schema)) if *revision == store.revision() => Arc::clone(schema),
            _ => {
                debug!(revision = store.revision(), "rebuilding schema");
                let schema = Arc::new((self.build)(store.values()));
                self.cached = Some((store.revision(), Arc::clone(&schema)));
                schema
            }
        }
    }

    /// Forgets the cached schema.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl fmt::Debug for DerivedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedSchema")
            .field("revision", &self.cached.as_ref().map(|(r, _)| *r))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting() -> (DerivedSchema, Rc<Cell<u32>>) {
        let builds = Rc::new(Cell::new(0));
        let seen = Rc::clone(&builds);
        let derived = DerivedSchema::new(move |values| {
            seen.set(seen.get() + 1);
            let show = values.get_str("mode") == Some("advanced");
            Schema::new(vec![
                FieldSpec::new("mode", "Mode"),
                FieldSpec::new("extra", "Extra").visible(show),
            ])
            .unwrap_or_default()
        });
        (derived, builds)
    }

    #[test]
    fn test_same_revision_same_arc() {
        let (mut derived, builds) = counting();
        let store = ValueStore::new(Values::new());

        let a = derived.current(&store);
        let b = derived.current(&store);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn test_store_change_rebuilds() {
        let (mut derived, builds) = counting();
        let mut store = ValueStore::new(Values::new());

        let before = derived.current(&store);
        assert!(before.visible_field("extra").is_none());

        store.set("mode", "advanced");
        let after = derived.current(&store);
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(after.visible_field("extra").is_some());
        assert_eq!(builds.get(), 2);

        derived.invalidate();
        derived.current(&store);
        assert_eq!(builds.get(), 3);
    }
}
