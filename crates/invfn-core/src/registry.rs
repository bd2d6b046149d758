//! Inverse dispatch: direct registrations plus the structural rules.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::function::{Function, FunctionId};
use crate::invertible::{Composed, Invertible, Mapped};
use crate::no_inverse::NoInverse;

type Table = HashMap<FunctionId, Invertible>;

/// Open-world table of declared inverses.
///
/// Writes are serialised behind a lock and publish a fresh snapshot; readers
/// only clone the current snapshot and never block one another during
/// resolution. Registrations are expected, not verified, to be symmetric:
/// declaring `g` as the inverse of `f` says nothing about the inverse of `g`
/// unless it is registered too (see [`InverseRegistry::register_pair`]).
pub struct InverseRegistry {
    table: RwLock<Arc<Table>>,
}

impl InverseRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Arc::new(Table::new())),
        }
    }

    /// Declares `inverse` as the inverse of `function`.
    ///
    /// A second registration for the same identifier replaces the first and
    /// the replaced entry is returned.
    pub fn register(
        &self,
        function: &Function,
        inverse: impl Into<Invertible>,
    ) -> Option<Invertible> {
        let inverse = inverse.into();
        let mut guard = self.table.write();
        let mut next = Table::clone(&guard);
        let previous = next.insert(function.id().clone(), inverse.clone());
        *guard = Arc::new(next);
        drop(guard);

        match &previous {
            Some(old) if *old != inverse => warn!(
                function = %function,
                previous = %old,
                replacement = %inverse,
                "inverse registration replaced"
            ),
            _ => debug!(function = %function, inverse = %inverse, "registered inverse"),
        }
        previous
    }

    /// Declares `f` and `g` as mutual inverses.
    pub fn register_pair(&self, f: &Function, g: &Function) {
        self.register(f, g);
        if f != g {
            self.register(g, f);
        }
    }

    /// Removes the registration for `id`, returning it if present.
    pub fn unregister(&self, id: &FunctionId) -> Option<Invertible> {
        let mut guard = self.table.write();
        if !guard.contains_key(id) {
            return None;
        }
        let mut next = Table::clone(&guard);
        let removed = next.remove(id);
        *guard = Arc::new(next);
        debug!(function = %id, "removed inverse registration");
        removed
    }

    /// Returns the directly registered inverse for `id`, without structural rules.
    pub fn lookup(&self, id: &FunctionId) -> Option<Invertible> {
        self.snapshot().get(id).cloned()
    }

    /// Returns `true` if `id` has a direct registration.
    pub fn contains(&self, id: &FunctionId) -> bool {
        self.snapshot().contains_key(id)
    }

    /// Number of direct registrations.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns `true` when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Registered identifiers in sorted order.
    pub fn registered_ids(&self) -> Vec<FunctionId> {
        let mut ids: Vec<_> = self.snapshot().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Resolves the inverse of `f`.
    ///
    /// Override pairs swap, compositions reverse and invert every stage,
    /// mapped callables lift the inverse of their inner callable, and plain
    /// functions are looked up directly. Any missing constituent makes the
    /// whole value resolve to [`NoInverse`] wrapping `f`.
    pub fn resolve(&self, f: &Invertible) -> Result<Invertible, NoInverse> {
        let table = self.snapshot();
        let resolved = resolve_in(&table, f);
        trace!(function = %f, found = resolved.is_ok(), "resolved inverse");
        resolved
    }

    fn snapshot(&self) -> Arc<Table> {
        Arc::clone(&self.table.read())
    }
}

fn resolve_in(table: &Table, f: &Invertible) -> Result<Invertible, NoInverse> {
    match f {
        Invertible::Override(pair) => Ok(Invertible::Override(pair.swapped())),
        Invertible::Composed(composed) => {
            let mut inverses = Vec::with_capacity(composed.stages().len());
            for stage in composed.stages().iter().rev() {
                match resolve_in(table, stage) {
                    Ok(inverse) => inverses.push(inverse),
                    Err(missing) => {
                        debug!(stage = %missing.original(), chain = %f, "composition stage has no inverse");
                        return Err(NoInverse::new(f.clone()));
                    }
                }
            }
            Ok(Invertible::Composed(Composed::from_checked(inverses)))
        }
        Invertible::Mapped(mapped) => resolve_in(table, mapped.inner())
            .map(|inverse| Invertible::Mapped(Mapped::new(inverse)))
            .map_err(|_| NoInverse::new(f.clone())),
        Invertible::Function(function) => table
            .get(function.id())
            .cloned()
            .ok_or_else(|| NoInverse::new(f.clone())),
    }
}

impl Default for InverseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InverseRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InverseRegistry")
            .field("registered", &self.registered_ids())
            .finish()
    }
}

static GLOBAL: OnceLock<InverseRegistry> = OnceLock::new();

/// Process-wide registry, empty until something registers into it.
pub fn global() -> &'static InverseRegistry {
    GLOBAL.get_or_init(InverseRegistry::new)
}

/// Resolves the inverse of `f` against the process-wide registry.
pub fn inverse(f: &Invertible) -> Result<Invertible, NoInverse> {
    global().resolve(f)
}

/// Registers an inverse in the process-wide registry.
pub fn register(function: &Function, inverse: impl Into<Invertible>) -> Option<Invertible> {
    global().register(function, inverse)
}

/// Registers a mutual pair in the process-wide registry.
pub fn register_pair(f: &Function, g: &Function) {
    global().register_pair(f, g)
}
