//! Persistent packing state: canonical polygon interning and the NFP memo.
//!
//! Every polygon the engine touches is canonicalized (translated so its
//! first outer vertex sits at the origin, then interned by content) and
//! from then on identified by a [`CanonicalId`]. Handles are indices into
//! an append-only arena, so they stay valid for the lifetime of the
//! state and are cheap to compare and hash.
//!
//! NFPs are memoized under `(id_a, id_b, rotation_a, rotation_b)`. The
//! cached polygon is translation-normalized: neither operand carries a
//! translation, and callers apply their own on lookup. Both caches grow
//! monotonically; dropping the state is the only way to release them.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use platenest_core::geometry::PolygonWithHoles;

/// Stable handle to a canonical polygon interned in a [`PackingState`].
///
/// Only meaningful for the state that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalId(usize);

/// Memo key for a no-fit polygon: handle identity for the shapes, bit
/// equality for the rotation angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NfpKey {
    a: CanonicalId,
    b: CanonicalId,
    rotation_a: OrderedFloat<f64>,
    rotation_b: OrderedFloat<f64>,
}

impl NfpKey {
    pub fn new(a: CanonicalId, b: CanonicalId, rotation_a: f64, rotation_b: f64) -> Self {
        NfpKey {
            a,
            b,
            rotation_a: OrderedFloat(rotation_a),
            rotation_b: OrderedFloat(rotation_b),
        }
    }
}

/// Reusable state shared across packing calls to amortize NFP work.
///
/// Not safe for concurrent use; callers sharing a state across packing
/// calls must serialize them.
#[derive(Debug, Default)]
pub struct PackingState {
    arena: Vec<PolygonWithHoles>,
    by_content: HashMap<PolygonWithHoles, CanonicalId>,
    nfp_cache: HashMap<NfpKey, PolygonWithHoles>,
}

impl PackingState {
    pub fn new() -> Self {
        PackingState::default()
    }

    /// Returns the canonical handle for a polygon, interning it on first
    /// sight. Structurally equal polygons resolve to the same handle.
    pub fn intern(&mut self, polygon: PolygonWithHoles) -> CanonicalId {
        if let Some(&id) = self.by_content.get(&polygon) {
            return id;
        }
        let id = CanonicalId(self.arena.len());
        self.arena.push(polygon.clone());
        self.by_content.insert(polygon, id);
        id
    }

    /// The interned polygon behind a handle minted by this state.
    pub fn canonical(&self, id: CanonicalId) -> &PolygonWithHoles {
        &self.arena[id.0]
    }

    pub fn cached_nfp(&self, key: &NfpKey) -> Option<&PolygonWithHoles> {
        self.nfp_cache.get(key)
    }

    pub fn insert_nfp(&mut self, key: NfpKey, nfp: PolygonWithHoles) {
        self.nfp_cache.insert(key, nfp);
    }

    /// Number of interned canonical polygons.
    pub fn polygon_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of memoized NFPs.
    pub fn nfp_count(&self) -> usize {
        self.nfp_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platenest_core::exact::Exact;
    use platenest_core::geometry::{Point, Polygon};

    fn square(side: i64) -> PolygonWithHoles {
        let pt = |x: i64, y: i64| Point::new(Exact::from_int(x), Exact::from_int(y));
        PolygonWithHoles::from_outer(Polygon::new(vec![
            pt(0, 0),
            pt(side, 0),
            pt(side, side),
            pt(0, side),
        ]))
    }

    #[test]
    fn interning_is_idempotent() {
        let mut state = PackingState::new();
        let a = state.intern(square(10));
        let b = state.intern(square(10));
        let c = state.intern(square(20));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(state.polygon_count(), 2);
        assert_eq!(state.canonical(a), &square(10));
    }

    #[test]
    fn nfp_keys_distinguish_rotations() {
        let mut state = PackingState::new();
        let a = state.intern(square(10));
        let b = state.intern(square(5));
        state.insert_nfp(NfpKey::new(a, b, 0.0, 0.0), square(15));
        state.insert_nfp(NfpKey::new(a, b, 0.0, 1.5), square(15));
        assert_eq!(state.nfp_count(), 2);
        assert!(state.cached_nfp(&NfpKey::new(a, b, 0.0, 0.0)).is_some());
        assert!(state.cached_nfp(&NfpKey::new(b, a, 0.0, 0.0)).is_none());
    }
}
