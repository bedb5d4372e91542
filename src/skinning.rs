use serde::{Deserialize, Serialize};

/// Fixed influence width used by the skinning data this crate operates on.
pub const MAX_INFLUENCES: usize = 4;

// ─── Per-vertex weighted influences ───────────────────────────────────────────

/// Weighted bone influences for a single vertex: exactly four
/// `(bone index, weight)` lanes.
///
/// Unused lanes carry the zero-weight filler `(0, 0.0)`. Weights are
/// non-negative and are **not** required to sum to 1; source data may arrive
/// unnormalized and this crate never renormalizes, it only conserves sums
/// across merges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VertexWeights {
    pub indices: [u16; MAX_INFLUENCES],
    pub weights: [f32; MAX_INFLUENCES],
}

impl VertexWeights {
    /// Builds a vertex influence set from four `(index, weight)` pairs.
    pub fn from_pairs(pairs: [(u16, f32); MAX_INFLUENCES]) -> Self {
        let mut out = Self::default();
        for (lane, (index, weight)) in pairs.into_iter().enumerate() {
            out.indices[lane] = index;
            out.weights[lane] = weight;
        }
        out
    }

    /// Iterates over the four `(index, weight)` lanes in order.
    pub fn lanes(&self) -> impl Iterator<Item = (u16, f32)> + '_ {
        self.indices.iter().copied().zip(self.weights.iter().copied())
    }

    /// Sum of all four lane weights, filler lanes included.
    pub fn total_weight(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Weight-merge step of a bone removal.
    ///
    /// Redirects every lane whose index equals `from` to `to`, then groups
    /// lanes by (possibly redirected) index and sums weights within each
    /// group. Groups keep the order in which their index first appears. The
    /// result is padded back out to four lanes with `(0, 0.0)` filler, and
    /// capped at four lanes should grouping ever produce more.
    ///
    /// The redirected bone's weight is redistributed, never dropped, so
    /// `total_weight` is conserved.
    ///
    /// Indices are compared against the *pre-shift* bone list; callers must
    /// run this before [`VertexWeights::shifted_down_after`].
    pub fn merged(&self, from: u16, to: u16) -> Self {
        let mut groups: Vec<(u16, f32)> = Vec::with_capacity(MAX_INFLUENCES);
        for (index, weight) in self.lanes() {
            let index = if index == from { to } else { index };
            match groups.iter_mut().find(|(grouped, _)| *grouped == index) {
                Some((_, sum)) => *sum += weight,
                None => groups.push((index, weight)),
            }
        }

        let mut out = Self::default();
        for (lane, (index, weight)) in groups.into_iter().take(MAX_INFLUENCES).enumerate() {
            out.indices[lane] = index;
            out.weights[lane] = weight;
        }
        out
    }

    /// Index-shift step of a bone removal: closes the gap left by deleting
    /// bone-list slot `removed` by decrementing every lane index strictly
    /// greater than it. Weights are untouched.
    pub fn shifted_down_after(&self, removed: u16) -> Self {
        let mut out = *self;
        for index in &mut out.indices {
            if *index > removed {
                *index -= 1;
            }
        }
        out
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
