//! Skinned-mesh bone reduction core.
//!
//! Removes a single bone from a skinned mesh's bone list while preserving
//! the mesh's deformation as closely as possible. The removed bone's
//! per-vertex influence is either folded into another bone already in the
//! list (merge-and-remove) or its slot is rebound to a bone outside the list
//! (reassign). Vertex influences use the fixed four-lane encoding; weight
//! totals are conserved across merges and never renormalized.
//!
//! The host owns scene traversal, bone selection and asset persistence; this
//! crate is a pure transform from one (mesh, bone list, bind poses) triple to
//! a new one.

pub mod error;
pub mod mesh;
pub mod reduce;
pub mod report;
pub mod skeleton;
pub mod skinning;

pub use error::ReduceError;
pub use mesh::SkinnedMesh;
pub use reduce::{
    ReduceMode, Reduction, SkinBinding, collect_skin_bones, reduce_batch, reduce_single,
};
pub use report::{BatchReport, BindingOutcome, output_path_with_suffix, write_batch_summary};
pub use skeleton::{BoneId, Skeleton, index_of, nearest_remaining_ancestor};
pub use skinning::{MAX_INFLUENCES, VertexWeights};
