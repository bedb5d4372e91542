use std::collections::HashSet;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ReduceError;
use crate::mesh::SkinnedMesh;
use crate::skeleton::{BoneId, Skeleton, index_of};

// ─── Skin bindings ────────────────────────────────────────────────────────────

/// One renderer's skinning state: its mesh, the bone list whose order is the
/// authoritative index space for the mesh's influence data, and the
/// renderer's local-to-world transform.
///
/// After a successful reduction the host must swap the whole triple
/// atomically; swapping the mesh without the bone list (or vice versa) leaves
/// influence indices pointing at the wrong bones.
#[derive(Debug, Clone)]
pub struct SkinBinding {
    pub mesh: SkinnedMesh,
    pub bones: Vec<BoneId>,
    pub local_to_world: Matrix4<f32>,
}

/// Distinct union of all bindings' bone lists, in first-seen order. Hosts use
/// this to populate bone choices for a reduction over several renderers.
pub fn collect_skin_bones(bindings: &[SkinBinding]) -> Vec<BoneId> {
    let mut seen = HashSet::new();
    let mut bones = Vec::new();
    for binding in bindings {
        for &bone in &binding.bones {
            if seen.insert(bone) {
                bones.push(bone);
            }
        }
    }
    bones
}

// ─── Reduction outcome ────────────────────────────────────────────────────────

/// Which strategy a reduction applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReduceMode {
    /// The merge target was absent from the bone list: the target's slot was
    /// rebound to the merge target in place, keeping the list length.
    Reassigned,
    /// The merge target already occupied another slot: the target slot was
    /// deleted and its vertex weight folded into the merge target's slot.
    MergedAndRemoved,
    /// Empty bone list or empty vertex data: inputs returned as-is.
    Unchanged,
}

/// Result of one renderer's reduction: the new mesh (influences + bind
/// poses), the new bone list, and which mode ran. Inputs are never mutated.
#[derive(Debug, Clone)]
pub struct Reduction {
    pub mesh: SkinnedMesh,
    pub bones: Vec<BoneId>,
    pub mode: ReduceMode,
}

// ─── Single-renderer reduction ────────────────────────────────────────────────

/// Removes `target` from one renderer's skinning data, folding its influence
/// into `merge_target`.
///
/// Validation runs before any array is rewritten:
/// - `target == merge_target` is rejected as
///   [`ReduceError::AmbiguousMergeTarget`] (it would delete a slot and
///   redirect weights into it at once).
/// - a `target` absent from the binding's bone list yields
///   [`ReduceError::BoneNotFound`]; batch callers skip that renderer.
/// - an empty bone list or empty vertex data is a no-op, not a failure.
///
/// With `merge_target` absent from the list the reduction reassigns
/// (Mode [`ReduceMode::Reassigned`]); with it present the target slot is
/// merged away (Mode [`ReduceMode::MergedAndRemoved`]).
pub fn reduce_single(
    skeleton: &Skeleton,
    binding: &SkinBinding,
    target: BoneId,
    merge_target: BoneId,
) -> Result<Reduction, ReduceError> {
    if target == merge_target {
        return Err(ReduceError::AmbiguousMergeTarget(display_name(
            skeleton, target,
        )));
    }

    if binding.bones.is_empty() || binding.mesh.vertex_weights.is_empty() {
        return Ok(Reduction {
            mesh: binding.mesh.clone(),
            bones: binding.bones.clone(),
            mode: ReduceMode::Unchanged,
        });
    }

    let Some(target_index) = index_of(&binding.bones, target) else {
        return Err(ReduceError::BoneNotFound(display_name(skeleton, target)));
    };

    match index_of(&binding.bones, merge_target) {
        None => {
            debug!(
                bone = %display_name(skeleton, target),
                merge_into = %display_name(skeleton, merge_target),
                "merge target not in bone list, reassigning slot"
            );
            Ok(reassign(skeleton, binding, target, merge_target, target_index))
        }
        Some(merge_index) => {
            debug!(
                bone = %display_name(skeleton, target),
                merge_into = %display_name(skeleton, merge_target),
                "merging weights and removing bone slot"
            );
            Ok(merge_and_remove(binding, target_index, merge_index))
        }
    }
}

/// Mode A: the target slot keeps its index but now represents the merge
/// target. The slot's bind pose is recomputed as if the merge target had
/// always been bound at the renderer's current world pose:
/// `inverse(merge_target.world) * binding.local_to_world`. Vertex weights are
/// untouched. When the merge target's current world transform differs from
/// its original bind-time pose the mesh may deform differently; that
/// approximation is accepted, not corrected.
fn reassign(
    skeleton: &Skeleton,
    binding: &SkinBinding,
    target: BoneId,
    merge_target: BoneId,
    target_index: usize,
) -> Reduction {
    let bones = binding
        .bones
        .iter()
        .map(|&bone| if bone == target { merge_target } else { bone })
        .collect();

    let bind_pose = skeleton
        .world_transform(merge_target)
        .and_then(|world| world.try_inverse())
        .map(|inverse| inverse * binding.local_to_world)
        .unwrap_or_else(Matrix4::identity);

    let mut mesh = binding.mesh.clone();
    if let Some(slot) = mesh.bind_poses.get_mut(target_index) {
        *slot = bind_pose;
    }

    Reduction {
        mesh,
        bones,
        mode: ReduceMode::Reassigned,
    }
}

/// Mode B: delete the target's bone-list slot and bind pose, and rewrite
/// every vertex in two ordered steps: weight merge first (against pre-shift
/// indices), index shift second.
fn merge_and_remove(binding: &SkinBinding, target_index: usize, merge_index: usize) -> Reduction {
    let bones = binding
        .bones
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != target_index)
        .map(|(_, &bone)| bone)
        .collect();

    let from = target_index as u16;
    let to = merge_index as u16;
    let vertex_weights = binding
        .mesh
        .vertex_weights
        .iter()
        .map(|vertex| vertex.merged(from, to).shifted_down_after(from))
        .collect();

    let bind_poses = binding
        .mesh
        .bind_poses
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != target_index)
        .map(|(_, &pose)| pose)
        .collect();

    Reduction {
        mesh: SkinnedMesh::new(vertex_weights, bind_poses),
        bones,
        mode: ReduceMode::MergedAndRemoved,
    }
}

// ─── Batch reduction ──────────────────────────────────────────────────────────

/// Applies [`reduce_single`] to every binding, collecting per-renderer
/// results. A failed renderer is reported through its own `Err` and never
/// aborts the rest of the batch; bindings whose bone list does not contain
/// the target are simply skipped this way.
pub fn reduce_batch(
    skeleton: &Skeleton,
    bindings: &[SkinBinding],
    target: BoneId,
    merge_target: BoneId,
) -> Vec<Result<Reduction, ReduceError>> {
    bindings
        .iter()
        .enumerate()
        .map(|(index, binding)| {
            let result = reduce_single(skeleton, binding, target, merge_target);
            if let Err(error) = &result {
                warn!(binding = index, %error, "skipping renderer");
            }
            result
        })
        .collect()
}

fn display_name(skeleton: &Skeleton, bone: BoneId) -> String {
    skeleton.name(bone).unwrap_or("<unknown bone>").to_string()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
