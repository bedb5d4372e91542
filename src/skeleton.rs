use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

// ─── Bone identity ────────────────────────────────────────────────────────────

/// Opaque comparable handle for a bone in a [`Skeleton`].
///
/// Equality is identity: two handles are the same bone only when they were
/// produced by the same `add_bone` call. No ordering property beyond list
/// position is assumed anywhere in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoneId(u32);

impl BoneId {
    /// Arena slot of this bone within its skeleton.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single joint: display name, optional parent, and current world transform.
#[derive(Debug, Clone)]
struct Bone {
    name: String,
    parent: Option<BoneId>,
    world: Matrix4<f32>,
}

// ─── Skeleton arena ───────────────────────────────────────────────────────────

/// Read-only view of a skeletal hierarchy, owned by the host scene graph.
///
/// This crate only reads identities, names, parent links and world
/// transforms; it never mutates the tree.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bone and returns its handle. Parents must be registered
    /// before their children.
    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        parent: Option<BoneId>,
        world: Matrix4<f32>,
    ) -> BoneId {
        let id = BoneId(self.bones.len() as u32);
        self.bones.push(Bone {
            name: name.into(),
            parent,
            world,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Display name of a bone, or `None` for a handle from another skeleton.
    pub fn name(&self, bone: BoneId) -> Option<&str> {
        self.bones.get(bone.index()).map(|b| b.name.as_str())
    }

    /// Parent of a bone; `None` at the root or for an unknown handle.
    pub fn parent(&self, bone: BoneId) -> Option<BoneId> {
        self.bones.get(bone.index()).and_then(|b| b.parent)
    }

    /// Current world transform of a bone.
    pub fn world_transform(&self, bone: BoneId) -> Option<Matrix4<f32>> {
        self.bones.get(bone.index()).map(|b| b.world)
    }
}

// ─── Bone index resolver ──────────────────────────────────────────────────────

/// Position of `bone` in a renderer's bone list, by identity.
///
/// Bone lists may differ between renderers sharing one skeleton visually, so
/// `None` means "not part of this skeleton binding" and the caller must skip
/// that renderer rather than proceed with a stale index.
pub fn index_of(bone_list: &[BoneId], bone: BoneId) -> Option<usize> {
    bone_list.iter().position(|&entry| entry == bone)
}

/// Nearest ancestor of `bone` that is present in `bone_list`.
///
/// Walks the parent chain starting at `bone`'s parent and stops only at the
/// first ancestor *present in the list*; an absent intermediate parent
/// (already removed, or never a skin bone) is walked past. Returns `None`
/// when the chain is exhausted. Used to suggest a default merge target,
/// never required to succeed.
pub fn nearest_remaining_ancestor(
    skeleton: &Skeleton,
    bone: BoneId,
    bone_list: &[BoneId],
) -> Option<BoneId> {
    let mut current = skeleton.parent(bone);
    while let Some(ancestor) = current {
        if bone_list.contains(&ancestor) {
            return Some(ancestor);
        }
        current = skeleton.parent(ancestor);
    }
    None
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    fn chain(names: &[&str]) -> (Skeleton, Vec<BoneId>) {
        let mut skeleton = Skeleton::new();
        let mut ids = Vec::new();
        for (depth, name) in names.iter().enumerate() {
            let parent = if depth == 0 { None } else { Some(ids[depth - 1]) };
            ids.push(skeleton.add_bone(*name, parent, Matrix4::identity()));
        }
        (skeleton, ids)
    }

    #[test]
    fn given_bone_in_list_when_resolving_index_then_position_is_returned() {
        let (_, ids) = chain(&["root", "spine", "chest"]);
        let bone_list = vec![ids[2], ids[0], ids[1]];

        assert_eq!(index_of(&bone_list, ids[1]), Some(2));
        assert_eq!(index_of(&bone_list, ids[0]), Some(1));
    }

    #[test]
    fn given_bone_absent_from_list_when_resolving_index_then_none_is_returned() {
        let (_, ids) = chain(&["root", "spine", "chest"]);
        let bone_list = vec![ids[0], ids[1]];

        assert_eq!(index_of(&bone_list, ids[2]), None);
    }

    #[test]
    fn given_direct_parent_in_list_when_walking_ancestors_then_parent_is_suggested() {
        let (skeleton, ids) = chain(&["root", "spine", "chest"]);
        let bone_list = vec![ids[0], ids[1], ids[2]];

        assert_eq!(
            nearest_remaining_ancestor(&skeleton, ids[2], &bone_list),
            Some(ids[1])
        );
    }

    #[test]
    fn given_absent_intermediate_parent_when_walking_ancestors_then_walk_continues_upward() {
        let (skeleton, ids) = chain(&["root", "spine", "chest", "neck"]);
        // spine and chest are not skin bones of this renderer.
        let bone_list = vec![ids[0], ids[3]];

        assert_eq!(
            nearest_remaining_ancestor(&skeleton, ids[3], &bone_list),
            Some(ids[0])
        );
    }

    #[test]
    fn given_no_listed_ancestor_when_walking_ancestors_then_none_is_returned() {
        let (skeleton, ids) = chain(&["root", "spine", "chest"]);
        let bone_list = vec![ids[2]];

        assert_eq!(nearest_remaining_ancestor(&skeleton, ids[2], &bone_list), None);
        assert_eq!(nearest_remaining_ancestor(&skeleton, ids[0], &bone_list), None);
    }
}
