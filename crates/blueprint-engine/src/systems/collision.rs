//! Per-tick AABB collision detection.

use std::collections::HashMap;

use crate::api::types::ObjectId;
use crate::components::hitbox::HitBox;
use crate::components::object::GameObject;

/// A collision partner as it stood when collisions were last computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ObjectId,
    pub group: String,
    pub hitbox: HitBox,
}

impl Contact {
    fn of(object: &GameObject) -> Self {
        Self {
            id: object.id,
            group: object.group.clone(),
            hitbox: object.hitbox,
        }
    }
}

/// Caches which objects overlap. Rebuilt wholesale by every `update_collisions`.
#[derive(Debug, Default)]
pub struct CollisionHandler {
    contacts: HashMap<ObjectId, Vec<Contact>>,
    pairs: usize,
}

impl CollisionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute overlapping pairs among `objects`. O(n²), self-pairs excluded.
    pub fn update_collisions<'a>(&mut self, objects: impl IntoIterator<Item = &'a GameObject>) {
        self.clear();
        let objects: Vec<&GameObject> = objects.into_iter().collect();
        for (i, a) in objects.iter().enumerate() {
            for b in &objects[i + 1..] {
                if a.id == b.id || !a.hitbox.overlaps(&b.hitbox) {
                    continue;
                }
                self.contacts.entry(a.id).or_default().push(Contact::of(b));
                self.contacts.entry(b.id).or_default().push(Contact::of(a));
                self.pairs += 1;
            }
        }
    }

    /// Partners of `id` from the last update. Empty before any update.
    pub fn collisions(&self, id: ObjectId) -> &[Contact] {
        self.contacts.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn collides_with_group(&self, id: ObjectId, group: &str) -> bool {
        self.collisions(id).iter().any(|c| c.group == group)
    }

    /// Number of distinct overlapping pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
        self.pairs = 0;
    }
}
