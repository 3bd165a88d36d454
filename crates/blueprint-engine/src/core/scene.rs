use crate::api::types::ObjectId;
use crate::components::object::GameObject;

/// Live object storage using a flat Vec.
/// Insertion order is the tick's processing order, so removal keeps it stable.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<GameObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Append an object; it is processed after every existing one.
    pub fn spawn(&mut self, object: GameObject) {
        self.objects.push(object);
    }

    /// Remove an object by ID, preserving the order of the rest.
    pub fn despawn(&mut self, id: ObjectId) -> Option<GameObject> {
        let idx = self.index_of(id)?;
        Some(self.objects.remove(idx))
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.objects.iter_mut()
    }

    pub fn as_slice(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn as_mut_slice(&mut self) -> &mut [GameObject] {
        &mut self.objects
    }

    /// Find the first object in the given group.
    pub fn find_by_group(&self, group: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.group == group)
    }

    pub fn find_all_by_group(&self, group: &str) -> Vec<&GameObject> {
        self.objects.iter().filter(|o| o.group == group).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl FromIterator<GameObject> for Scene {
    fn from_iter<I: IntoIterator<Item = GameObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
