//! Parent/child index derived from the declarative orbit data
//!
//! Built once per system load. Everything that needs orbital relationships
//! (sibling sweeps, profile framing, per-frame positions) asks this index.

use std::collections::HashMap;

use crate::object::CelestialObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    InPath,
    Done,
}

/// Forest of objects keyed by their index in the system's object list
#[derive(Debug, Clone, Default)]
pub struct SystemHierarchy {
    index: HashMap<String, usize>,
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    depth_first: Vec<usize>,
    depth: Vec<usize>,
}

impl SystemHierarchy {
    pub fn build(objects: &[CelestialObject]) -> Self {
        let n = objects.len();
        let mut index = HashMap::with_capacity(n);
        for (i, object) in objects.iter().enumerate() {
            if index.contains_key(&object.id) {
                log::warn!("duplicate object id '{}', keeping the first definition", object.id);
                continue;
            }
            index.insert(object.id.clone(), i);
        }

        let mut parent: Vec<Option<usize>> = objects
            .iter()
            .enumerate()
            .map(|(i, object)| {
                let parent_id = object.orbit.parent()?;
                match index.get(parent_id) {
                    Some(&p) if p != i => Some(p),
                    Some(_) => {
                        log::warn!("'{}' orbits itself, treating it as a root", object.id);
                        None
                    }
                    None => {
                        log::warn!(
                            "'{}' orbits unknown parent '{}', treating it as a root",
                            object.id,
                            parent_id
                        );
                        None
                    }
                }
            })
            .collect();

        break_cycles(objects, &mut parent);

        let mut children = vec![Vec::new(); n];
        let mut roots = Vec::new();
        for (i, p) in parent.iter().enumerate() {
            match p {
                Some(p) => children[*p].push(i),
                None => roots.push(i),
            }
        }
        for siblings in &mut children {
            siblings.sort_by(|&a, &b| {
                objects[a]
                    .orbit
                    .radial_key()
                    .total_cmp(&objects[b].orbit.radial_key())
                    .then(a.cmp(&b))
            });
        }

        let mut depth_first = Vec::with_capacity(n);
        let mut depth = vec![0; n];
        let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&r| (r, 0)).collect();
        while let Some((node, level)) = stack.pop() {
            depth[node] = level;
            depth_first.push(node);
            for &child in children[node].iter().rev() {
                stack.push((child, level + 1));
            }
        }

        Self {
            index,
            parent,
            children,
            roots,
            depth_first,
            depth,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parent.get(node).copied().flatten()
    }

    /// Children ordered by semi-major axis (belts by inner radius)
    pub fn children(&self, node: usize) -> &[usize] {
        self.children.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Every node, parents before their children
    pub fn depth_first(&self) -> &[usize] {
        &self.depth_first
    }

    pub fn depth(&self, node: usize) -> usize {
        self.depth.get(node).copied().unwrap_or(0)
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.parent(node), move |&p| self.parent(p))
    }
}

/// Demote one member of every parent cycle to a root
fn break_cycles(objects: &[CelestialObject], parent: &mut [Option<usize>]) {
    let mut visit = vec![Visit::Pending; parent.len()];
    for start in 0..parent.len() {
        let mut path: Vec<usize> = Vec::new();
        let mut current = Some(start);
        while let Some(node) = current {
            match visit[node] {
                Visit::Done => break,
                Visit::InPath => {
                    if let Some(&last) = path.last() {
                        log::warn!(
                            "orbit cycle through '{}', treating '{}' as a root",
                            objects[node].id,
                            objects[last].id
                        );
                        parent[last] = None;
                    }
                    break;
                }
                Visit::Pending => {
                    visit[node] = Visit::InPath;
                    path.push(node);
                    current = parent[node];
                }
            }
        }
        for node in path {
            visit[node] = Visit::Done;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objects() -> Vec<CelestialObject> {
        vec![
            CelestialObject::planet("jupiter", "Jupiter", 69_911.0).orbiting("sol", 5.2, 0.0, 0.0),
            CelestialObject::star("sol", "Sun", 695_700.0),
            CelestialObject::moon("callisto", "Callisto", 2_410.0).orbiting("jupiter", 0.0126, 0.0, 0.0),
            CelestialObject::moon("io", "Io", 1_821.0).orbiting("jupiter", 0.0028, 0.0, 0.0),
            CelestialObject::planet("earth", "Earth", 6_371.0).orbiting("sol", 1.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn children_are_sorted_by_semi_major_axis() {
        let hierarchy = SystemHierarchy::build(&objects());
        let sol = hierarchy.index_of("sol").unwrap();
        let jupiter = hierarchy.index_of("jupiter").unwrap();
        assert_eq!(hierarchy.children(sol), &[4, 0]);
        assert_eq!(hierarchy.children(jupiter), &[3, 2]);
        assert_eq!(hierarchy.roots(), &[1]);
    }

    #[test]
    fn depth_first_visits_parents_before_children() {
        let hierarchy = SystemHierarchy::build(&objects());
        let order = hierarchy.depth_first();
        assert_eq!(order.len(), 5);
        for &node in order {
            if let Some(p) = hierarchy.parent(node) {
                let pos = |n| order.iter().position(|&x| x == n).unwrap();
                assert!(pos(p) < pos(node));
            }
        }
        assert_eq!(hierarchy.depth(3), 2);
        assert_eq!(hierarchy.ancestors(3).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let objects = vec![
            CelestialObject::star("sol", "Sun", 695_700.0),
            CelestialObject::planet("lost", "Lost", 1_000.0).orbiting("nowhere", 1.0, 0.0, 0.0),
        ];
        let hierarchy = SystemHierarchy::build(&objects);
        assert_eq!(hierarchy.parent(1), None);
        assert_eq!(hierarchy.roots(), &[0, 1]);
    }

    #[test]
    fn cycles_are_broken() {
        let objects = vec![
            CelestialObject::planet("a", "A", 1_000.0).orbiting("b", 1.0, 0.0, 0.0),
            CelestialObject::planet("b", "B", 1_000.0).orbiting("a", 1.0, 0.0, 0.0),
            CelestialObject::moon("c", "C", 100.0).orbiting("a", 0.1, 0.0, 0.0),
        ];
        let hierarchy = SystemHierarchy::build(&objects);
        assert_eq!(hierarchy.roots().len(), 1);
        assert_eq!(hierarchy.depth_first().len(), 3);
    }
}
