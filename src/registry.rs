//! A registry aggregating every tree of resource types known to the system.

use std::iter::FusedIterator;
use std::slice::Iter as SliceIter;

use indexmap::IndexMap;
use thiserror::Error;

use crate::qualifier::Qualifier;
use crate::resource_type::ResourceType;
use crate::tree::Tree;

#[derive(Debug, Error)]
pub enum Error {
    #[error("resource type declared in more than one tree: {0}")]
    DuplicateType(Qualifier),
}

/// Collects trees of resource types and answers lookups across all of them.
///
/// Each qualifier belongs to exactly one tree; the registry keeps an index
/// from qualifier to owning tree and refuses to assemble if two trees claim
/// the same one.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    trees: Vec<Tree>,
    index: IndexMap<Qualifier, usize>,
}

impl Registry {
    pub fn new(trees: Vec<Tree>) -> Result<Self, Error> {
        let mut index = IndexMap::new();

        for (position, tree) in trees.iter().enumerate() {
            for resource_type in tree.types() {
                let qualifier = resource_type.qualifier().clone();
                if index.insert(qualifier, position).is_some() {
                    return Err(Error::DuplicateType(resource_type.qualifier().clone()));
                }
            }
        }

        Ok(Self { trees, index })
    }

    /// Returns the number of resource types across all trees.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn get(&self, qualifier: &str) -> Option<&ResourceType> {
        self.tree_of(qualifier)?.get(qualifier)
    }

    /// Returns the tree that declares the given qualifier.
    pub fn tree_of(&self, qualifier: &str) -> Option<&Tree> {
        self.index
            .get(qualifier)
            .map(|&position| &self.trees[position])
    }

    /// Returns the child qualifiers of the given one, as declared by its
    /// owning tree. Unknown qualifiers have no children.
    pub fn children(&self, qualifier: &str) -> &[Qualifier] {
        self.tree_of(qualifier)
            .map(|tree| tree.children(qualifier))
            .unwrap_or(&[])
    }

    /// Iterates over every resource type, tree by tree, in declaration order.
    pub fn all(&self) -> All<'_> {
        All {
            trees: self.trees.iter(),
            types: [].iter(),
        }
    }

    /// Iterates over the root type of each tree, skipping trees without one.
    pub fn roots(&self) -> Roots<'_> {
        Roots(self.trees.iter())
    }

    /// Iterates over the resource types that carry the given extension
    /// property, whatever its value.
    pub fn with_property<'a>(&'a self, key: &'a str) -> WithProperty<'a> {
        WithProperty {
            inner: self.all(),
            key,
        }
    }
}

pub struct All<'a> {
    trees: SliceIter<'a, Tree>,
    types: SliceIter<'a, ResourceType>,
}

impl<'a> Iterator for All<'a> {
    type Item = &'a ResourceType;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(resource_type) = self.types.next() {
                return Some(resource_type);
            }

            self.types = self.trees.next()?.types().iter();
        }
    }
}

impl<'a> FusedIterator for All<'a> {}

pub struct Roots<'a>(SliceIter<'a, Tree>);

impl<'a> Iterator for Roots<'a> {
    type Item = &'a ResourceType;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.find_map(Tree::root)
    }
}

impl<'a> FusedIterator for Roots<'a> {}

pub struct WithProperty<'a> {
    inner: All<'a>,
    key: &'a str,
}

impl<'a> Iterator for WithProperty<'a> {
    type Item = &'a ResourceType;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let resource_type = self.inner.next()?;

            if resource_type.properties().contains_key(self.key) {
                return Some(resource_type);
            }
        }
    }
}

impl<'a> FusedIterator for WithProperty<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::properties;

    fn q(qualifier: &str) -> Qualifier {
        Qualifier::new(qualifier).unwrap()
    }

    fn ty(qualifier: &str) -> ResourceType {
        ResourceType::builder(qualifier).unwrap().build()
    }

    fn project_tree() -> Tree {
        Tree::builder()
            .resource_type(
                ResourceType::builder("TRK")
                    .unwrap()
                    .property(properties::AVAILABLE_FOR_FILTERS, "true")
                    .build(),
            )
            .resource_type(ty("BRC"))
            .resource_type(ty("DIR"))
            .resource_type(ResourceType::builder("FIL").unwrap().has_source_code().build())
            .relation(q("TRK"), vec![q("BRC"), q("DIR")])
            .relation(q("DIR"), vec![q("FIL")])
            .build()
            .unwrap()
    }

    fn view_tree() -> Tree {
        Tree::builder()
            .resource_type(
                ResourceType::builder("VW")
                    .unwrap()
                    .property(properties::AVAILABLE_FOR_FILTERS, "true")
                    .build(),
            )
            .resource_type(ty("SVW"))
            .relation(q("VW"), vec![q("SVW")])
            .relation(q("SVW"), vec![q("TRK")])
            .build()
            .unwrap()
    }

    fn sample_registry() -> Registry {
        Registry::new(vec![project_tree(), view_tree()]).unwrap()
    }

    #[test]
    fn lookup() {
        let registry = sample_registry();

        assert_eq!(6, registry.len());
        assert!(!registry.is_empty());
        assert_eq!(2, registry.trees().len());

        assert_eq!("FIL", registry.get("FIL").unwrap().qualifier().as_str());
        assert!(registry.get("FIL").unwrap().has_source_code());
        assert_eq!(None, registry.get("neverSeen"));

        let tree = registry.tree_of("SVW").unwrap();
        assert_eq!("VW", tree.root().unwrap().qualifier().as_str());
        assert!(registry.tree_of("neverSeen").is_none());
    }

    #[test]
    fn children() {
        let registry = sample_registry();

        assert_eq!(vec![q("BRC"), q("DIR")], registry.children("TRK"));
        assert!(registry.children("FIL").is_empty());
        assert!(registry.children("neverSeen").is_empty());

        // A relation pointing into another tree reads from the tree that
        // declares it.
        assert_eq!(vec![q("TRK")], registry.children("SVW"));
    }

    #[test]
    fn iteration_order() {
        let registry = sample_registry();

        let produced: Vec<_> = registry
            .all()
            .map(|resource_type| resource_type.qualifier().as_str())
            .collect();
        assert_eq!(vec!["TRK", "BRC", "DIR", "FIL", "VW", "SVW"], produced);

        let produced: Vec<_> = registry
            .roots()
            .map(|resource_type| resource_type.qualifier().as_str())
            .collect();
        assert_eq!(vec!["TRK", "VW"], produced);

        let produced: Vec<_> = registry
            .with_property(properties::AVAILABLE_FOR_FILTERS)
            .map(|resource_type| resource_type.qualifier().as_str())
            .collect();
        assert_eq!(vec!["TRK", "VW"], produced);

        assert_eq!(0, registry.with_property("neverSet").count());
    }

    #[test]
    fn duplicate_across_trees_rejected() {
        let second = Tree::builder().resource_type(ty("TRK")).build().unwrap();

        let produced = Registry::new(vec![project_tree(), second]);
        assert!(matches!(produced, Err(Error::DuplicateType(..))));
    }

    #[test]
    fn empty() {
        let registry = Registry::new(Vec::new()).unwrap();

        assert_eq!(0, registry.len());
        assert!(registry.is_empty());
        assert_eq!(None, registry.all().next());
        assert_eq!(None, registry.roots().next());
    }

    #[test]
    fn rootless_trees_are_skipped() {
        let cyclic = Tree::builder()
            .resource_type(ty("GRP"))
            .resource_type(ty("SUB"))
            .relation(q("GRP"), vec![q("SUB")])
            .relation(q("SUB"), vec![q("GRP")])
            .build()
            .unwrap();

        let registry = Registry::new(vec![cyclic, project_tree()]).unwrap();

        let produced: Vec<_> = registry
            .roots()
            .map(|resource_type| resource_type.qualifier().as_str())
            .collect();
        assert_eq!(vec!["TRK"], produced);
    }
}
