//! Trees of resource types: an ordered list of descriptors plus the
//! parent/child relations between their qualifiers.

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::qualifier::Qualifier;
use crate::resource_type::ResourceType;

#[derive(Debug, Error)]
pub enum Error {
    #[error("tree already contains a resource type with qualifier: {0}")]
    DuplicateType(Qualifier),
    #[error("relation declares no children for qualifier: {0}")]
    EmptyRelation(Qualifier),
}

/// One hierarchy of resource types.
///
/// A tree remembers its types in declaration order, maps each parent
/// qualifier to the qualifiers of its children, and knows its root: the first
/// declared type that never appears as a child. Relations are free to name
/// qualifiers declared elsewhere, so a tree can point into another one.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "TreeRepr")]
pub struct Tree {
    types: Vec<ResourceType>,
    relations: IndexMap<Qualifier, Vec<Qualifier>>,
    root: Option<usize>,
}

impl Tree {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the types of this tree, in declaration order.
    pub fn types(&self) -> &[ResourceType] {
        &self.types
    }

    pub fn get(&self, qualifier: &str) -> Option<&ResourceType> {
        self.types
            .iter()
            .find(|resource_type| resource_type.qualifier().as_str() == qualifier)
    }

    pub fn contains(&self, qualifier: &str) -> bool {
        self.get(qualifier).is_some()
    }

    /// Returns the child qualifiers related to the given one, empty if the
    /// qualifier has no relation here.
    pub fn children(&self, qualifier: &str) -> &[Qualifier] {
        self.relations
            .get(qualifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the root type: the first declared type that no relation lists
    /// as a child. A tree where every type is somebody's child has none.
    pub fn root(&self) -> Option<&ResourceType> {
        self.root.map(|index| &self.types[index])
    }

    /// Returns the qualifiers that appear as children but never as parents,
    /// in relation order and without repeats.
    pub fn leaves(&self) -> Vec<&Qualifier> {
        let mut leaves: Vec<&Qualifier> = Vec::new();

        for child in self.relations.values().flatten() {
            if !self.relations.contains_key(child) && !leaves.contains(&child) {
                leaves.push(child);
            }
        }

        leaves
    }
}

/// Assembles a [`Tree`], validating it on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct Builder {
    types: Vec<ResourceType>,
    relations: IndexMap<Qualifier, Vec<Qualifier>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.types.push(resource_type);
        self
    }

    /// Relates a parent qualifier to child qualifiers. Repeated calls for the
    /// same parent accumulate.
    pub fn relation(
        mut self,
        parent: Qualifier,
        children: impl IntoIterator<Item = Qualifier>,
    ) -> Self {
        self.relations.entry(parent).or_default().extend(children);
        self
    }

    /// Validates the accumulated declarations and finalizes the tree.
    ///
    /// Fails if two types share a qualifier, or if a relation ends up with no
    /// children at all.
    pub fn build(self) -> Result<Tree, Error> {
        for (index, resource_type) in self.types.iter().enumerate() {
            if self.types[..index].contains(resource_type) {
                return Err(Error::DuplicateType(resource_type.qualifier().clone()));
            }
        }

        for (parent, children) in &self.relations {
            if children.is_empty() {
                return Err(Error::EmptyRelation(parent.clone()));
            }
        }

        let root = self.types.iter().position(|resource_type| {
            !self
                .relations
                .values()
                .flatten()
                .any(|child| child == resource_type.qualifier())
        });

        Ok(Tree {
            types: self.types,
            relations: self.relations,
            root,
        })
    }
}

/// Intermediate form for deserializing a [`Tree`], funneled through the
/// builder so file-declared trees pass the same validation as code-declared
/// ones.
#[derive(Debug, Deserialize)]
struct TreeRepr {
    #[serde(default)]
    types: Vec<ResourceType>,
    #[serde(default)]
    relations: IndexMap<Qualifier, Vec<Qualifier>>,
}

impl TryFrom<TreeRepr> for Tree {
    type Error = Error;

    fn try_from(repr: TreeRepr) -> Result<Self, Self::Error> {
        let mut builder = Builder::new();

        for resource_type in repr.types {
            builder = builder.resource_type(resource_type);
        }
        for (parent, children) in repr.relations {
            builder = builder.relation(parent, children);
        }

        builder.build()
    }
}
