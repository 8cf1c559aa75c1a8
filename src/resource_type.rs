//! Descriptors for categories of resources, and the builder that assembles
//! them.

use std::hash::{Hash, Hasher};

use serde::Deserialize;

use crate::properties::{self, Properties};
use crate::qualifier::{self, Qualifier};

const ICON_DIR: &str = "/images/q";

/// Assembles a [`ResourceType`] one setting at a time.
///
/// Every method consumes and returns the builder, so construction reads as
/// one chained expression ending in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct Builder {
    qualifier: Qualifier,
    icon_path: Option<String>,
    has_source_code: bool,
    properties: Properties,
}

impl Builder {
    /// Sets the icon path for the resource type.
    ///
    /// An empty path is treated as unset, so the built descriptor falls back
    /// to the default icon.
    pub fn icon_path(mut self, path: impl Into<String>) -> Self {
        self.icon_path = Some(path.into());
        self
    }

    /// Marks resources of this type as carrying source code.
    pub fn has_source_code(mut self) -> Self {
        self.has_source_code = true;
        self
    }

    /// Sets an extension property, overwriting any previous value for the
    /// key.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[deprecated(note = "set the `availableForFilters` property instead")]
    pub fn available_for_filters(self) -> Self {
        self.property(properties::AVAILABLE_FOR_FILTERS, "true")
    }

    /// Finalizes the descriptor.
    ///
    /// If no icon path was set (or an empty one was), the icon defaults to
    /// `/images/q/<qualifier>.png`.
    pub fn build(self) -> ResourceType {
        let icon_path = match self.icon_path {
            Some(path) if !path.is_empty() => path,
            _ => format!("{}/{}.png", ICON_DIR, self.qualifier.as_str()),
        };

        ResourceType {
            qualifier: self.qualifier,
            icon_path,
            has_source_code: self.has_source_code,
            properties: self.properties,
        }
    }
}

impl From<Qualifier> for Builder {
    fn from(qualifier: Qualifier) -> Self {
        Self {
            qualifier,
            icon_path: None,
            has_source_code: false,
            properties: Properties::new(),
        }
    }
}

/// Describes one category of resources: its qualifier, its icon, whether its
/// resources carry source code, and any extension properties.
///
/// Descriptors are immutable once built. Two descriptors are equal when their
/// qualifiers are equal, whatever their other settings; hashing follows the
/// same rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Repr")]
pub struct ResourceType {
    qualifier: Qualifier,
    icon_path: String,
    has_source_code: bool,
    properties: Properties,
}

impl ResourceType {
    /// Starts a builder for the given qualifier.
    ///
    /// Fails if the qualifier exceeds [`qualifier::MAX_LENGTH`] characters.
    pub fn builder(qualifier: impl Into<String>) -> Result<Builder, qualifier::Error> {
        Qualifier::new(qualifier).map(Builder::from)
    }

    pub fn qualifier(&self) -> &Qualifier {
        &self.qualifier
    }

    pub fn icon_path(&self) -> &str {
        &self.icon_path
    }

    pub fn has_source_code(&self) -> bool {
        self.has_source_code
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Returns the raw value of an extension property, if set.
    pub fn string_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    /// Reads an extension property as a boolean.
    ///
    /// Only a value equal to `"true"`, ignoring ASCII case, counts as true.
    /// Missing keys and any other value read as false.
    pub fn boolean_property(&self, key: &str) -> bool {
        self.properties
            .get(key)
            .map_or(false, |value| value.eq_ignore_ascii_case("true"))
    }

    #[deprecated(note = "read the `availableForFilters` property instead")]
    pub fn is_available_for_filters(&self) -> bool {
        self.boolean_property(properties::AVAILABLE_FOR_FILTERS)
    }
}

impl PartialEq for ResourceType {
    fn eq(&self, other: &Self) -> bool {
        self.qualifier == other.qualifier
    }
}

impl Eq for ResourceType {}

impl Hash for ResourceType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualifier.hash(state);
    }
}

/// Intermediate form for deserializing a [`ResourceType`], funneled through
/// the builder so file-declared descriptors get the same defaulting as
/// code-declared ones.
#[derive(Debug, Deserialize)]
struct Repr {
    qualifier: Qualifier,
    #[serde(default)]
    icon_path: Option<String>,
    #[serde(default)]
    has_source_code: bool,
    #[serde(default)]
    properties: Properties,
}

impl From<Repr> for ResourceType {
    fn from(repr: Repr) -> Self {
        let mut builder = Builder::from(repr.qualifier);

        if let Some(path) = repr.icon_path {
            builder = builder.icon_path(path);
        }
        if repr.has_source_code {
            builder = builder.has_source_code();
        }
        builder.properties = repr.properties;

        builder.build()
    }
}
