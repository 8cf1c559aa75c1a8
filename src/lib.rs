//! Builder-constructed descriptors for categories of resources, organized
//! into trees and looked up through a registry. Trees can be declared in
//! code or read from YAML, JSON, or TOML declaration files.

pub mod format;
pub mod properties;
pub mod qualifier;
pub mod registry;
pub mod resource_type;
pub mod tree;

pub use crate::format::Format;
pub use crate::properties::Properties;
pub use crate::qualifier::Qualifier;
pub use crate::registry::Registry;
pub use crate::resource_type::ResourceType;
pub use crate::tree::Tree;
