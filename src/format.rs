use std::fs::File;
use std::io::{Error as IoError, Read};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Error as JsonError;
use serde_yaml::Error as YamlError;
use strum::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;
use toml::de::Error as TomlError;

use crate::tree::Tree;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open declaration file: {0}")]
    CannotOpenFile(#[source] IoError),
    #[error("cannot read declaration file: {0}")]
    CannotReadFile(#[source] IoError),
    #[error("cannot deserialize YAML: {0}")]
    YamlDeserialize(#[source] YamlError),
    #[error("cannot deserialize JSON: {0}")]
    JsonDeserialize(#[source] JsonError),
    #[error("cannot deserialize TOML: {0}")]
    TomlDeserialize(#[source] TomlError),
}

/// Represents all the declaration file formats that are supported.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Format {
    #[strum(serialize = "JSON", serialize = "json")]
    Json,
    #[strum(serialize = "YML", serialize = "yml", serialize = "YAML", serialize = "yaml")]
    Yaml,
    #[strum(serialize = "TOML", serialize = "toml")]
    Toml,
}

impl Format {
    /// Returns the usual file extension for this format.
    pub fn file_extension(&self) -> &str {
        self.as_ref()
    }

    /// Guesses the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Self::from_str(extension).ok()
    }

    fn read_yaml(s: &str) -> Result<Tree, YamlError> {
        serde_yaml::from_str(s)
    }

    fn read_json(s: &str) -> Result<Tree, JsonError> {
        serde_json::from_str(s)
    }

    fn read_toml(s: &str) -> Result<Tree, TomlError> {
        toml::from_str(s)
    }

    pub fn read_tree_str(&self, s: &str) -> Result<Tree, Error> {
        match self {
            Self::Yaml => Self::read_yaml(s).map_err(Error::YamlDeserialize),
            Self::Json => Self::read_json(s).map_err(Error::JsonDeserialize),
            Self::Toml => Self::read_toml(s).map_err(Error::TomlDeserialize),
        }
    }

    pub fn read_tree_path(&self, path: &Path) -> Result<Tree, Error> {
        let mut f = File::open(path).map_err(Error::CannotOpenFile)?;

        let mut buffer = String::new();
        f.read_to_string(&mut buffer).map_err(Error::CannotReadFile)?;

        self.read_tree_str(&buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;
    use tempfile::Builder;

    #[test]
    fn parse() {
        let inputs_and_expected = vec![
            ("json", Some(Format::Json)),
            ("JSON", Some(Format::Json)),
            ("yml", Some(Format::Yaml)),
            ("YML", Some(Format::Yaml)),
            ("yaml", Some(Format::Yaml)),
            ("YAML", Some(Format::Yaml)),
            ("toml", Some(Format::Toml)),
            ("TOML", Some(Format::Toml)),
            ("ini", None),
            ("", None),
        ];

        for (input, expected) in inputs_and_expected {
            let produced = Format::from_str(input).ok();
            assert_eq!(expected, produced);
        }
    }

    #[test]
    fn detect_from_path() {
        let inputs_and_expected = vec![
            ("resource_types.yml", Some(Format::Yaml)),
            ("resource_types.yaml", Some(Format::Yaml)),
            ("resource_types.json", Some(Format::Json)),
            ("resource_types.toml", Some(Format::Toml)),
            ("resource_types.txt", None),
            ("resource_types", None),
        ];

        for (input, expected) in inputs_and_expected {
            let produced = Format::from_path(Path::new(input));
            assert_eq!(expected, produced);
        }
    }

    #[test]
    fn extensions_round_trip() {
        for format in Format::iter() {
            assert_eq!(Ok(format), Format::from_str(format.file_extension()));
        }
    }

    #[test]
    fn read_tree_str() {
        let input = "\
types:
  - qualifier: TRK
  - qualifier: DIR
relations:
  TRK: [DIR]
";
        let produced = Format::Yaml.read_tree_str(input).unwrap();
        assert_eq!("TRK", produced.root().unwrap().qualifier().as_str());
        assert_eq!("DIR", produced.children("TRK")[0].as_str());

        let input = r#"{"types": [{"qualifier": "TRK"}, {"qualifier": "DIR"}], "relations": {"TRK": ["DIR"]}}"#;
        let produced = Format::Json.read_tree_str(input).unwrap();
        assert_eq!("TRK", produced.root().unwrap().qualifier().as_str());
        assert_eq!(2, produced.len());

        let input = "\
[[types]]
qualifier = \"TRK\"

[[types]]
qualifier = \"DIR\"

[relations]
TRK = [\"DIR\"]
";
        let produced = Format::Toml.read_tree_str(input).unwrap();
        assert_eq!("TRK", produced.root().unwrap().qualifier().as_str());

        assert!(matches!(
            Format::Json.read_tree_str("types:\n  - qualifier: TRK\n"),
            Err(Error::JsonDeserialize(..)),
        ));
    }

    #[test]
    fn read_tree_path() {
        let temp_dir = Builder::new().suffix("read_tree_path").tempdir().unwrap();
        let path = temp_dir.path().join("resource_types.yml");

        std::fs::write(
            &path,
            "types:\n  - qualifier: TRK\n  - qualifier: DIR\nrelations:\n  TRK: [DIR]\n",
        )
        .unwrap();

        let format = Format::from_path(&path).unwrap();
        assert_eq!(Format::Yaml, format);

        let produced = format.read_tree_path(&path).unwrap();
        assert_eq!("TRK", produced.root().unwrap().qualifier().as_str());
        assert_eq!(2, produced.len());

        let produced = Format::Yaml.read_tree_path(&temp_dir.path().join("missing.yml"));
        assert!(matches!(produced, Err(Error::CannotOpenFile(..))));
    }
}
