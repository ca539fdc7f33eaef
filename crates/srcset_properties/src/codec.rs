//! Stable text encoding of a [`PropertiesFile`].
//!
//! The document is pretty-printed JSON with a schema-version marker:
//!
//! ```json
//! {
//!   "version": 1,
//!   "databases": [
//!     {
//!       "packageName": "com.example",
//!       "outputDirectory": "build/srcset/Database",
//!       "compilationUnits": [
//!         {
//!           "name": "debug",
//!           "sourceFolders": [
//!             { "path": "src/debug/sqldelight", "dependency": false }
//!           ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Field order is fixed by the types and sequence order is declaration order,
//! so equal values always encode to identical bytes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::database::{Database, PropertiesFile};
use crate::error::CodecError;

/// Schema version written to and required from every document.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct Document<'a> {
    version: u32,
    databases: &'a [Database],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OwnedDocument {
    version: u32,
    databases: Vec<Database>,
}

/// Encodes a properties file to its stable textual form.
///
/// The output ends with a newline.
pub fn encode(file: &PropertiesFile) -> Result<String, CodecError> {
    let document = Document {
        version: SCHEMA_VERSION,
        databases: &file.databases,
    };
    let mut text = serde_json::to_string_pretty(&document).map_err(|e| CodecError::Encode {
        reason: e.to_string(),
    })?;
    text.push('\n');
    Ok(text)
}

/// Decodes a properties document.
///
/// Rejects unparseable text, unknown or missing keys, a different schema
/// version, repeated unit names within a database and repeated folder paths
/// within a unit. Database package/output uniqueness is not checked here; it
/// is enforced when databases are registered.
pub fn decode(text: &str) -> Result<PropertiesFile, CodecError> {
    let document: OwnedDocument =
        serde_json::from_str(text).map_err(|e| CodecError::malformed(e.to_string()))?;

    if document.version != SCHEMA_VERSION {
        return Err(CodecError::malformed(format!(
            "unsupported schema version {} (expected {SCHEMA_VERSION})",
            document.version
        )));
    }

    for (index, database) in document.databases.iter().enumerate() {
        let mut names = HashSet::new();
        for unit in &database.compilation_units {
            if !names.insert(unit.name.as_str()) {
                return Err(CodecError::malformed(format!(
                    "database {index} ('{}') repeats compilation unit '{}'",
                    database.output_directory, unit.name
                )));
            }
            if let Some(path) = unit.duplicate_folder() {
                return Err(CodecError::malformed(format!(
                    "compilation unit '{}' repeats source folder '{path}'",
                    unit.name
                )));
            }
        }
    }

    Ok(PropertiesFile::new(document.databases))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use srcset_common::{CompilationUnit, SourceFolder};

    fn sample() -> PropertiesFile {
        PropertiesFile::new(vec![Database {
            package_name: "com.squareup.sqldelight.sample".to_string(),
            output_directory: "build/srcset/CashDatabase".to_string(),
            compilation_units: vec![
                CompilationUnit::new(
                    "androidLibDebug",
                    vec![
                        SourceFolder::local("src/androidLibDebug/sqldelight"),
                        SourceFolder::local("src/androidLibMain/sqldelight"),
                        SourceFolder::local("src/commonMain/sqldelight"),
                    ],
                ),
                CompilationUnit::new(
                    "metadataMain",
                    vec![
                        SourceFolder::local("src/commonMain/sqldelight"),
                        SourceFolder::dependency("lib/src/commonMain/sqldelight"),
                    ],
                ),
            ],
        }])
    }

    #[test]
    fn encode_exact_layout() {
        let file = PropertiesFile::new(vec![Database {
            package_name: "com.example".to_string(),
            output_directory: "build/srcset/Database".to_string(),
            compilation_units: vec![CompilationUnit::new(
                "main",
                vec![SourceFolder::local("src/main/sqldelight")],
            )],
        }]);
        let expected = r#"{
  "version": 1,
  "databases": [
    {
      "packageName": "com.example",
      "outputDirectory": "build/srcset/Database",
      "compilationUnits": [
        {
          "name": "main",
          "sourceFolders": [
            {
              "path": "src/main/sqldelight",
              "dependency": false
            }
          ]
        }
      ]
    }
  ]
}
"#;
        assert_eq!(encode(&file).unwrap(), expected);
    }

    #[test]
    fn encode_is_idempotent() {
        let file = sample();
        assert_eq!(encode(&file).unwrap(), encode(&file.clone()).unwrap());
    }

    #[test]
    fn encode_keeps_declaration_order() {
        let mut file = sample();
        file.databases.push(Database {
            package_name: "a.first.alphabetically".to_string(),
            output_directory: "build/a".to_string(),
            compilation_units: Vec::new(),
        });
        let text = encode(&file).unwrap();
        let cash = text.find("CashDatabase").unwrap();
        let alpha = text.find("a.first.alphabetically").unwrap();
        assert!(cash < alpha);
    }

    #[test]
    fn decode_sample() {
        let text = encode(&sample()).unwrap();
        assert_eq!(decode(&text).unwrap(), sample());
    }

    #[test]
    fn decode_empty_file() {
        let file = decode(r#"{"version": 1, "databases": []}"#).unwrap();
        assert!(file.databases.is_empty());
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode("not json {{{").unwrap_err();
        assert!(matches!(err, CodecError::Malformed { .. }));
    }

    #[test]
    fn decode_rejects_missing_field() {
        let err = decode(
            r#"{"version": 1, "databases": [{"packageName": "p", "compilationUnits": []}]}"#,
        )
        .unwrap_err();
        match err {
            CodecError::Malformed { reason } => assert!(reason.contains("outputDirectory")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_unknown_key() {
        let err = decode(r#"{"version": 1, "databases": [], "extra": true}"#).unwrap_err();
        assert!(matches!(err, CodecError::Malformed { .. }));
    }

    #[test]
    fn decode_rejects_missing_version() {
        let err = decode(r#"{"databases": []}"#).unwrap_err();
        assert!(matches!(err, CodecError::Malformed { .. }));
    }

    #[test]
    fn decode_rejects_other_version() {
        let err = decode(r#"{"version": 2, "databases": []}"#).unwrap_err();
        match err {
            CodecError::Malformed { reason } => assert!(reason.contains("schema version 2")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_duplicate_folder() {
        let text = r#"{
  "version": 1,
  "databases": [{
    "packageName": "p",
    "outputDirectory": "o",
    "compilationUnits": [{
      "name": "main",
      "sourceFolders": [
        {"path": "src/main", "dependency": false},
        {"path": "src/main", "dependency": true}
      ]
    }]
  }]
}"#;
        match decode(text).unwrap_err() {
            CodecError::Malformed { reason } => assert!(reason.contains("src/main")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_duplicate_unit_name() {
        let text = r#"{
  "version": 1,
  "databases": [{
    "packageName": "p",
    "outputDirectory": "o",
    "compilationUnits": [
      {"name": "main", "sourceFolders": []},
      {"name": "main", "sourceFolders": []}
    ]
  }]
}"#;
        assert!(matches!(
            decode(text).unwrap_err(),
            CodecError::Malformed { .. }
        ));
    }

    #[test]
    fn decode_accepts_duplicate_database_targets() {
        let db = r#"{"packageName": "p", "outputDirectory": "o", "compilationUnits": []}"#;
        let text = format!(r#"{{"version": 1, "databases": [{db}, {db}]}}"#);
        assert_eq!(decode(&text).unwrap().databases.len(), 2);
    }

    fn arb_unit() -> impl Strategy<Value = CompilationUnit> {
        (
            "[a-zA-Z]{1,12}",
            prop::collection::hash_set("[a-z/._ \"\\\\-]{1,20}", 0..6),
            prop::collection::vec(any::<bool>(), 6),
        )
            .prop_map(|(name, paths, flags)| {
                let folders = paths
                    .into_iter()
                    .zip(flags)
                    .map(|(path, dependency)| SourceFolder::new(path, dependency))
                    .collect();
                CompilationUnit::new(name, folders)
            })
    }

    fn arb_database() -> impl Strategy<Value = Database> {
        (
            "[a-z.]{1,16}",
            "[a-zA-Z/]{1,16}",
            prop::collection::vec(arb_unit(), 0..4),
        )
            .prop_map(|(package_name, output_directory, units)| {
                let mut names = HashSet::new();
                let compilation_units = units
                    .into_iter()
                    .filter(|u| names.insert(u.name.clone()))
                    .collect();
                Database {
                    package_name,
                    output_directory,
                    compilation_units,
                }
            })
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(databases in prop::collection::vec(arb_database(), 0..4)) {
            let file = PropertiesFile::new(databases);
            let text = encode(&file).unwrap();
            prop_assert_eq!(decode(&text).unwrap(), file);
        }
    }
}
