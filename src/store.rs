use std::{
    collections::BTreeMap,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

use tera::Value;

use crate::{
    answers::{Answers, Field},
    error::{Result, ScaffoldError},
};

/// Name of the settings file kept in the destination directory.
pub const STORE_FILE: &str = ".pyskel-rc.json";

/// Key under which the generator records its own version.
pub const VERSION_KEY: &str = "version";

/// Ordered so that saving identical answers yields identical bytes.
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct ValueMap(BTreeMap<String, Value>);

impl Deref for ValueMap {
    type Target = BTreeMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ValueMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Answers remembered from earlier runs in one destination directory.
#[derive(Debug)]
pub struct AnswerStore {
    path: PathBuf,
    values: ValueMap,
}

impl AnswerStore {
    /// Loads the store kept in `destination`, or starts an empty one when the
    /// directory has never been scaffolded.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the file exists but can not be read or does not
    /// hold a JSON object.
    pub fn open(destination: &Path) -> Result<Self> {
        let path = destination.join(STORE_FILE);

        if !path.exists() {
            crate::trace!("No answer store at {}", path.display());
            return Ok(AnswerStore {
                path,
                values: ValueMap::default(),
            });
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ScaffoldError::io("failed to read", &path, e))?;

        let values = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => ValueMap(map.into_iter().collect()),
            Ok(other) => {
                return Err(ScaffoldError::Store {
                    path,
                    message: format!("expected an object, found {other}"),
                })
            }
            Err(e) => {
                return Err(ScaffoldError::Store {
                    path,
                    message: e.to_string(),
                })
            }
        };

        crate::trace!("Loaded {} stored values from {}", values.len(), path.display());

        Ok(AnswerStore { path, values })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.values.insert(name.to_owned(), value.into());
    }

    /// Stored text for `field`, ignoring values of the wrong type.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field.key()).and_then(Value::as_str)
    }

    #[must_use]
    pub fn flag(&self, field: Field) -> Option<bool> {
        self.get(field.key()).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get(VERSION_KEY).and_then(Value::as_str)
    }

    /// Copies every answer into the store under its field name.
    pub fn record(&mut self, answers: &Answers) {
        for field in Field::ALL {
            self.set(field.key(), answers.get(field));
        }
    }

    /// Writes the store to disk, creating the destination if needed.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] on any IO failure.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScaffoldError::io("failed to create", parent, e))?;
        }

        let map: serde_json::Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut contents = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| {
            ScaffoldError::Store {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;
        contents.push('\n');

        std::fs::write(&self.path, contents)
            .map_err(|e| ScaffoldError::io("failed to write", &self.path, e))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}
