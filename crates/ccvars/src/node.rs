//! untyped configuration tree
//!
//! A parsed resource is held as a [ConfigNode] tree. The model contains
//! - null
//! - boolean (true/false)
//! - integer (signed, i64)
//! - decimal (f64, also used for integers that do not fit into i64)
//! - string (utf-8)
//! - sequence (ordered list of nodes)
//! - map (order-preserving, keys are strings)
//! - tagged (an explicitly tagged yaml value such as `!secret foo`)
//!
//! Scalar mapping keys (booleans and numbers) are converted to strings. Tagged values are kept so the
//! flattener can reject them with the attribute path they were found at.
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    Null,
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
    Sequence(Vec<ConfigNode>),
    Map(IndexMap<String, ConfigNode>),
    Tagged { tag: String, value: Box<ConfigNode> },
}

impl ConfigNode {
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        match self {
            ConfigNode::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Walk nested maps, `None` if any segment is missing or not a map
    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigNode> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigNode::Null)
    }

    /// Type name used in error messages
    pub fn kind(&self) -> String {
        match self {
            ConfigNode::Null => "null".into(),
            ConfigNode::Boolean(_) => "bool".into(),
            ConfigNode::Integer(_) => "int".into(),
            ConfigNode::Decimal(_) => "float".into(),
            ConfigNode::String(_) => "string".into(),
            ConfigNode::Sequence(_) => "sequence".into(),
            ConfigNode::Map(_) => "map".into(),
            ConfigNode::Tagged { tag, .. } => format!("tagged value {tag}"),
        }
    }

    /// String form of a scalar as the legacy pipeline expects it
    ///
    /// Returns `None` for sequences, maps and tagged values. `null` renders as an empty string.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            ConfigNode::Null => Some(String::new()),
            ConfigNode::Boolean(value) => Some(value.to_string()),
            ConfigNode::Integer(value) => Some(value.to_string()),
            ConfigNode::Decimal(value) => Some(value.to_string()),
            ConfigNode::String(value) => Some(value.clone()),
            ConfigNode::Sequence(_) | ConfigNode::Map(_) | ConfigNode::Tagged { .. } => None,
        }
    }

    fn from_yaml(value: serde_yaml::Value, path: &str) -> Result<Self> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => ConfigNode::Null,
            Value::Bool(value) => ConfigNode::Boolean(value),
            Value::Number(number) => number.into(),
            Value::String(value) => ConfigNode::String(value),
            Value::Sequence(sequence) => ConfigNode::Sequence(
                sequence
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| Self::from_yaml(value, &join(path, &index.to_string())))
                    .collect::<Result<_>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut map = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let key = match key {
                        Value::String(key) => key,
                        Value::Bool(key) => key.to_string(),
                        Value::Number(key) => key.to_string(),
                        other => {
                            return Err(Error::malformed(
                                path,
                                format!("mapping key must be a scalar, found {other:?}"),
                            ))
                        }
                    };
                    let child = Self::from_yaml(value, &join(path, &key))?;
                    map.insert(key, child);
                }
                ConfigNode::Map(map)
            }
            Value::Tagged(tagged) => {
                let tag = tagged.tag.to_string();
                ConfigNode::Tagged {
                    tag,
                    value: Box::new(Self::from_yaml(tagged.value, path)?),
                }
            }
        })
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

impl TryFrom<serde_yaml::Value> for ConfigNode {
    type Error = Error;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        Self::from_yaml(value, "")
    }
}

impl From<serde_yaml::Number> for ConfigNode {
    fn from(value: serde_yaml::Number) -> Self {
        if let Some(int) = value.as_i64() {
            return ConfigNode::Integer(int);
        }

        // u64 beyond i64::MAX, or a float. as_f64 only fails for neither.
        ConfigNode::Decimal(value.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        ConfigNode::String(value)
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        ConfigNode::String(value.to_string())
    }
}

impl From<bool> for ConfigNode {
    fn from(value: bool) -> Self {
        ConfigNode::Boolean(value)
    }
}

impl<T: Into<ConfigNode>> From<Vec<T>> for ConfigNode {
    fn from(value: Vec<T>) -> Self {
        ConfigNode::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl serde::ser::Serialize for ConfigNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ConfigNode::Null => serializer.serialize_unit(),
            ConfigNode::Boolean(value) => serializer.serialize_bool(*value),
            ConfigNode::Integer(value) => serializer.serialize_i64(*value),
            ConfigNode::Decimal(value) => serializer.serialize_f64(*value),
            ConfigNode::String(value) => serializer.serialize_str(value),
            ConfigNode::Sequence(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            ConfigNode::Map(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
            ConfigNode::Tagged { value, .. } => value.serialize(serializer),
        }
    }
}
