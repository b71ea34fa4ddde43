//! Mapping by target type tag.

use std::fmt;
use std::str::FromStr;

use fieldmap_core::{Reflect, Record, Result, Strategy, map};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::inferred::InferredModel;
use crate::model::Model;

/// Names one of the sample target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetTypeTag {
    Model,
    InferredModel,
}

impl TargetTypeTag {
    pub const ALL: [TargetTypeTag; 2] = [TargetTypeTag::Model, TargetTypeTag::InferredModel];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetTypeTag::Model => "model",
            TargetTypeTag::InferredModel => "inferred-model",
        }
    }

    /// Type name used in mapping errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            TargetTypeTag::Model => Model::TYPE_NAME,
            TargetTypeTag::InferredModel => InferredModel::TYPE_NAME,
        }
    }
}

impl fmt::Display for TargetTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetTypeTag {
    type Err = String;

    /// Accepts the kebab-case name or the type name (`inferred-model`,
    /// `InferredModel`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        TargetTypeTag::ALL
            .into_iter()
            .find(|tag| {
                tag.as_str().eq_ignore_ascii_case(trimmed)
                    || tag.type_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| format!("Unknown target type: {s}"))
    }
}

/// An instance produced by [`map_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedInstance {
    Model(Model),
    InferredModel(InferredModel),
}

impl MappedInstance {
    pub fn tag(&self) -> TargetTypeTag {
        match self {
            MappedInstance::Model(_) => TargetTypeTag::Model,
            MappedInstance::InferredModel(_) => TargetTypeTag::InferredModel,
        }
    }
}

impl fmt::Display for MappedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappedInstance::Model(model) => fmt::Display::fmt(model, f),
            MappedInstance::InferredModel(model) => fmt::Display::fmt(model, f),
        }
    }
}

/// Maps `record` onto a fresh instance of the type named by `tag`.
pub fn map_record(tag: TargetTypeTag, strategy: Strategy, record: &Record) -> Result<MappedInstance> {
    trace!(target_type = %tag, %strategy, fields = record.len(), "mapping record");
    match tag {
        TargetTypeTag::Model => map::<Model>(strategy, record).map(MappedInstance::Model),
        TargetTypeTag::InferredModel => {
            map::<InferredModel>(strategy, record).map(MappedInstance::InferredModel)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_from_either_spelling() {
        assert_eq!("model".parse::<TargetTypeTag>(), Ok(TargetTypeTag::Model));
        assert_eq!("InferredModel".parse::<TargetTypeTag>(), Ok(TargetTypeTag::InferredModel));
        assert_eq!(" inferred-model ".parse::<TargetTypeTag>(), Ok(TargetTypeTag::InferredModel));
        assert!("Order".parse::<TargetTypeTag>().is_err());
        assert_eq!(
            serde_json::to_string(&TargetTypeTag::InferredModel).unwrap(),
            r#""inferred-model""#
        );
    }

    #[test]
    fn mapped_instance_reports_its_tag() {
        let record = Record::from_pairs([
            ("CustomIdentifier", "1"),
            ("Label", "Foo"),
            ("Value", "1"),
            ("IsDeleted", "false"),
        ]);
        let instance = map_record(TargetTypeTag::Model, Strategy::Manual, &record).unwrap();
        assert_eq!(instance.tag(), TargetTypeTag::Model);
        insta::assert_snapshot!(instance, @"Foo-1: 1 (created on: , is deleted: false)");
    }
}
