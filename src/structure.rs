//! Element types for the structure and sequence kinds.

use crate::{DataType, Value};

/// A named member of a structure record.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub name: String,
    pub value: Value,
}

/// One record of a structure array: an ordered list of named members, each
/// holding an array of any kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructureData {
    members: Vec<Member>,
}

impl StructureData {
    pub fn new(members: Vec<Member>) -> StructureData {
        StructureData { members }
    }

    /// Append a member and return the updated record.
    pub fn with_member(mut self, name: impl Into<String>, value: Value) -> StructureData {
        self.members.push(Member {
            name: name.into(),
            value,
        });
        self
    }

    /// Return the value of the first member called `name`.
    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members
            .iter()
            .find(|member| member.name == name)
            .map(|member| &member.value)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Return the kind of each member, in member order.
    pub fn member_kinds(&self) -> Vec<DataType> {
        self.members.iter().map(|m| m.value.kind()).collect()
    }
}

/// One element of a sequence array: a variable number of structure records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequenceData {
    records: Vec<StructureData>,
}

impl SequenceData {
    pub fn new(records: Vec<StructureData>) -> SequenceData {
        SequenceData { records }
    }

    pub fn records(&self) -> &[StructureData] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructureData> {
        self.records.iter()
    }
}
