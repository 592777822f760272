use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A class of students that attends lessons together.
///
/// Groups are values: two groups with the same name (and subgroup set) are
/// the same group. The group is the sole owner of its subgroups; a
/// [`Subgroup`] only points back at its owner by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudyGroup {
    pub name: String,
    subgroups: Vec<Subgroup>,
}

impl StudyGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subgroups: Vec::new(),
        }
    }

    pub fn subgroups(&self) -> &[Subgroup] {
        &self.subgroups
    }

    pub fn subgroup(&self, name: &str) -> Option<&Subgroup> {
        self.subgroups.iter().find(|s| s.name == name)
    }

    /// Adds a subgroup. Subgroup names are unique within a group, so this
    /// returns `None` (and leaves the group unchanged) if the name is taken.
    pub fn add_subgroup(&mut self, name: impl Into<String>) -> Option<&Subgroup> {
        let name = name.into();
        if self.subgroup(&name).is_some() {
            return None;
        }

        self.subgroups.push(Subgroup {
            name,
            group_name: self.name.clone(),
        });
        self.subgroups.last()
    }
}

impl Display for StudyGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}

/// A named part of a study group, e.g. for split language classes.
///
/// Carries the owning group's name as a non-owning back-reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subgroup {
    pub name: String,
    pub group_name: String,
}

impl Subgroup {
    pub fn new(name: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group_name: group_name.into(),
        }
    }
}

impl Display for Subgroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.name, self.group_name)
    }
}
