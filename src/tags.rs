//! Uniform tag sets.
//!
//! Every taggable declaration in one build carries the same tag set, derived
//! from the stack context: `Environment` and `StackName` are the stack name,
//! `ProjectName` is the project name, and `Team` is a literal. Azure-style
//! graphs additionally set `Owner`. Construction cannot fail.

use indexmap::IndexMap;
use serde::Serialize;

use crate::stack::StackContext;

/// The fixed-key tag mapping applied to every taggable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSet {
    #[serde(rename = "Environment")]
    environment: String,
    #[serde(rename = "ProjectName")]
    project_name: String,
    #[serde(rename = "StackName")]
    stack_name: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Owner", skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
}

impl TagSet {
    /// Builds the tag set for a stack.
    pub fn new(ctx: &StackContext, team: impl Into<String>) -> Self {
        Self {
            environment: ctx.stack().to_string(),
            project_name: ctx.project().to_string(),
            stack_name: ctx.stack().to_string(),
            team: team.into(),
            owner: None,
        }
    }

    /// Adds the `Owner` key.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Renders the tag set as an ordered key/value map containing exactly
    /// the fixed keys.
    pub fn to_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        map.insert("Environment".to_string(), self.environment.clone());
        map.insert("ProjectName".to_string(), self.project_name.clone());
        map.insert("StackName".to_string(), self.stack_name.clone());
        map.insert("Team".to_string(), self.team.clone());
        if let Some(owner) = &self.owner {
            map.insert("Owner".to_string(), owner.clone());
        }
        map
    }
}
