//! # Team Builder Models
//!
//! Data types shared by the store backends, the synchronizer and the
//! presentation layer.
//!
//! A [`Team`] is the unit persisted in the team store. Its members are
//! denormalized snapshots of catalog entries ([`Member`]) embedded in the
//! team document; they have no identity of their own beyond their name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of members a team may hold
pub const TEAM_CAPACITY: usize = 6;

/// Store-assigned team identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    /// Wrap an identifier handed out by a team store.
    ///
    /// Only store backends (and tests) should construct ids; local state
    /// never fabricates one.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Pokémon embedded in a team
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    /// Unique key within a team (exact match)
    pub name: String,
    /// Comma separated type labels, e.g. `"grass, poison"`
    #[serde(rename = "type")]
    pub type_: String,
    /// Sprite URL
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub base_experience: u32,
}

impl Member {
    pub fn new(name: &str, type_: &str, base_experience: u32) -> Self {
        Self {
            name: name.to_string(),
            type_: type_.to_string(),
            image: None,
            base_experience,
        }
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }
}

/// A named team as stored in the team store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub pokemons: Vec<Member>,
}

impl Team {
    /// Whether a member with exactly this name is on the team
    pub fn contains(&self, member_name: &str) -> bool {
        self.pokemons.iter().any(|p| p.name == member_name)
    }

    pub fn is_full(&self) -> bool {
        self.pokemons.len() >= TEAM_CAPACITY
    }

    /// How a catalog entry with the given name relates to this team
    pub fn availability_of(&self, member_name: &str) -> Availability {
        if self.contains(member_name) {
            Availability::InTeam
        } else if self.is_full() {
            Availability::TeamFull
        } else {
            Availability::Available
        }
    }
}

/// A team that has not been handed to the store yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    #[serde(default)]
    pub pokemons: Vec<Member>,
}

impl NewTeam {
    /// An empty team with the given name
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            pokemons: Vec::new(),
        }
    }

    /// Attach the id a store assigned on insert
    pub fn into_team(self, id: TeamId) -> Team {
        Team {
            id,
            name: self.name,
            pokemons: self.pokemons,
        }
    }
}

/// Partial update of a team document.
///
/// Fields left as `None` are not written, so renaming a team never
/// clobbers its members and vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokemons: Option<Vec<Member>>,
}

impl TeamPatch {
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            pokemons: None,
        }
    }

    pub fn members(pokemons: Vec<Member>) -> Self {
        Self {
            name: None,
            pokemons: Some(pokemons),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.pokemons.is_none()
    }

    /// Names of the fields this patch writes, in document order
    pub fn field_paths(&self) -> Vec<&'static str> {
        let mut paths = Vec::new();
        if self.name.is_some() {
            paths.push("name");
        }
        if self.pokemons.is_some() {
            paths.push("pokemons");
        }
        paths
    }

    /// Apply the present fields to a team in place
    pub fn apply_to(&self, team: &mut Team) {
        if let Some(name) = &self.name {
            team.name = name.clone();
        }
        if let Some(pokemons) = &self.pokemons {
            team.pokemons = pokemons.clone();
        }
    }
}

/// One selectable entry of the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub base_experience: u32,
}

impl CatalogEntry {
    /// Snapshot this entry as a team member
    pub fn to_member(&self) -> Member {
        Member {
            name: self.name.clone(),
            type_: self.type_.clone(),
            image: self.image.clone(),
            base_experience: self.base_experience,
        }
    }
}

/// Relation between a catalog entry and the active team
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Can be added
    #[default]
    Available,
    /// Already a member
    InTeam,
    /// Team has reached capacity
    TeamFull,
}

impl Availability {
    /// Button label for this state
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Add to Team",
            Self::InTeam => "In Team",
            Self::TeamFull => "Full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_with(names: &[&str]) -> Team {
        Team {
            id: TeamId::new("t1"),
            name: "Kanto".to_string(),
            pokemons: names.iter().map(|n| Member::new(n, "normal", 50)).collect(),
        }
    }

    #[test]
    fn test_member_serializes_stored_field_names() {
        let member = Member::new("bulbasaur", "grass, poison", 64)
            .with_image("https://img/1.png");
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["type"], "grass, poison");
        assert_eq!(json["base_experience"], 64);
        assert_eq!(json["image"], "https://img/1.png");
    }

    #[test]
    fn test_availability() {
        let team = team_with(&["pikachu"]);
        assert_eq!(team.availability_of("pikachu"), Availability::InTeam);
        assert_eq!(team.availability_of("eevee"), Availability::Available);

        let full = team_with(&["a", "b", "c", "d", "e", "f"]);
        assert!(full.is_full());
        assert_eq!(full.availability_of("g"), Availability::TeamFull);
        assert_eq!(full.availability_of("a"), Availability::InTeam);
        assert_eq!(Availability::TeamFull.label(), "Full");
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut team = team_with(&["pikachu"]);
        TeamPatch::rename("Johto").apply_to(&mut team);
        assert_eq!(team.name, "Johto");
        assert_eq!(team.pokemons.len(), 1);

        TeamPatch::members(vec![]).apply_to(&mut team);
        assert_eq!(team.name, "Johto");
        assert!(team.pokemons.is_empty());

        assert_eq!(TeamPatch::rename("x").field_paths(), vec!["name"]);
        assert!(TeamPatch::default().is_empty());
    }
}
