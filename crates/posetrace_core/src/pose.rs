//! Pose data units.
//!
//! - `PoseSnapshot`: an immutable record of entity positions at one instant
//! - `RigPose`: the live, mutable entity set a player writes frames onto
//!
//! Both keep insertion order; for snapshots that order is the capture order
//! and defines how entities enumerate in reports and exports.

use crate::math::Vec3;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing pose data from external input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoseError {
    /// Two entries in one snapshot share an entity name.
    #[error("duplicate entity name in snapshot: {0}")]
    DuplicateName(String),
}

/// An immutable record of entity positions at a single instant.
///
/// Keys are unique entity names; a snapshot may omit an entity, which
/// downstream consumers treat as "no data for that entity at this frame".
///
/// Serializes as a plain name → position map. Deserialization runs the same
/// uniqueness check as [`PoseSnapshot::from_pairs`], so a repeated key in
/// external JSON is an error rather than a silent overwrite.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PoseSnapshot {
    positions: IndexMap<String, Vec3>,
}

impl<'de> Deserialize<'de> for PoseSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = PoseSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of entity names to positions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut positions = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, pos)) = map.next_entry::<String, Vec3>()? {
                    if positions.insert(name.clone(), pos).is_some() {
                        return Err(serde::de::Error::custom(PoseError::DuplicateName(name)));
                    }
                }
                Ok(PoseSnapshot { positions })
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

impl PoseSnapshot {
    /// Build a snapshot from name/position pairs, rejecting duplicate names.
    ///
    /// Duplicate keys are a contract violation surfaced here rather than
    /// resolved by silent overwrite.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, PoseError>
    where
        I: IntoIterator<Item = (S, Vec3)>,
        S: Into<String>,
    {
        let mut positions = IndexMap::new();
        for (name, pos) in pairs {
            let name = name.into();
            if positions.contains_key(&name) {
                return Err(PoseError::DuplicateName(name));
            }
            positions.insert(name, pos);
        }
        Ok(Self { positions })
    }

    /// Record the current state of a live rig.
    ///
    /// Rig names are unique by construction, so this cannot fail.
    pub fn capture(rig: &RigPose) -> Self {
        Self {
            positions: rig.entities.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Vec3> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Entity names in capture order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec3)> {
        self.positions.iter().map(|(name, pos)| (name.as_str(), *pos))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// The live entity set: unique names mapped to mutable positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RigPose {
    entities: IndexMap<String, Vec3>,
}

impl RigPose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rig from name/position pairs, rejecting duplicate names.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, PoseError>
    where
        I: IntoIterator<Item = (S, Vec3)>,
        S: Into<String>,
    {
        let snapshot = PoseSnapshot::from_pairs(pairs)?;
        Ok(Self {
            entities: snapshot.positions,
        })
    }

    pub fn get(&self, name: &str) -> Option<Vec3> {
        self.entities.get(name).copied()
    }

    /// Overwrite the position of an existing entity. Returns false (and
    /// changes nothing) if the name is unknown.
    pub fn set(&mut self, name: &str, pos: Vec3) -> bool {
        match self.entities.get_mut(name) {
            Some(slot) => {
                *slot = pos;
                true
            }
            None => false,
        }
    }

    /// Entity names in spawn order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec3)> {
        self.entities.iter().map(|(name, pos)| (name.as_str(), *pos))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec3)> {
        self.entities.iter_mut().map(|(name, pos)| (name.as_str(), pos))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_rejects_duplicate_names() {
        let result = PoseSnapshot::from_pairs(vec![
            ("Head", Vec3::new(0.0, 1.0, 0.0)),
            ("Head", Vec3::new(0.0, 2.0, 0.0)),
        ]);
        assert_eq!(result, Err(PoseError::DuplicateName("Head".to_string())));
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let snapshot = PoseSnapshot::from_pairs(vec![
            ("Torso", Vec3::ZERO),
            ("Head", Vec3::UP),
            ("LeftArm", Vec3::ONE),
        ])
        .unwrap();

        let names: Vec<&str> = snapshot.names().collect();
        assert_eq!(names, vec!["Torso", "Head", "LeftArm"]);
    }

    #[test]
    fn test_snapshot_missing_entity_is_none() {
        let snapshot = PoseSnapshot::from_pairs(vec![("Torso", Vec3::ZERO)]).unwrap();
        assert_eq!(snapshot.get("Head"), None);
        assert!(!snapshot.contains("Head"));
    }

    #[test]
    fn test_capture_matches_rig() {
        let mut rig = RigPose::from_pairs(vec![("Torso", Vec3::ZERO), ("Head", Vec3::UP)]).unwrap();
        rig.set("Head", Vec3::new(0.0, 2.0, 0.0));

        let snapshot = PoseSnapshot::capture(&rig);
        assert_eq!(snapshot.get("Head"), Some(Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_rig_set_unknown_name_is_rejected() {
        let mut rig = RigPose::from_pairs(vec![("Torso", Vec3::ZERO)]).unwrap();
        assert!(!rig.set("Head", Vec3::UP));
        assert_eq!(rig.len(), 1);
    }

    #[test]
    fn test_snapshot_json_rejects_duplicate_names() {
        let json = r#"{"Head":[0.0,1.0,0.0],"Head":[0.0,2.0,0.0]}"#;
        let result: Result<PoseSnapshot, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate entity name in snapshot: Head"));
    }

    #[test]
    fn test_snapshot_serde_round_trip_keeps_order() {
        let snapshot = PoseSnapshot::from_pairs(vec![
            ("Zeta", Vec3::new(1.0, 2.0, 3.0)),
            ("Alpha", Vec3::new(4.0, 5.0, 6.0)),
        ])
        .unwrap();

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"Zeta":[1.0,2.0,3.0],"Alpha":[4.0,5.0,6.0]}"#);

        let back: PoseSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        let names: Vec<&str> = back.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }
}
