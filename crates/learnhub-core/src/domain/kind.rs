//! Feature kinds
//!
//! Every page is the same collection feed, configured by a `FeatureKind`:
//! which REST base path it talks to, which actions it offers and which draft
//! fields are mandatory.

use serde::{Deserialize, Serialize};

use super::draft::DraftField;

/// An action a feature may support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Capability {
    List = 1 << 0,
    Create = 1 << 1,
    Update = 1 << 2,
    Delete = 1 << 3,
    Like = 1 << 4,
    Comment = 1 << 5,
    Register = 1 << 6,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::List => "list",
            Capability::Create => "create",
            Capability::Update => "update",
            Capability::Delete => "delete",
            Capability::Like => "like",
            Capability::Comment => "comment",
            Capability::Register => "register",
        }
    }
}

/// Set of capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    const CRUD: Capabilities = Capabilities(
        Capability::List as u8 | Capability::Create as u8 | Capability::Update as u8 | Capability::Delete as u8,
    );

    pub const fn with(self, cap: Capability) -> Self {
        Capabilities(self.0 | cap as u8)
    }

    pub const fn contains(&self, cap: Capability) -> bool {
        self.0 & cap as u8 != 0
    }
}

/// A feature collection of the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureKind {
    LearningPlans,
    SkillSharing,
    LearningProgress,
    Events,
    Resources,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::SkillSharing,
        FeatureKind::LearningPlans,
        FeatureKind::LearningProgress,
        FeatureKind::Events,
        FeatureKind::Resources,
    ];

    /// REST base path
    pub fn base_path(&self) -> &'static str {
        match self {
            FeatureKind::LearningPlans => "/learning-plans",
            FeatureKind::SkillSharing => "/skill-sharing",
            FeatureKind::LearningProgress => "/learning-progress",
            FeatureKind::Events => "/events",
            FeatureKind::Resources => "/resources",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeatureKind::LearningPlans => "Learning Plans",
            FeatureKind::SkillSharing => "Skill Sharing",
            FeatureKind::LearningProgress => "Learning Progress",
            FeatureKind::Events => "Events",
            FeatureKind::Resources => "Resources",
        }
    }

    /// Singular noun used in buttons and messages
    pub fn noun(&self) -> &'static str {
        match self {
            FeatureKind::LearningPlans => "plan",
            FeatureKind::SkillSharing => "post",
            FeatureKind::LearningProgress => "progress update",
            FeatureKind::Events => "event",
            FeatureKind::Resources => "resource",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            FeatureKind::LearningPlans | FeatureKind::SkillSharing => Capabilities::CRUD
                .with(Capability::Like)
                .with(Capability::Comment),
            FeatureKind::Events => Capabilities::CRUD
                .with(Capability::Like)
                .with(Capability::Comment)
                .with(Capability::Register),
            FeatureKind::LearningProgress | FeatureKind::Resources => Capabilities::CRUD,
        }
    }

    pub fn supports(&self, cap: Capability) -> bool {
        self.capabilities().contains(cap)
    }

    /// Draft fields that must be non-blank before create / update
    pub fn required_fields(&self) -> &'static [DraftField] {
        match self {
            FeatureKind::SkillSharing => &[DraftField::Description],
            FeatureKind::Events => &[DraftField::Title, DraftField::Extra("eventDate")],
            FeatureKind::LearningPlans | FeatureKind::LearningProgress | FeatureKind::Resources => {
                &[DraftField::Title]
            }
        }
    }

    /// Feature specific fields shown on cards and offered in forms
    pub fn extra_fields(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            FeatureKind::LearningPlans => &[("topics", "Topics"), ("duration", "Duration")],
            FeatureKind::SkillSharing => &[("skill", "Skill")],
            FeatureKind::LearningProgress => &[("status", "Status"), ("completedItems", "Completed")],
            FeatureKind::Events => &[("eventDate", "Date"), ("location", "Location")],
            FeatureKind::Resources => &[("url", "Link"), ("resourceType", "Type")],
        }
    }
}
