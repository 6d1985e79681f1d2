use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shared tagged-value definitions. Every component that touches an RSVP
/// status, dietary preference, relationship group or event status goes
/// through these types, so validation cannot drift between the organizer
/// API, the public RSVP flow and the import engine.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "rsvp_status", rename_all = "snake_case")]
pub enum RsvpStatus {
    Pending,
    Confirmed,
    Declined,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Confirmed => "confirmed",
            RsvpStatus::Declined => "declined",
        }
    }
}

impl FromStr for RsvpStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RsvpStatus::Pending),
            "confirmed" => Ok(RsvpStatus::Confirmed),
            "declined" => Ok(RsvpStatus::Declined),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "dietary_preference", rename_all = "snake_case")]
pub enum DietaryPreference {
    #[default]
    None,
    Vegetarian,
    Vegan,
    KosherRegular,
    KosherMehadrin,
}

impl DietaryPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryPreference::None => "none",
            DietaryPreference::Vegetarian => "vegetarian",
            DietaryPreference::Vegan => "vegan",
            DietaryPreference::KosherRegular => "kosher_regular",
            DietaryPreference::KosherMehadrin => "kosher_mehadrin",
        }
    }
}

impl FromStr for DietaryPreference {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(DietaryPreference::None),
            "vegetarian" => Ok(DietaryPreference::Vegetarian),
            "vegan" => Ok(DietaryPreference::Vegan),
            "kosher_regular" => Ok(DietaryPreference::KosherRegular),
            "kosher_mehadrin" => Ok(DietaryPreference::KosherMehadrin),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "relationship_group", rename_all = "snake_case")]
pub enum RelationshipGroup {
    FamilyBride,
    FamilyGroom,
    Friends,
    Work,
    Community,
    Other,
}

impl RelationshipGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipGroup::FamilyBride => "family_bride",
            RelationshipGroup::FamilyGroom => "family_groom",
            RelationshipGroup::Friends => "friends",
            RelationshipGroup::Work => "work",
            RelationshipGroup::Community => "community",
            RelationshipGroup::Other => "other",
        }
    }
}

impl FromStr for RelationshipGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "family_bride" => Ok(RelationshipGroup::FamilyBride),
            "family_groom" => Ok(RelationshipGroup::FamilyGroom),
            "friends" => Ok(RelationshipGroup::Friends),
            "work" => Ok(RelationshipGroup::Work),
            "community" => Ok(RelationshipGroup::Community),
            "other" => Ok(RelationshipGroup::Other),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
        }
    }

    /// The status graph is strict: draft -> {published, cancelled},
    /// published -> {cancelled, completed}; completed and cancelled are
    /// terminal.
    pub fn can_transition_to(&self, next: EventStatus) -> bool {
        matches!(
            (self, next),
            (EventStatus::Draft, EventStatus::Published)
                | (EventStatus::Draft, EventStatus::Cancelled)
                | (EventStatus::Published, EventStatus::Cancelled)
                | (EventStatus::Published, EventStatus::Completed)
        )
    }
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            "completed" => Ok(EventStatus::Completed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
