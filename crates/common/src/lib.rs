// ================
// crates/common/src/lib.rs
// ================
//! Shared types for the `liveclass` session engine.
//! These are the structures exchanged between the state engine and an
//! embedding UI layer: the session data model plus the change events the
//! engine broadcasts after each applied transition.

use serde::{Deserialize, Serialize};

/// Participant identifier, unique within a session
pub type ParticipantId = u64;

/// Breakout-room identifier, unique within a session
pub type RoomId = u64;

/// Role tag carried by every participant
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

/// A session participant.
///
/// The full participant set is seeded when the session is created; entries
/// are never added or removed afterwards, only flag-mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub is_speaking: bool,
    pub hand_raised: bool,
    pub role: Role,
    pub is_muted: bool,
    pub is_video_off: bool,
    pub is_pinned: bool,
    /// Live microphone level in `[0, 1]`
    pub audio_level: f32,
    pub is_screen_sharing: bool,
    /// Current breakout-room assignment, if any
    #[serde(default)]
    pub breakout_room: Option<RoomId>,
}

impl Participant {
    /// Create a participant with all flags cleared
    pub fn new(id: ParticipantId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            is_speaking: false,
            hand_raised: false,
            role,
            is_muted: false,
            is_video_off: false,
            is_pinned: false,
            audio_level: 0.0,
            is_screen_sharing: false,
            breakout_room: None,
        }
    }
}

/// A named sub-grouping of participants, tracked as an id list.
/// Rooms are created by an explicit operation and never deleted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BreakoutRoom {
    pub id: RoomId,
    pub name: String,
    /// Member participant ids, in join order
    pub participants: Vec<ParticipantId>,
}

impl BreakoutRoom {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            participants: Vec::new(),
        }
    }
}

/// Active tile arrangement for the conference view
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Grid,
    Spotlight,
    Presentation,
}

impl LayoutMode {
    /// Cycling successor: grid -> spotlight -> presentation -> grid
    pub fn next(self) -> Self {
        match self {
            LayoutMode::Grid => LayoutMode::Spotlight,
            LayoutMode::Spotlight => LayoutMode::Presentation,
            LayoutMode::Presentation => LayoutMode::Grid,
        }
    }
}

impl Default for LayoutMode {
    fn default() -> Self {
        LayoutMode::Grid
    }
}

/// Severity tag for toast notifications
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

/// The locally cached authenticated user.
///
/// Carries the session token plus whatever profile fields the identity
/// provider attached; those are kept opaque and round-tripped verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Session token, mirrored to the persisted `token` slot
    pub token: String,
    /// Opaque profile fields, flattened into the same JSON object
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            profile: serde_json::Map::new(),
        }
    }

    /// Attach an opaque profile field
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.profile.insert(key.into(), value);
        self
    }
}

/// Change notification broadcast by the session actor after each applied
/// transition, so subscribers can redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PinToggled(ParticipantId),
    MuteToggled(ParticipantId),
    VideoToggled(ParticipantId),
    RoomCreated(RoomId),
    ParticipantMoved {
        participant: ParticipantId,
        room: Option<RoomId>,
    },
    LayoutChanged(LayoutMode),
    AudioLevelChanged(ParticipantId, f32),
    SpeakingChanged(ParticipantId, bool),
}
