// ============================
// crates/session-lib/src/layout.rs
// ============================
//! Render-plan derivation.
//!
//! A pure function from the participant collection and the active layout
//! mode to a render partition. No state is read or written here; the
//! embedding UI calls this on every redraw.
use liveclass_common::{LayoutMode, Participant, ParticipantId};
use serde::Serialize;

/// How much surface a tile occupies
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TileSize {
    /// Full-size focus surface (spotlight pin, presentation screen-share)
    Primary,
    /// Regular grid cell
    Uniform,
    /// Secondary strip cell below a primary surface
    Thumbnail,
    /// Spans the full row width regardless of the surrounding grid
    FullWidth,
}

/// One participant's slot in the render plan
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Tile {
    pub participant: ParticipantId,
    pub size: TileSize,
    /// Video is off: render the initial-letter avatar instead
    pub show_avatar: bool,
    /// Level-meter overlay, present while audible and unmuted
    pub audio_bar: Option<f32>,
}

/// The computed render partition for one frame
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub mode: LayoutMode,
    /// Full-size focus tile, when the mode produces one
    pub primary: Option<Tile>,
    /// Remaining tiles, in roster order
    pub tiles: Vec<Tile>,
}

fn tile(p: &Participant, size: TileSize) -> Tile {
    // a screen-sharer spans the full width whatever the mode planned for it
    let size = if p.is_screen_sharing && size != TileSize::Primary {
        TileSize::FullWidth
    } else {
        size
    };

    let audio_bar = if p.audio_level > 0.0 && !p.is_muted {
        Some(p.audio_level)
    } else {
        None
    };

    Tile {
        participant: p.id,
        size,
        show_avatar: p.is_video_off,
        audio_bar,
    }
}

/// Compute the render partition for the given mode.
///
/// - grid: everyone renders uniformly, including a pinned participant
/// - spotlight: the pinned participant is the primary surface and the rest
///   form a thumbnail strip; with nobody pinned it degrades to a uniform list
/// - presentation: the screen-sharer is the primary surface and the rest form
///   a thumbnail strip; with nobody sharing it degrades to a uniform list
pub fn render_plan(participants: &[Participant], mode: LayoutMode) -> RenderPlan {
    let focus = match mode {
        LayoutMode::Grid => None,
        LayoutMode::Spotlight => participants.iter().find(|p| p.is_pinned),
        LayoutMode::Presentation => participants.iter().find(|p| p.is_screen_sharing),
    };

    match focus {
        Some(focused) => RenderPlan {
            mode,
            primary: Some(tile(focused, TileSize::Primary)),
            tiles: participants
                .iter()
                .filter(|p| p.id != focused.id)
                .map(|p| tile(p, TileSize::Thumbnail))
                .collect(),
        },
        None => RenderPlan {
            mode,
            primary: None,
            tiles: participants
                .iter()
                .map(|p| tile(p, TileSize::Uniform))
                .collect(),
        },
    }
}
