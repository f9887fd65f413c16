// ============================
// crates/session-lib/src/controls.rs
// ============================
//! Local self-view controls.
//!
//! State for the embedder's own widgets: microphone, camera, raised hand,
//! output volume, fullscreen and panel visibility. This is device-local and
//! deliberately not routed through the session actor.
use serde::Serialize;

/// Glyph for the volume button
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

/// Overlay panels the embedder can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Participants,
    BreakoutRooms,
    Emoji,
}

/// Self-view widget state
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LocalControls {
    pub is_muted: bool,
    pub is_video_on: bool,
    pub hand_raised: bool,
    pub is_fullscreen: bool,
    /// Output volume in `[0, 1]`
    pub volume: f32,
    pub participants_panel: bool,
    pub breakout_panel: bool,
    pub emoji_panel: bool,
}

impl Default for LocalControls {
    fn default() -> Self {
        Self {
            is_muted: false,
            is_video_on: true,
            hand_raised: false,
            is_fullscreen: false,
            volume: 1.0,
            participants_panel: false,
            breakout_panel: false,
            emoji_panel: false,
        }
    }
}

impl LocalControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }

    pub fn toggle_video(&mut self) {
        self.is_video_on = !self.is_video_on;
    }

    pub fn toggle_hand(&mut self) {
        self.hand_raised = !self.hand_raised;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.is_fullscreen = !self.is_fullscreen;
    }

    pub fn toggle_panel(&mut self, panel: Panel) {
        let flag = match panel {
            Panel::Participants => &mut self.participants_panel,
            Panel::BreakoutRooms => &mut self.breakout_panel,
            Panel::Emoji => &mut self.emoji_panel,
        };
        *flag = !*flag;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Volume button action: mute, or restore full volume from mute
    pub fn toggle_volume_mute(&mut self) {
        self.volume = if self.volume == 0.0 { 1.0 } else { 0.0 };
    }

    /// Glyph for the current volume: muted at zero, low below one half
    pub fn volume_icon(&self) -> VolumeIcon {
        if self.volume == 0.0 {
            VolumeIcon::Muted
        } else if self.volume < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }
}
