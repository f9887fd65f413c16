// ==============
// crates/session-lib/src/metrics.rs

//! Central place for metric keys
pub const TOAST_SHOWN: &str = "toast.shown";
pub const TOAST_EXPIRED: &str = "toast.expired";
pub const TOAST_DISMISSED: &str = "toast.dismissed";
pub const TOAST_ACTIVE: &str = "toast.active";
pub const AUTH_LOGIN: &str = "auth.login";
pub const AUTH_LOGOUT: &str = "auth.logout";
pub const AUTH_RESTORED: &str = "auth.session_restored";
pub const AUTH_RESTORE_REJECTED: &str = "auth.restore_rejected";
pub const ROOM_CREATED: &str = "room.created";
pub const PARTICIPANT_MOVED: &str = "room.participant_moved";
pub const LAYOUT_SWITCHED: &str = "layout.switched";
