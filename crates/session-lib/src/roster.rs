// ============================
// crates/session-lib/src/roster.rs
// ============================
//! Participant and breakout-room state core.
//!
//! Pure synchronous transitions over the seeded collections. Every operation
//! validates its ids before touching anything, so a failed call leaves the
//! state exactly as it was. The session actor owns one `Roster` and is the
//! only writer.
use crate::error::AppError;
use liveclass_common::{BreakoutRoom, Participant, ParticipantId, RoomId};

/// The in-memory session roster: participants plus breakout rooms.
///
/// Invariants upheld by the operations:
/// - at most one participant has `is_pinned == true`
/// - a participant id appears in the member list of at most one room
/// - `Participant::breakout_room` agrees with the room member lists
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
    rooms: Vec<BreakoutRoom>,
}

impl Roster {
    /// Build a roster from seeded collections. The participant set is fixed
    /// for the life of the session.
    pub fn new(participants: Vec<Participant>, rooms: Vec<BreakoutRoom>) -> Self {
        Self {
            participants,
            rooms,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn rooms(&self) -> &[BreakoutRoom] {
        &self.rooms
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    fn participant_mut(&mut self, id: ParticipantId) -> Result<&mut Participant, AppError> {
        self.participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::ParticipantNotFound(id))
    }

    /// The participant rendered as primary focus in spotlight layout, if any
    pub fn pinned(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_pinned)
    }

    /// The participant currently sharing their screen, if any
    pub fn screen_sharer(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_screen_sharing)
    }

    /// Resolve a room's member ids to participants.
    /// Member ids with no matching participant are skipped.
    pub fn room_members(&self, room_id: RoomId) -> Result<Vec<&Participant>, AppError> {
        let room = self
            .rooms
            .iter()
            .find(|r| r.id == room_id)
            .ok_or(AppError::RoomNotFound(room_id))?;

        Ok(room
            .participants
            .iter()
            .filter_map(|id| self.participant(*id))
            .collect())
    }

    /// Flip the pin on the matching participant and clear it on all others.
    /// Pinning an already-pinned participant unpins them.
    pub fn toggle_pin(&mut self, id: ParticipantId) -> Result<(), AppError> {
        if self.participant(id).is_none() {
            return Err(AppError::ParticipantNotFound(id));
        }

        for p in &mut self.participants {
            p.is_pinned = if p.id == id { !p.is_pinned } else { false };
        }

        Ok(())
    }

    /// Flip the mute flag on the matching participant only
    pub fn toggle_mute(&mut self, id: ParticipantId) -> Result<(), AppError> {
        let p = self.participant_mut(id)?;
        p.is_muted = !p.is_muted;
        Ok(())
    }

    /// Flip the video-off flag on the matching participant only
    pub fn toggle_video(&mut self, id: ParticipantId) -> Result<(), AppError> {
        let p = self.participant_mut(id)?;
        p.is_video_off = !p.is_video_off;
        Ok(())
    }

    /// Update the live audio level, clamped to `[0, 1]`
    pub fn set_audio_level(&mut self, id: ParticipantId, level: f32) -> Result<(), AppError> {
        let p = self.participant_mut(id)?;
        p.audio_level = level.clamp(0.0, 1.0);
        Ok(())
    }

    /// Update the speaking indicator
    pub fn set_speaking(&mut self, id: ParticipantId, speaking: bool) -> Result<(), AppError> {
        let p = self.participant_mut(id)?;
        p.is_speaking = speaking;
        Ok(())
    }

    /// Append a new empty room with an auto-numbered display name.
    /// Rooms are never deleted, so `len + 1` stays unique.
    pub fn create_breakout_room(&mut self) -> RoomId {
        let id = self.rooms.len() as RoomId + 1;
        self.rooms.push(BreakoutRoom::new(id, format!("Group {id}")));
        id
    }

    /// Move a participant into a room, or out of every room when `room` is
    /// `None`. The id is removed from every other room's member list so it
    /// appears in at most one.
    pub fn move_to_breakout_room(
        &mut self,
        participant_id: ParticipantId,
        room: Option<RoomId>,
    ) -> Result<(), AppError> {
        if self.participant(participant_id).is_none() {
            return Err(AppError::ParticipantNotFound(participant_id));
        }
        if let Some(room_id) = room {
            if !self.rooms.iter().any(|r| r.id == room_id) {
                return Err(AppError::RoomNotFound(room_id));
            }
        }

        for r in &mut self.rooms {
            r.participants.retain(|id| *id != participant_id);
            if Some(r.id) == room {
                r.participants.push(participant_id);
            }
        }

        // keep the participant-side assignment in agreement
        self.participant_mut(participant_id)?.breakout_room = room;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liveclass_common::Role;

    fn classroom() -> Roster {
        let mut teacher = Participant::new(1, "Teacher Smith", Role::Teacher);
        teacher.is_speaking = true;
        teacher.is_pinned = true;
        teacher.audio_level = 0.8;

        let mut john = Participant::new(2, "John Doe", Role::Student);
        john.hand_raised = true;
        john.is_muted = true;

        let mut jane = Participant::new(3, "Jane Smith", Role::Student);
        jane.is_video_off = true;
        jane.audio_level = 0.3;

        let mut mike = Participant::new(4, "Mike Johnson", Role::Student);
        mike.is_screen_sharing = true;
        mike.audio_level = 0.5;

        let mut group1 = BreakoutRoom::new(1, "Group 1");
        group1.participants = vec![2, 3];
        let mut group2 = BreakoutRoom::new(2, "Group 2");
        group2.participants = vec![4];

        Roster::new(vec![teacher, john, jane, mike], vec![group1, group2])
    }

    #[test]
    fn test_toggle_pin_moves_the_pin() {
        let mut roster = classroom();

        roster.toggle_pin(2).unwrap();

        let pinned: Vec<ParticipantId> = roster
            .participants()
            .iter()
            .filter(|p| p.is_pinned)
            .map(|p| p.id)
            .collect();
        assert_eq!(pinned, vec![2]);
    }

    #[test]
    fn test_toggle_pin_on_pinned_participant_unpins() {
        // participants [{id:1, pinned:true}]; toggle_pin(1) clears the flag
        let mut p = Participant::new(1, "Solo", Role::Teacher);
        p.is_pinned = true;
        let mut roster = Roster::new(vec![p], vec![]);

        roster.toggle_pin(1).unwrap();

        assert!(!roster.participants()[0].is_pinned);
        assert!(roster.pinned().is_none());
    }

    #[test]
    fn test_toggle_pin_unknown_id_is_an_error_and_changes_nothing() {
        let mut roster = classroom();
        let before = roster.participants().to_vec();

        let err = roster.toggle_pin(99).unwrap_err();

        assert!(matches!(err, AppError::ParticipantNotFound(99)));
        assert_eq!(roster.participants(), &before[..]);
    }

    #[test]
    fn test_toggle_mute_touches_only_the_target() {
        let mut roster = classroom();

        roster.toggle_mute(2).unwrap();
        assert!(!roster.participant(2).unwrap().is_muted);

        roster.toggle_mute(3).unwrap();
        assert!(roster.participant(3).unwrap().is_muted);
        assert!(!roster.participant(1).unwrap().is_muted);
    }

    #[test]
    fn test_toggle_video_flips_flag() {
        let mut roster = classroom();

        roster.toggle_video(3).unwrap();
        assert!(!roster.participant(3).unwrap().is_video_off);

        roster.toggle_video(3).unwrap();
        assert!(roster.participant(3).unwrap().is_video_off);
    }

    #[test]
    fn test_audio_level_is_clamped() {
        let mut roster = classroom();

        roster.set_audio_level(2, 1.7).unwrap();
        assert_eq!(roster.participant(2).unwrap().audio_level, 1.0);

        roster.set_audio_level(2, -0.4).unwrap();
        assert_eq!(roster.participant(2).unwrap().audio_level, 0.0);
    }

    #[test]
    fn test_create_breakout_room_auto_numbers() {
        let mut roster = classroom();

        let id = roster.create_breakout_room();

        assert_eq!(id, 3);
        let room = roster.rooms().last().unwrap();
        assert_eq!(room.name, "Group 3");
        assert!(room.participants.is_empty());
    }

    #[test]
    fn test_move_between_rooms() {
        // rooms [{id:1, members:[2]}, {id:2, members:[]}]; move(2, Some(2))
        let p = Participant::new(2, "John Doe", Role::Student);
        let mut group1 = BreakoutRoom::new(1, "Group 1");
        group1.participants = vec![2];
        let group2 = BreakoutRoom::new(2, "Group 2");
        let mut roster = Roster::new(vec![p], vec![group1, group2]);

        roster.move_to_breakout_room(2, Some(2)).unwrap();

        assert!(roster.rooms()[0].participants.is_empty());
        assert_eq!(roster.rooms()[1].participants, vec![2]);
        assert_eq!(roster.participant(2).unwrap().breakout_room, Some(2));
    }

    #[test]
    fn test_move_to_none_removes_from_every_room() {
        let mut roster = classroom();

        roster.move_to_breakout_room(2, None).unwrap();

        for room in roster.rooms() {
            assert!(!room.participants.contains(&2));
        }
        assert_eq!(roster.participant(2).unwrap().breakout_room, None);
    }

    #[test]
    fn test_move_appears_in_at_most_one_room() {
        let mut roster = classroom();

        roster.move_to_breakout_room(3, Some(2)).unwrap();

        let containing: Vec<RoomId> = roster
            .rooms()
            .iter()
            .filter(|r| r.participants.contains(&3))
            .map(|r| r.id)
            .collect();
        assert_eq!(containing, vec![2]);
    }

    #[test]
    fn test_move_to_unknown_room_changes_nothing() {
        let mut roster = classroom();

        let err = roster.move_to_breakout_room(2, Some(9)).unwrap_err();

        assert!(matches!(err, AppError::RoomNotFound(9)));
        // the participant was not pulled out of its current room
        assert_eq!(roster.rooms()[0].participants, vec![2, 3]);
    }

    #[test]
    fn test_room_members_skips_dangling_ids() {
        let p = Participant::new(2, "John Doe", Role::Student);
        let mut group = BreakoutRoom::new(1, "Group 1");
        group.participants = vec![2, 42]; // 42 has no participant entry
        let roster = Roster::new(vec![p], vec![group]);

        let members = roster.room_members(1).unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, 2);
    }

    #[test]
    fn test_derived_views() {
        let roster = classroom();

        assert_eq!(roster.pinned().unwrap().id, 1);
        assert_eq!(roster.screen_sharer().unwrap().id, 4);
        assert!(roster.room_members(9).is_err());
    }
}
