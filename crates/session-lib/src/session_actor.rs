// ============================
// crates/session-lib/src/session_actor.rs
// ============================
//! Session actor: single-threaded ownership of the live session state.
//!
//! All transitions are applied inside one task, serialized over a command
//! channel, which preserves the one-logical-thread update model of the UI.
//! Applied transitions are broadcast as [`SessionEvent`]s for subscribers.
use crate::error::AppError;
use crate::layout::{render_plan, RenderPlan};
use crate::metrics::{LAYOUT_SWITCHED, PARTICIPANT_MOVED, ROOM_CREATED};
use crate::roster::Roster;
use liveclass_common::{
    BreakoutRoom, LayoutMode, Participant, ParticipantId, RoomId, SessionEvent,
};
use metrics::counter;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

/// Message sent *into* the actor
#[derive(Debug)]
pub enum ActorMsg {
    TogglePin {
        id: ParticipantId,
        resp_tx: mpsc::UnboundedSender<Result<(), AppError>>,
    },
    ToggleMute {
        id: ParticipantId,
        resp_tx: mpsc::UnboundedSender<Result<(), AppError>>,
    },
    ToggleVideo {
        id: ParticipantId,
        resp_tx: mpsc::UnboundedSender<Result<(), AppError>>,
    },
    CreateRoom {
        resp_tx: mpsc::UnboundedSender<Result<RoomId, AppError>>,
    },
    MoveToRoom {
        id: ParticipantId,
        room: Option<RoomId>,
        resp_tx: mpsc::UnboundedSender<Result<(), AppError>>,
    },
    CycleLayout {
        resp_tx: mpsc::UnboundedSender<Result<LayoutMode, AppError>>,
    },
    Snapshot {
        resp_tx: mpsc::UnboundedSender<Result<SessionSnapshot, AppError>>,
    },
    /// Fire-and-forget: high-frequency level updates carry no response
    SetAudioLevel { id: ParticipantId, level: f32 },
    SetSpeaking { id: ParticipantId, speaking: bool },
}

/// Point-in-time copy of the session state, for rendering
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub participants: Vec<Participant>,
    pub rooms: Vec<BreakoutRoom>,
    pub layout: LayoutMode,
}

impl SessionSnapshot {
    /// Derive the render partition for the snapshot's layout mode
    pub fn render_plan(&self) -> RenderPlan {
        render_plan(&self.participants, self.layout)
    }
}

/// Handle that embedders keep: command channel + event broadcast sender
#[derive(Clone)]
pub struct SessionHandle {
    pub cmd_tx: mpsc::UnboundedSender<ActorMsg>,
    pub events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn toggle_pin(&self, id: ParticipantId) -> Result<(), AppError> {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        self.cmd_tx.send(ActorMsg::TogglePin { id, resp_tx })?;
        recv_response(&mut resp_rx).await
    }

    pub async fn toggle_mute(&self, id: ParticipantId) -> Result<(), AppError> {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        self.cmd_tx.send(ActorMsg::ToggleMute { id, resp_tx })?;
        recv_response(&mut resp_rx).await
    }

    pub async fn toggle_video(&self, id: ParticipantId) -> Result<(), AppError> {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        self.cmd_tx.send(ActorMsg::ToggleVideo { id, resp_tx })?;
        recv_response(&mut resp_rx).await
    }

    pub async fn create_breakout_room(&self) -> Result<RoomId, AppError> {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        self.cmd_tx.send(ActorMsg::CreateRoom { resp_tx })?;
        recv_response(&mut resp_rx).await
    }

    pub async fn move_to_breakout_room(
        &self,
        id: ParticipantId,
        room: Option<RoomId>,
    ) -> Result<(), AppError> {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        self.cmd_tx.send(ActorMsg::MoveToRoom { id, room, resp_tx })?;
        recv_response(&mut resp_rx).await
    }

    /// Advance the layout one step and return the new mode
    pub async fn cycle_layout(&self) -> Result<LayoutMode, AppError> {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        self.cmd_tx.send(ActorMsg::CycleLayout { resp_tx })?;
        recv_response(&mut resp_rx).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, AppError> {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        self.cmd_tx.send(ActorMsg::Snapshot { resp_tx })?;
        recv_response(&mut resp_rx).await
    }

    pub fn set_audio_level(&self, id: ParticipantId, level: f32) -> Result<(), AppError> {
        self.cmd_tx.send(ActorMsg::SetAudioLevel { id, level })?;
        Ok(())
    }

    pub fn set_speaking(&self, id: ParticipantId, speaking: bool) -> Result<(), AppError> {
        self.cmd_tx.send(ActorMsg::SetSpeaking { id, speaking })?;
        Ok(())
    }
}

async fn recv_response<T>(
    resp_rx: &mut mpsc::UnboundedReceiver<Result<T, AppError>>,
) -> Result<T, AppError> {
    resp_rx
        .recv()
        .await
        .ok_or_else(|| AppError::Internal("no response from session actor".to_string()))?
}

pub struct SessionActor {
    roster: Roster,
    layout: LayoutMode,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionActor {
    pub fn new(roster: Roster, events: broadcast::Sender<SessionEvent>) -> Self {
        Self {
            roster,
            layout: LayoutMode::default(),
            events,
        }
    }

    fn emit(&self, event: SessionEvent) {
        // nobody listening is fine
        let _ = self.events.send(event);
    }

    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<ActorMsg>) {
        while let Some(msg) = rx.recv().await {
            match msg {
                ActorMsg::TogglePin { id, resp_tx } => {
                    let result = self.roster.toggle_pin(id);
                    if result.is_ok() {
                        self.emit(SessionEvent::PinToggled(id));
                    }
                    let _ = resp_tx.send(result);
                }
                ActorMsg::ToggleMute { id, resp_tx } => {
                    let result = self.roster.toggle_mute(id);
                    if result.is_ok() {
                        self.emit(SessionEvent::MuteToggled(id));
                    }
                    let _ = resp_tx.send(result);
                }
                ActorMsg::ToggleVideo { id, resp_tx } => {
                    let result = self.roster.toggle_video(id);
                    if result.is_ok() {
                        self.emit(SessionEvent::VideoToggled(id));
                    }
                    let _ = resp_tx.send(result);
                }
                ActorMsg::CreateRoom { resp_tx } => {
                    let room_id = self.roster.create_breakout_room();
                    counter!(ROOM_CREATED).increment(1);
                    self.emit(SessionEvent::RoomCreated(room_id));
                    let _ = resp_tx.send(Ok(room_id));
                }
                ActorMsg::MoveToRoom { id, room, resp_tx } => {
                    let result = self.roster.move_to_breakout_room(id, room);
                    if result.is_ok() {
                        counter!(PARTICIPANT_MOVED).increment(1);
                        self.emit(SessionEvent::ParticipantMoved {
                            participant: id,
                            room,
                        });
                    }
                    let _ = resp_tx.send(result);
                }
                ActorMsg::CycleLayout { resp_tx } => {
                    self.layout = self.layout.next();
                    counter!(LAYOUT_SWITCHED).increment(1);
                    self.emit(SessionEvent::LayoutChanged(self.layout));
                    let _ = resp_tx.send(Ok(self.layout));
                }
                ActorMsg::Snapshot { resp_tx } => {
                    let snapshot = SessionSnapshot {
                        participants: self.roster.participants().to_vec(),
                        rooms: self.roster.rooms().to_vec(),
                        layout: self.layout,
                    };
                    let _ = resp_tx.send(Ok(snapshot));
                }
                ActorMsg::SetAudioLevel { id, level } => match self.roster.set_audio_level(id, level)
                {
                    Ok(()) => self.emit(SessionEvent::AudioLevelChanged(id, level.clamp(0.0, 1.0))),
                    Err(err) => warn!("dropping audio level update: {err}"),
                },
                ActorMsg::SetSpeaking { id, speaking } => {
                    match self.roster.set_speaking(id, speaking) {
                        Ok(()) => self.emit(SessionEvent::SpeakingChanged(id, speaking)),
                        Err(err) => warn!("dropping speaking update: {err}"),
                    }
                }
            }
        }
    }
}

/// Spawn a session actor over the seeded collections and return its handle
pub fn spawn_session(
    participants: Vec<Participant>,
    rooms: Vec<BreakoutRoom>,
    event_capacity: usize,
) -> SessionHandle {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (events, _) = broadcast::channel(event_capacity);
    let actor = SessionActor::new(Roster::new(participants, rooms), events.clone());

    tokio::spawn(actor.run(cmd_rx));

    SessionHandle { cmd_tx, events }
}
