// ============================
// crates/session-bin/src/main.rs
// ============================
//! Demo driver: seeds a classroom session and walks the engine through a
//! short scripted sequence, logging every broadcast event.
use clap::Parser;
use liveclass_common::{BreakoutRoom, Participant, Role, ToastKind, UserRecord};
use liveclass_session_lib::config::Settings;
use liveclass_session_lib::storage::FlatFileStore;
use liveclass_session_lib::ClientState;
use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "liveclass-session", about = "Run a simulated liveclass session")]
struct Args {
    /// Settings file
    #[arg(long, default_value = "liveclass.toml")]
    config: PathBuf,

    /// Override the persisted-session directory
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// The seeded classroom: one teacher, three students, two breakout groups
fn classroom_roster() -> (Vec<Participant>, Vec<BreakoutRoom>) {
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

    (vec![teacher, john, jane, mike], vec![group1, group2])
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load_from(&args.config)?;
    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    let store = FlatFileStore::new(&settings.data_dir)?;
    let (participants, rooms) = classroom_roster();
    let state = ClientState::new(store, settings, participants, rooms).await;

    // restore the cached session, or sign in fresh
    match state.auth.current_user().await {
        Some(user) => info!(token = %user.token, "resumed cached session"),
        None => {
            let user = UserRecord::new(Uuid::new_v4().to_string())
                .with_field("name", serde_json::json!("Teacher Smith"))
                .with_field("role", serde_json::json!("teacher"));
            state.auth.login(user).await?;
            state
                .toasts
                .show("Signed in as Teacher Smith", ToastKind::Success)
                .await;
        }
    }

    // log every change the actor broadcasts
    let mut events = state.session.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!(?event, "session event");
        }
    });

    let snapshot = state.session.snapshot().await?;
    info!(
        participants = snapshot.participants.len(),
        rooms = snapshot.rooms.len(),
        "session ready"
    );

    // walk the roster through a typical minute of class
    state.session.toggle_mute(2).await?;
    state.session.toggle_pin(4).await?;
    state
        .toasts
        .show("Mike Johnson is sharing their screen", ToastKind::Info)
        .await;

    let mut rng = rand::rng();
    for id in [1, 3, 4] {
        state.session.set_audio_level(id, rng.random_range(0.0..1.0))?;
    }

    let room = state.session.create_breakout_room().await?;
    state.session.move_to_breakout_room(3, Some(room)).await?;
    state
        .toasts
        .show("Jane Smith moved to Group 3", ToastKind::Info)
        .await;

    // show each layout's render partition
    let plan = state.session.snapshot().await?.render_plan();
    println!("{}", serde_json::to_string_pretty(&plan)?);
    for _ in 0..2 {
        let mode = state.session.cycle_layout().await?;
        let plan = state.session.snapshot().await?.render_plan();
        info!(?mode, tiles = plan.tiles.len(), primary = plan.primary.is_some(), "layout");
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }

    // let the toast timers run out before shutting down
    tokio::time::sleep(state.settings.toast_ttl() + Duration::from_millis(200)).await;
    let remaining = state.toasts.active().await;
    info!(remaining = remaining.len(), "toasts after expiry");
    state.toasts.close().await;

    Ok(())
}
