//! Async driver: one tokio task per game.
//!
//! The task owns the [`GameSession`]. Local and remote submissions arrive on
//! one `mpsc` channel, so they are applied strictly one after another.
//! Results are published on a `broadcast` channel as [`SessionEvent`]s.
//! When the bot is to move, its move is scheduled `bot_delay_ms` later; any
//! command that changes the game before the deadline cancels it.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, warn};

use crate::error::{SessionError, SessionResult};
use crate::events::{SessionEvent, Submission};
use crate::persist::GameSnapshot;
use crate::player::MoveOrigin;
use crate::session::{BotTicket, GameSession};

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 64;

/// Requests understood by the driver task.
#[derive(Debug)]
pub enum Command {
    Submit {
        text: String,
        origin: MoveOrigin,
        reply: oneshot::Sender<SessionResult<Submission>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    TakeBack {
        reply: oneshot::Sender<usize>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
}

/// Cloneable handle to a running driver.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<SessionEvent>,
}

/// Starts the driver task for `session`.
///
/// The task ends when every handle has been dropped.
pub fn spawn(session: GameSession) -> (SessionHandle, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
    let (event_tx, _) = broadcast::channel(EVENT_BUFFER);
    let handle = SessionHandle {
        commands: cmd_tx,
        events: event_tx.clone(),
    };
    let task = tokio::spawn(run(session, cmd_rx, event_tx));
    (handle, task)
}

impl SessionHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn submit(
        &self,
        text: impl Into<String>,
        origin: MoveOrigin,
    ) -> SessionResult<Submission> {
        let text = text.into();
        self.request(|reply| Command::Submit {
            text,
            origin,
            reply,
        })
        .await?
    }

    pub async fn reset(&self) -> SessionResult<()> {
        self.request(|reply| Command::Reset { reply }).await
    }

    pub async fn take_back(&self) -> SessionResult<usize> {
        self.request(|reply| Command::TakeBack { reply }).await
    }

    pub async fn snapshot(&self) -> SessionResult<GameSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> SessionResult<T> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(make(tx))
            .await
            .map_err(|_| SessionError::DriverClosed)?;
        rx.await.map_err(|_| SessionError::DriverClosed)
    }
}

async fn run(
    mut session: GameSession,
    mut commands: mpsc::Receiver<Command>,
    events: broadcast::Sender<SessionEvent>,
) {
    let delay = Duration::from_millis(session.config().bot_delay_ms);
    let mut scheduled: Option<(BotTicket, Instant)> = None;
    // A ticket the bot failed on is not retried until the game changes.
    let mut stalled: Option<BotTicket> = None;

    loop {
        // Drop a schedule the last command made obsolete, then schedule anew.
        let pending = session.pending_bot_move();
        if let Some((ticket, _)) = scheduled {
            if pending != Some(ticket) {
                debug!(session = %session.id(), "scheduled bot move cancelled");
                scheduled = None;
            }
        }
        if scheduled.is_none() && pending != stalled {
            scheduled = pending.map(|ticket| (ticket, Instant::now() + delay));
        }
        let deadline = scheduled.map(|(_, at)| at).unwrap_or_else(Instant::now);

        tokio::select! {
            cmd = commands.recv() => match cmd {
                Some(cmd) => handle_command(&mut session, cmd, &events),
                None => break,
            },
            _ = sleep_until(deadline), if scheduled.is_some() => {
                if let Some((ticket, _)) = scheduled.take() {
                    if !play_bot(&mut session, ticket, &events) {
                        stalled = Some(ticket);
                    }
                }
            }
        }
    }
    debug!(session = %session.id(), "driver stopped");
}

fn handle_command(
    session: &mut GameSession,
    cmd: Command,
    events: &broadcast::Sender<SessionEvent>,
) {
    match cmd {
        Command::Submit {
            text,
            origin,
            reply,
        } => {
            let result = session.submit_text(&text, origin.clone());
            match &result {
                Ok(Submission::Accepted(played)) => {
                    publish(events, SessionEvent::MovePlayed(played.clone()));
                    if played.outcome.is_terminal() {
                        publish(
                            events,
                            SessionEvent::GameOver {
                                outcome: played.outcome,
                            },
                        );
                    }
                }
                Ok(Submission::Rejected { attempted, reason }) => publish(
                    events,
                    SessionEvent::MoveRejected {
                        attempted: attempted.clone(),
                        reason: reason.clone(),
                        origin,
                    },
                ),
                Err(e) => error!(session = %session.id(), error = %e, "submission failed"),
            }
            if reply.send(result).is_err() {
                warn!(session = %session.id(), "submitter went away before the reply");
            }
        }
        Command::Reset { reply } => {
            session.reset();
            publish(
                events,
                SessionEvent::Reset {
                    fen: session.position().to_fen(),
                },
            );
            if reply.send(()).is_err() {
                warn!(session = %session.id(), "reset requester went away");
            }
        }
        Command::TakeBack { reply } => {
            let plies = session.take_back();
            if plies > 0 {
                publish(
                    events,
                    SessionEvent::TakenBack {
                        plies,
                        fen: session.position().to_fen(),
                    },
                );
            }
            if reply.send(plies).is_err() {
                warn!(session = %session.id(), "take-back requester went away");
            }
        }
        Command::Snapshot { reply } => {
            if reply.send(session.snapshot()).is_err() {
                warn!(session = %session.id(), "snapshot requester went away");
            }
        }
    }
}

/// Returns false when the bot could not produce a legal move.
fn play_bot(
    session: &mut GameSession,
    ticket: BotTicket,
    events: &broadcast::Sender<SessionEvent>,
) -> bool {
    match session.play_bot_move(ticket) {
        Ok(Some(played)) => {
            let outcome = played.outcome;
            publish(events, SessionEvent::MovePlayed(played));
            if outcome.is_terminal() {
                publish(events, SessionEvent::GameOver { outcome });
            }
            true
        }
        Ok(None) => {
            debug!(session = %session.id(), "bot move suppressed");
            true
        }
        Err(e) => {
            error!(session = %session.id(), error = %e, "bot failed to move");
            false
        }
    }
}

fn publish(events: &broadcast::Sender<SessionEvent>, event: SessionEvent) {
    // No subscribers is fine: nobody is watching this game.
    let _ = events.send(event);
}
