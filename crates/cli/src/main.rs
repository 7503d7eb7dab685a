//! Terminal front end.
//!
//! Reads commands from stdin and talks to a session driver. Moves can be
//! typed in long algebraic (`e2e4`) or SAN (`Nf3`, `O-O`, `e8=Q`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::{legal_moves, san, Color, Position};
use clap::{Parser, ValueEnum};
use game_session::driver::{self, SessionHandle};
use game_session::{
    GameSession, MoveOrigin, Opponent, PlayerId, SessionConfig, SessionEvent, Submission,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play chess in the terminal.
///
/// Commands: a move (`e2e4`, `Nf3`), `board`, `fen`, `moves`, `history`,
/// `undo`, `new`, `save <path>`, `quit`.
#[derive(Parser, Debug)]
struct Args {
    /// TOML session config; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    opponent: Option<OpponentArg>,

    /// Color you play.
    #[arg(long, value_enum)]
    color: Option<ColorArg>,

    /// Seed for the bot, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Your player id (a guest id is generated when omitted).
    #[arg(short, long)]
    user: Option<String>,

    /// Resume a game saved with `save`.
    #[arg(long, conflicts_with = "fen")]
    load: Option<PathBuf>,

    /// Start from this position instead of the standard one.
    #[arg(long, value_parser = parse_position)]
    fen: Option<Position>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpponentArg {
    Local,
    Bot,
    Remote,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorArg {
    White,
    Black,
}

fn parse_position(s: &str) -> Result<Position, String> {
    if s == "startpos" {
        Ok(Position::startpos())
    } else {
        Position::from_fen(s).map_err(|e| format!("expected `startpos` or a valid FEN: {e}"))
    }
}

impl Args {
    fn apply_overrides(&self, config: &mut SessionConfig) {
        if let Some(opponent) = self.opponent {
            config.opponent = match opponent {
                OpponentArg::Local => Opponent::Local,
                OpponentArg::Bot => Opponent::Bot,
                OpponentArg::Remote => Opponent::Remote,
            };
        }
        if let Some(color) = self.color {
            config.human_color = match color {
                ColorArg::White => Color::White,
                ColorArg::Black => Color::Black,
            };
        }
        if self.seed.is_some() {
            config.bot_seed = self.seed;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let session = build_session(&args)?;
    info!(session = %session.id(), seats = ?session.seats(), "game started");

    println!("{}", render_board(session.position()));
    let (handle, _task) = driver::spawn(session);
    tokio::spawn(print_events(handle.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !run_command(&handle, line).await? {
            break;
        }
    }
    Ok(())
}

fn build_session(args: &Args) -> Result<GameSession> {
    if let Some(path) = &args.load {
        return GameSession::load_json(path)
            .with_context(|| format!("failed to load game from {}", path.display()));
    }

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    args.apply_overrides(&mut config);

    let user = args
        .user
        .clone()
        .map(PlayerId::new)
        .unwrap_or_else(PlayerId::anonymous);
    Ok(match &args.fen {
        Some(pos) => GameSession::from_position(config, &user, pos.clone()),
        None => GameSession::new(config, &user),
    })
}

/// Handles one input line. Returns false on `quit`.
async fn run_command(handle: &SessionHandle, line: &str) -> Result<bool> {
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "quit" | "exit" => return Ok(false),
        "board" => {
            let snapshot = handle.snapshot().await?;
            println!("{}", render_board(snapshot.record.position()));
        }
        "fen" => {
            let snapshot = handle.snapshot().await?;
            println!("{}", snapshot.record.position().to_fen());
        }
        "moves" => {
            let snapshot = handle.snapshot().await?;
            let pos = snapshot.record.position();
            let list = legal_moves(pos)
                .into_iter()
                .map(|mv| san(pos, mv).unwrap_or_else(|_| mv.to_string()))
                .collect::<Vec<_>>();
            println!("{}", list.join(" "));
        }
        "history" => {
            let snapshot = handle.snapshot().await?;
            println!("{}", snapshot.record.movetext());
        }
        "undo" => {
            if handle.take_back().await? == 0 {
                println!("nothing to take back");
            }
        }
        "new" => handle.reset().await?,
        "save" => {
            if rest.is_empty() {
                println!("usage: save <path>");
            } else {
                let snapshot = handle.snapshot().await?;
                match snapshot.save(Path::new(rest)) {
                    Ok(()) => println!("saved to {rest}"),
                    Err(e) => println!("{e}"),
                }
            }
        }
        _ => match handle.submit(line, MoveOrigin::Local).await? {
            Submission::Accepted(_) => {}
            Submission::Rejected { attempted, reason } => println!("{attempted}: {reason}"),
        },
    }
    Ok(true)
}

async fn print_events(mut events: broadcast::Receiver<SessionEvent>) {
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event printer fell behind");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };
        match event {
            SessionEvent::MovePlayed(played) => {
                let who = match played.origin {
                    MoveOrigin::Bot => "bot".to_string(),
                    MoveOrigin::Remote(id) => id.to_string(),
                    MoveOrigin::Local => played.color.to_string(),
                };
                println!("{}. {who} plays {}", played.ply.div_ceil(2), played.san);
                if let Ok(pos) = Position::from_fen(&played.fen) {
                    println!("{}", render_board(&pos));
                }
            }
            SessionEvent::GameOver { outcome } => println!("game over: {outcome}"),
            SessionEvent::Reset { fen } => {
                println!("new game");
                if let Ok(pos) = Position::from_fen(&fen) {
                    println!("{}", render_board(&pos));
                }
            }
            SessionEvent::TakenBack { plies, fen } => {
                println!("took back {plies} ply");
                if let Ok(pos) = Position::from_fen(&fen) {
                    println!("{}", render_board(&pos));
                }
            }
            SessionEvent::MoveRejected { .. } => {}
        }
    }
}

fn render_board(pos: &Position) -> String {
    let mut out = String::with_capacity(200);
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let ch = chess_core::Square::from_coords(file, rank)
                .and_then(|sq| pos.piece_at(sq))
                .map(|pc| pc.fen_char())
                .unwrap_or('.');
            out.push(' ');
            out.push(ch);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out.push_str(&format!("{} to move", pos.side_to_move()));
    out
}
