//! The turn controller.

use chess_core::{
    evaluate_with, legal_moves, parse_move, ChessError, Color, GameRecord, Move, MoveSelector,
    Outcome, PieceKind, Position,
};
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{PromotionPolicy, SessionConfig};
use crate::error::SessionResult;
use crate::events::{MovePlayed, RejectReason, Submission};
use crate::player::{MoveOrigin, Participant, PlayerId, Seats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    /// Waiting for a human or remote player.
    AwaitingHumanMove,
    /// A submitted move is being checked and applied.
    ApplyingMove,
    AwaitingBotMove,
    GameOver,
}

/// Permission to play one bot move, valid until the session changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotTicket {
    epoch: u64,
}

/// One game between two seats.
///
/// Every move, whoever makes it, goes through [`GameSession::submit_move`]
/// or the bot ticket pair [`GameSession::pending_bot_move`] /
/// [`GameSession::play_bot_move`]. Rejected submissions leave the session
/// untouched. Each change of position bumps an internal epoch, which is what
/// invalidates bot tickets handed out before the change.
pub struct GameSession {
    id: Uuid,
    config: SessionConfig,
    seats: Seats,
    record: GameRecord,
    outcome: Outcome,
    state: TurnState,
    epoch: u64,
    bot: Box<dyn MoveSelector>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("seats", &self.seats)
            .field("state", &self.state)
            .field("outcome", &self.outcome)
            .field("plies", &self.record.len())
            .field("bot", &self.bot.name())
            .finish()
    }
}

pub(crate) fn default_bot(config: &SessionConfig) -> Box<dyn MoveSelector> {
    match config.bot_seed {
        Some(seed) => Box::new(RandomEngine::with_seed(seed)),
        None => Box::new(RandomEngine::new()),
    }
}

impl GameSession {
    /// A new game from the standard start position, with the random bot.
    pub fn new(config: SessionConfig, user: &PlayerId) -> Self {
        let bot = default_bot(&config);
        let seats = config.seats(user);
        Self::with_parts(config, seats, GameRecord::new(Position::startpos()), bot)
    }

    /// A new game from `start`, for example a position read from FEN.
    pub fn from_position(config: SessionConfig, user: &PlayerId, start: Position) -> Self {
        let bot = default_bot(&config);
        let seats = config.seats(user);
        Self::with_parts(config, seats, GameRecord::new(start), bot)
    }

    /// Replaces the bot strategy.
    pub fn with_selector(mut self, bot: Box<dyn MoveSelector>) -> Self {
        self.bot = bot;
        self.epoch += 1;
        self
    }

    pub(crate) fn with_parts(
        config: SessionConfig,
        seats: Seats,
        record: GameRecord,
        bot: Box<dyn MoveSelector>,
    ) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            config,
            seats,
            record,
            outcome: Outcome::Ongoing,
            state: TurnState::AwaitingHumanMove,
            epoch: 0,
            bot,
        };
        session.refresh();
        session
    }

    pub(crate) fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    pub fn position(&self) -> &Position {
        self.record.position()
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn side_to_move(&self) -> Color {
        self.position().side_to_move()
    }

    /// Seat whose turn it is.
    pub fn to_move(&self) -> &Participant {
        self.seats.get(self.side_to_move())
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.outcome.is_terminal() {
            return Vec::new();
        }
        legal_moves(self.position())
    }

    /// Submits a move typed as text (long algebraic or SAN).
    pub fn submit_text(&mut self, text: &str, origin: MoveOrigin) -> SessionResult<Submission> {
        if let Some(reason) = self.gate(&origin) {
            return Ok(self.reject(text, reason));
        }
        match parse_move(self.position(), text) {
            Ok(mv) => self.submit_move(mv, origin),
            Err(ChessError::InvalidMoveText(_)) => Ok(self.reject(text, RejectReason::Unparseable)),
            Err(e) => Err(e.into()),
        }
    }

    /// Single entry point for local and remote moves.
    pub fn submit_move(&mut self, mv: Move, origin: MoveOrigin) -> SessionResult<Submission> {
        if let Some(reason) = self.gate(&origin) {
            return Ok(self.reject(&mv.to_string(), reason));
        }
        let mv = self.fill_promotion(mv);

        let resume = self.state;
        self.state = TurnState::ApplyingMove;
        match self.record.play(mv) {
            Ok(ply) => {
                let san = ply.san.clone();
                Ok(Submission::Accepted(self.after_move(mv, san, origin)))
            }
            Err(ChessError::IllegalMove { reason, .. }) => {
                self.state = resume;
                Ok(self.reject(&mv.to_string(), RejectReason::Illegal(reason)))
            }
            Err(e) => {
                self.state = resume;
                Err(e.into())
            }
        }
    }

    /// A ticket for the bot's next move, when it is the bot's turn.
    pub fn pending_bot_move(&self) -> Option<BotTicket> {
        (self.state == TurnState::AwaitingBotMove).then_some(BotTicket { epoch: self.epoch })
    }

    /// Plays the bot's move. Returns `Ok(None)` without touching the session
    /// when the ticket went stale (the game moved on, was reset or taken
    /// back since it was issued).
    pub fn play_bot_move(&mut self, ticket: BotTicket) -> SessionResult<Option<MovePlayed>> {
        if ticket.epoch != self.epoch || self.state != TurnState::AwaitingBotMove {
            debug!(session = %self.id, "stale bot ticket ignored");
            return Ok(None);
        }

        let mv = self.bot.select_move(self.record.position())?;
        self.state = TurnState::ApplyingMove;
        let san = match self.record.play(mv) {
            Ok(ply) => ply.san.clone(),
            Err(e) => {
                self.state = TurnState::AwaitingBotMove;
                return Err(e.into());
            }
        };
        Ok(Some(self.after_move(mv, san, MoveOrigin::Bot)))
    }

    /// Starts a new game from the standard position with the same seats.
    pub fn reset(&mut self) {
        self.record = GameRecord::new(Position::startpos());
        self.bot.new_game();
        self.epoch += 1;
        self.refresh();
        info!(session = %self.id, "new game");
    }

    /// Undoes moves back to the most recent turn of a non-bot seat. Returns
    /// the number of plies removed (zero when there is nothing to undo).
    pub fn take_back(&mut self) -> usize {
        let len = self.record.len();
        if len == 0 {
            return 0;
        }

        let start_color = self.record.start().side_to_move();
        let color_at = |ply: usize| {
            if ply % 2 == 0 {
                start_color
            } else {
                start_color.other()
            }
        };
        // Ply `target` is the first one removed; it must have been a human's.
        let Some(target) = (0..len)
            .rev()
            .find(|&ply| !self.seats.get(color_at(ply)).is_bot())
        else {
            return 0;
        };

        self.record = self.record.truncated(target);
        self.epoch += 1;
        self.refresh();
        let removed = len - target;
        info!(session = %self.id, removed, "moves taken back");
        removed
    }

    /// Refuses moves that are not this origin's to make right now.
    fn gate(&self, origin: &MoveOrigin) -> Option<RejectReason> {
        match self.state {
            TurnState::GameOver => Some(RejectReason::GameOver),
            TurnState::AwaitingBotMove | TurnState::ApplyingMove => Some(RejectReason::NotYourTurn),
            TurnState::AwaitingHumanMove => {
                (!origin.may_move(self.to_move())).then_some(RejectReason::NotYourTurn)
            }
        }
    }

    fn reject(&self, attempted: &str, reason: RejectReason) -> Submission {
        debug!(session = %self.id, attempted, %reason, "move rejected");
        Submission::Rejected {
            attempted: attempted.to_string(),
            reason,
        }
    }

    /// Under [`PromotionPolicy::AutoQueen`], a pawn move to the last rank
    /// without a piece becomes a queen promotion.
    fn fill_promotion(&self, mv: Move) -> Move {
        if mv.promo.is_some() || self.config.promotion != PromotionPolicy::AutoQueen {
            return mv;
        }
        let pos = self.position();
        match pos.piece_at(mv.from) {
            Some(pc)
                if pc.kind == PieceKind::Pawn
                    && pc.color == pos.side_to_move()
                    && mv.to.rank() == pc.color.promotion_rank() =>
            {
                Move::with_promotion(mv.from, mv.to, PieceKind::Queen)
            }
            _ => mv,
        }
    }

    /// Bookkeeping after a ply was appended to the record.
    fn after_move(&mut self, mv: Move, san: String, origin: MoveOrigin) -> MovePlayed {
        self.epoch += 1;
        self.refresh();

        let ply = self.record.len();
        let played = MovePlayed {
            ply,
            color: self.side_to_move().other(),
            mv,
            san,
            origin,
            fen: self.position().to_fen(),
            outcome: self.outcome,
        };
        info!(
            session = %self.id,
            ply,
            san = %played.san,
            color = %played.color,
            "move played"
        );
        if self.outcome.is_terminal() {
            info!(session = %self.id, outcome = %self.outcome, "game over");
        }
        played
    }

    /// Recomputes outcome and turn state from the record.
    fn refresh(&mut self) {
        self.outcome = evaluate_with(
            self.record.position(),
            &self.config.draw_rules,
            Some(&self.record),
        );
        self.state = if self.outcome.is_terminal() {
            TurnState::GameOver
        } else if self.to_move().is_bot() {
            TurnState::AwaitingBotMove
        } else {
            TurnState::AwaitingHumanMove
        };
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
