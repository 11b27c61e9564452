//! Persistent game state.
//!
//! One `Game` instance owns everything a match needs: the stable participant
//! order, each participant's record (queue, score, board), the remaining
//! person/house pools, the once-shuffled shared bag, the queue watermark,
//! the per-color goal counters, and the winner. All of it serializes as an
//! opaque snapshot; the transient turn scratch is skipped and rebuilt by
//! `begin_turn` after a reload.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::core::{GameConfig, GameRng, ParticipantId, ParticipantRecord};
use crate::game::turn::TurnState;
use crate::pieces::{draw_bag, Piece, COLOR_COUNT};

/// A complete game of walking people home.
///
/// ```
/// use trailhome::Game;
///
/// let mut game = Game::new(["alice", "bob"], 42);
/// game.begin_turn("alice");
/// assert!(game.get_next_piece().is_person());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Scoring parameters.
    config: GameConfig,

    /// Participants in join order. Every enumeration that affects outcomes
    /// (pair counts, tie-break order) walks this list.
    participant_order: Vec<ParticipantId>,

    /// Per-participant records, keyed by id.
    records: FxHashMap<ParticipantId, ParticipantRecord>,

    /// House pieces not yet placed on any board, colors in ascending order.
    remaining_houses: Vec<Piece>,

    /// Person pieces not yet placed on any board, colors in ascending order.
    remaining_persons: Vec<Piece>,

    /// The shared bag: the canonical tile set, shuffled once at creation.
    piece_bag: Vec<Piece>,

    /// Minimum personal-queue length across participants. Joiners' queues
    /// are truncated from the front to this watermark so everyone plays the
    /// same pieces.
    min_pieces_left: usize,

    /// Points still awarded for reaching each color's goal, indexed by
    /// color minus one. Decays by one per reach, floored at zero.
    goal_points: Vec<i64>,

    /// Winner id once decided; a comma-joined list on a tie; empty until
    /// then.
    winner: String,

    /// Turn in progress, if any. Never persisted.
    #[serde(skip)]
    pub(crate) turn: Option<TurnState>,
}

impl Game {
    /// Create a game for the given participants with default scoring.
    ///
    /// The shared bag is shuffled exactly once, here, from `seed`.
    /// Duplicate participant ids are ignored.
    #[must_use]
    pub fn new<I, P>(participants: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        Self::with_config(participants, seed, GameConfig::default())
    }

    /// Create a game with explicit scoring parameters.
    #[must_use]
    pub fn with_config<I, P>(participants: I, seed: u64, config: GameConfig) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        let mut rng = GameRng::new(seed);
        let piece_bag = draw_bag(&mut rng);
        let min_pieces_left = piece_bag.len();

        let mut remaining_houses = Vec::with_capacity(COLOR_COUNT as usize);
        let mut remaining_persons = Vec::with_capacity(COLOR_COUNT as usize);
        for color in 1..=COLOR_COUNT {
            remaining_houses.push(Piece::house(color));
            remaining_persons.push(Piece::person(color));
        }

        let mut game = Self {
            config,
            participant_order: Vec::new(),
            records: FxHashMap::default(),
            remaining_houses,
            remaining_persons,
            piece_bag,
            min_pieces_left,
            goal_points: vec![config.max_goal_points; COLOR_COUNT as usize],
            winner: String::new(),
            turn: None,
        };
        for participant in participants {
            game.add_participant(participant);
        }
        game
    }

    /// Add a participant if they are not already in the game.
    ///
    /// A joiner is dealt a copy of the shared bag truncated from the front
    /// to the current watermark, keeping them in lock-step with the pieces
    /// everyone else still has left.
    pub fn add_participant(&mut self, participant: impl Into<ParticipantId>) {
        let id = participant.into();
        if self.records.contains_key(id.as_str()) {
            return;
        }
        let record = ParticipantRecord::deal(&self.piece_bag, self.min_pieces_left);
        debug!(participant = %id, queue = record.queue().len(), "participant joined");
        self.participant_order.push(id.clone());
        self.records.insert(id, record);
    }

    // === Accessors ===

    /// Scoring parameters.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Participants in join order.
    #[must_use]
    pub fn participants(&self) -> &[ParticipantId] {
        &self.participant_order
    }

    /// A participant's permanent board.
    #[must_use]
    pub fn board(&self, participant: &str) -> Option<&Board> {
        self.records.get(participant).map(ParticipantRecord::board)
    }

    /// Mutable access to a participant's permanent board, for scenario
    /// setup and persistence layers. Never touches the working board of a
    /// turn in progress.
    pub fn board_mut(&mut self, participant: &str) -> Option<&mut Board> {
        self.records.get_mut(participant).map(|r| &mut r.board)
    }

    /// A participant's score.
    #[must_use]
    pub fn score(&self, participant: &str) -> Option<i64> {
        self.records.get(participant).map(ParticipantRecord::score)
    }

    /// A participant's personal queue of pieces still to play, front first.
    #[must_use]
    pub fn pieces_to_play(&self, participant: &str) -> Option<&[Piece]> {
        self.records.get(participant).map(ParticipantRecord::queue)
    }

    /// The shared watermark: the minimum personal-queue length across
    /// participants.
    #[must_use]
    pub fn pieces_left_in_bag(&self) -> usize {
        self.min_pieces_left
    }

    /// Points still awarded for reaching this color's goal. Zero for colors
    /// outside 1-4.
    #[must_use]
    pub fn goal_points_remaining(&self, color: u8) -> i64 {
        usize::from(color)
            .checked_sub(1)
            .and_then(|i| self.goal_points.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// The winner's id, a comma-joined list on a tie, or an empty string
    /// while the game is still running.
    #[must_use]
    pub fn winner(&self) -> &str {
        &self.winner
    }

    // === Snapshot ===

    /// Serialize the persistent state as opaque snapshot bytes. The turn in
    /// progress is not part of the snapshot.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Restore a game from snapshot bytes. The restored game has no turn in
    /// progress; call `begin_turn` before playing.
    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }

    // === Crate-internal helpers ===

    pub(crate) fn record(&self, participant: &str) -> &ParticipantRecord {
        self.records
            .get(participant)
            .expect("participant record must exist")
    }

    pub(crate) fn record_mut(&mut self, participant: &str) -> &mut ParticipantRecord {
        self.records
            .get_mut(participant)
            .expect("participant record must exist")
    }

    pub(crate) fn has_participant(&self, participant: &str) -> bool {
        self.records.contains_key(participant)
    }

    pub(crate) fn participant_count(&self) -> usize {
        self.participant_order.len()
    }

    pub(crate) fn remaining_persons(&self) -> &[Piece] {
        &self.remaining_persons
    }

    pub(crate) fn remaining_houses(&self) -> &[Piece] {
        &self.remaining_houses
    }

    pub(crate) fn remove_from_pools(&mut self, piece: Piece) {
        if piece.is_person() {
            remove_first(&mut self.remaining_persons, piece);
        } else if piece.is_house() {
            remove_first(&mut self.remaining_houses, piece);
        }
    }

    pub(crate) fn refresh_watermark(&mut self) {
        if let Some(min) = self.records.values().map(|r| r.queue.len()).min() {
            self.min_pieces_left = min;
        }
    }

    pub(crate) fn all_queues_empty(&self) -> bool {
        !self.records.is_empty() && self.records.values().all(|r| r.queue.is_empty())
    }

    pub(crate) fn award_goal_points(&mut self, color: u8) -> i64 {
        let Some(slot) = usize::from(color)
            .checked_sub(1)
            .and_then(|i| self.goal_points.get_mut(i))
        else {
            return 0;
        };
        let awarded = *slot;
        *slot = (*slot - 1).max(0);
        awarded
    }

    pub(crate) fn set_winner(&mut self, winner: String) {
        self.winner = winner;
    }
}

pub(crate) fn remove_first(pieces: &mut Vec<Piece>, piece: Piece) {
    if let Some(pos) = pieces.iter().position(|&p| p == piece) {
        pieces.remove(pos);
    }
}
