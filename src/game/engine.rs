//! The turn protocol.
//!
//! A turn runs against transient scratch state: `begin_turn` snapshots the
//! acting participant's board and computes the required plays, `play_piece_at`
//! and `play_piece_discard` validate and apply individual plays, and
//! `end_turn` commits the results back into permanent state. `rewind_turn`
//! discards everything uncommitted by re-running `begin_turn`. Because no
//! play mutates permanent state before `end_turn`, a rejected play or a
//! rewind is always a clean rollback.
//!
//! ## States
//!
//! *idle* → `begin_turn` → *turn in progress* ⇄ *person moving* →
//! *turn finished* → `end_turn` → *idle*. The person-moving sub-state is
//! entered when a tile is played onto a square occupied by a person; the
//! tile is consumed and the person walks instead, one square per play, with
//! a budget equal to the road stubs on the square they started from.

use tracing::{debug, info, trace};

use crate::board::{Board, Coord};
use crate::core::RuleError;
use crate::game::state::{remove_first, Game};
use crate::game::turn::{MovingPerson, PieceQueue, TurnState};
use crate::pieces::{combine, pieces_connect, Piece};

/// Minimum Manhattan distance between a person and their house at
/// placement time.
pub const MIN_PARTNER_DISTANCE: u32 = 5;

/// What a successful play did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The piece was placed (or combined) on the working board.
    Placed,
    /// The played tile was consumed and the person standing on the target
    /// square began moving. The carried piece is the pure person now in
    /// motion.
    PersonMoving(Piece),
    /// The moving person advanced one square.
    PersonMoved,
}

impl Game {
    /// Begin a turn for `participant`.
    ///
    /// Snapshots the participant's permanent board into the working board
    /// and computes the required plays: person/house pairs while any remain
    /// (two pairs in a two-participant game, one otherwise), then one tile
    /// from the participant's personal queue, or nothing once the queue is
    /// exhausted. Any turn already in progress is discarded.
    ///
    /// # Panics
    ///
    /// Panics if the participant is not in the game.
    pub fn begin_turn(&mut self, participant: &str) {
        assert!(
            self.has_participant(participant),
            "unknown participant: {participant}"
        );

        let mut to_play = PieceQueue::new();
        if !self.remaining_persons().is_empty() {
            // Person and house pairs go out first, person before house.
            // With exactly two participants the turns are merged, so each
            // side places two pairs; other counts place one.
            let pairs = if self.participant_count() == 2 { 2 } else { 1 };
            for i in 0..pairs {
                if let Some(&person) = self.remaining_persons().get(i) {
                    to_play.push(person);
                }
                if let Some(&house) = self.remaining_houses().get(i) {
                    to_play.push(house);
                }
            }
        }
        let record = self.record(participant);
        if to_play.is_empty() {
            if let Some(&next) = record.queue().first() {
                to_play.push(next);
            }
        }

        debug!(participant, plays = to_play.len(), "turn begun");
        self.turn = Some(TurnState {
            participant: participant.into(),
            board: record.board().clone(),
            to_play,
            played: PieceQueue::new(),
            moving: None,
            last_error: None,
        });
    }

    /// Restart the current turn from the beginning, discarding every
    /// uncommitted change including consumed pieces. No-op when no turn is
    /// in progress.
    pub fn rewind_turn(&mut self) {
        if let Some(turn) = &self.turn {
            let participant = turn.participant.as_str().to_string();
            debug!(participant = %participant, "turn rewound");
            self.begin_turn(&participant);
        }
    }

    /// The next piece the acting participant must deal with, without
    /// consuming it: the person being moved while mid-move, the head of the
    /// required-play queue otherwise, or the end-of-turn sentinel when
    /// nothing remains (or no turn is in progress).
    #[must_use]
    pub fn get_next_piece(&self) -> Piece {
        let Some(turn) = &self.turn else {
            return Piece::end_of_turn();
        };
        if let Some(moving) = &turn.moving {
            return moving.person;
        }
        turn.to_play
            .first()
            .copied()
            .unwrap_or_else(Piece::end_of_turn)
    }

    /// Play `piece` at `(x, y)` on the working board.
    ///
    /// The central rule dispatch. On failure nothing is mutated and the
    /// error is retrievable through [`Game::last_error`] until the next
    /// play or turn boundary.
    pub fn play_piece_at(&mut self, piece: Piece, x: i32, y: i32) -> Result<PlayOutcome, RuleError> {
        let Some(mut turn) = self.turn.take() else {
            return Err(RuleError::TurnFinished);
        };
        let result = self.play_in_turn(&mut turn, piece, x, y);
        if let Err(err) = result {
            trace!(%err, x, y, "play rejected");
            turn.last_error = Some(err);
        }
        self.turn = Some(turn);
        result
    }

    fn play_in_turn(
        &mut self,
        turn: &mut TurnState,
        piece: Piece,
        x: i32,
        y: i32,
    ) -> Result<PlayOutcome, RuleError> {
        if let Some(moving) = &turn.moving {
            if moving.moves_left == 0 {
                return Err(RuleError::AllMovesFinished);
            }
        }
        // The turn is finished once no required plays remain, unless a
        // person is still mid-move.
        if turn.moving.is_none() && turn.to_play.is_empty() {
            return Err(RuleError::TurnFinished);
        }
        let c = Coord::new(x, y);
        if !turn.board.is_valid(c) {
            return Err(RuleError::InvalidCoords);
        }
        let current = turn.board.get(x, y);

        match turn.moving {
            Some(moving) if piece.is_person() => {
                self.step_person(turn, moving, current, c)
            }
            _ if piece.is_person() || piece.is_house() => {
                Self::place_person_or_house(turn, piece, current, c)
            }
            _ => Self::place_tile(turn, piece, current, c),
        }
    }

    /// One step of the moving person.
    fn step_person(
        &mut self,
        turn: &mut TurnState,
        moving: MovingPerson,
        current: Piece,
        c: Coord,
    ) -> Result<PlayOutcome, RuleError> {
        let source = turn.board.get(moving.at.x, moving.at.y);
        let person = source.person_piece();
        let color = person.person_color();
        let goal = turn.board.create_goal_piece(color, 0, c);
        let reached_goal = current == goal;

        if current.person_color() != 0 {
            return Err(RuleError::OnlyOnePersonPerSquare);
        }
        if !pieces_connect(source, current, moving.at.x, moving.at.y, c.x, c.y) {
            return Err(RuleError::PersonHasNoPath);
        }
        if turn.board.is_on_edge(c) && !reached_goal {
            return Err(RuleError::PersonOnEdgeOnlyToOwnHouse);
        }

        // Walk the person field from the source square to the target.
        turn.board.set(moving.at.x, moving.at.y, source.with_person_color(0));
        let mut landed = current.with_person_color(color);
        let mut gained = 0;
        if landed.has_gold_coin() || landed.has_silver_coin() {
            if landed.has_gold_coin() {
                gained += self.config().points_for_gold;
            }
            if landed.has_silver_coin() {
                gained += self.config().points_for_silver;
            }
            landed = landed.without_coins();
        }
        if reached_goal {
            gained += self.award_goal_points(color);
        }
        turn.board.set(c.x, c.y, landed);
        turn.moving = Some(MovingPerson {
            person,
            at: c,
            moves_left: moving.moves_left - 1,
        });

        if gained != 0 {
            self.record_mut(turn.participant.as_str()).score += gained;
            debug!(participant = %turn.participant, gained, "points scored");
        }
        if reached_goal && turn.board.is_winning_board() {
            info!(participant = %turn.participant, "board completed");
            self.set_winner(turn.participant.as_str().to_string());
        }
        Ok(PlayOutcome::PersonMoved)
    }

    /// Place a pure person or house piece on an edge square.
    fn place_person_or_house(
        turn: &mut TurnState,
        piece: Piece,
        current: Piece,
        c: Coord,
    ) -> Result<PlayOutcome, RuleError> {
        if !turn.board.is_on_edge(c) {
            return Err(RuleError::PeopleHousesEdgeOnly);
        }
        if turn.board.distance_to_partner(piece, c) < MIN_PARTNER_DISTANCE {
            return Err(RuleError::HousePersonTooClose);
        }
        if !current.is_green_grass() {
            return Err(RuleError::HousesPeopleOnlyOnGreenGrass);
        }
        let combined = combine(current, piece);
        if combined.is_failure() {
            // The checks above guarantee a grass + rider pairing, so this
            // should be unreachable.
            return Err(RuleError::UnexpectedProblem);
        }
        turn.board.set(c.x, c.y, combined);
        turn.play_head();
        Ok(PlayOutcome::Placed)
    }

    /// Play a road tile: onto a blank square it is placed verbatim; onto a
    /// square occupied by a person it is consumed and the person begins
    /// moving.
    fn place_tile(
        turn: &mut TurnState,
        piece: Piece,
        current: Piece,
        c: Coord,
    ) -> Result<PlayOutcome, RuleError> {
        if turn.board.is_on_edge(c) {
            return Err(RuleError::CantPlayPathPieceOnEdge);
        }
        if current.person_color() != 0 {
            let person = current.person_piece();
            turn.moving = Some(MovingPerson {
                person,
                at: c,
                moves_left: current.number_of_moves(),
            });
            turn.play_head();
            return Ok(PlayOutcome::PersonMoving(person));
        }
        if current.is_blank() {
            turn.board.set(c.x, c.y, piece);
            turn.play_head();
            return Ok(PlayOutcome::Placed);
        }
        Err(RuleError::CantMoveThere)
    }

    /// Discard the head of the required-play queue.
    ///
    /// Callers pass the piece returned by [`Game::get_next_piece`]; the
    /// discard always consumes the queue head. People and houses cannot be
    /// discarded, and neither can a person in mid-move.
    pub fn play_piece_discard(&mut self, piece: Piece) -> Result<(), RuleError> {
        let Some(turn) = self.turn.as_mut() else {
            return Err(RuleError::TurnFinished);
        };
        let result = Self::discard_in_turn(turn, piece);
        if let Err(err) = result {
            turn.last_error = Some(err);
        }
        result
    }

    fn discard_in_turn(turn: &mut TurnState, piece: Piece) -> Result<(), RuleError> {
        if turn.moving.is_some() {
            return Err(RuleError::CantDiscardMovingPerson);
        }
        if piece.is_house() {
            return Err(RuleError::CantDiscardHouse);
        }
        if piece.is_person() {
            return Err(RuleError::CantDiscardPerson);
        }
        if turn.to_play.is_empty() {
            return Err(RuleError::TurnFinished);
        }
        turn.play_head();
        Ok(())
    }

    /// Commit the turn: remove every consumed piece from permanent state,
    /// refresh the queue watermark, detect end of game, and copy the
    /// working board into the participant's permanent board. No-op when no
    /// turn is in progress.
    pub fn end_turn(&mut self) {
        let Some(mut turn) = self.turn.take() else {
            return;
        };
        // A person abandoned in mid-move is force-consumed.
        if let Some(moving) = turn.moving.take() {
            turn.played.push(moving.person);
        }

        for &piece in &turn.played {
            if piece.is_person() || piece.is_house() {
                self.remove_from_pools(piece);
            } else {
                remove_first(&mut self.record_mut(turn.participant.as_str()).queue, piece);
            }
        }

        self.refresh_watermark();
        if self.all_queues_empty() {
            self.declare_winner_by_score();
        }

        self.record_mut(turn.participant.as_str())
            .board
            .copy_from(&turn.board);
        debug!(participant = %turn.participant, played = turn.played.len(), "turn ended");
    }

    /// The bag is exhausted for everyone: the winner is whoever has the
    /// highest score, or the comma-joined tie list.
    fn declare_winner_by_score(&mut self) {
        let best = self
            .participants()
            .iter()
            .filter_map(|id| self.score(id.as_str()))
            .max();
        let Some(best) = best else { return };
        let winners: Vec<&str> = self
            .participants()
            .iter()
            .filter(|id| self.score(id.as_str()) == Some(best))
            .map(|id| id.as_str())
            .collect();
        let joined = winners.join(", ");
        info!(winner = %joined, "bag exhausted, game over");
        self.set_winner(joined);
    }

    // === Turn introspection ===

    /// Whether a person is moving as a result of the last play.
    #[must_use]
    pub fn moving_person(&self) -> bool {
        self.turn
            .as_ref()
            .map_or(false, |turn| turn.moving.is_some())
    }

    /// Steps the moving person has left, or zero when no person is moving.
    #[must_use]
    pub fn moving_person_moves_left(&self) -> u32 {
        self.turn
            .as_ref()
            .and_then(|turn| turn.moving)
            .map_or(0, |moving| moving.moves_left)
    }

    /// The working board of the turn in progress.
    #[must_use]
    pub fn current_board(&self) -> Option<&Board> {
        self.turn.as_ref().map(|turn| &turn.board)
    }

    /// The participant whose turn is in progress.
    #[must_use]
    pub fn current_participant(&self) -> Option<&str> {
        self.turn.as_ref().map(|turn| turn.participant.as_str())
    }

    /// The code of the most recent rejection this turn.
    #[must_use]
    pub fn last_error(&self) -> Option<RuleError> {
        self.turn.as_ref().and_then(|turn| turn.last_error)
    }

    /// Developer-facing text for the most recent rejection this turn, or an
    /// empty string. Localized player-facing text is the presentation
    /// layer's concern.
    #[must_use]
    pub fn last_error_message(&self) -> String {
        self.last_error().map(|err| err.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_turn_queues_one_pair() {
        let mut game = Game::new(["solo"], 42);
        game.begin_turn("solo");

        assert_eq!(game.get_next_piece(), Piece::person(1));
        assert_eq!(game.current_participant(), Some("solo"));
        assert_eq!(game.turn.as_ref().unwrap().to_play.len(), 2);
    }

    #[test]
    fn test_begin_turn_queues_two_pairs_for_two_participants() {
        let mut game = Game::new(["alice", "bob"], 42);
        game.begin_turn("alice");

        let queued: Vec<Piece> = game.turn.as_ref().unwrap().to_play.to_vec();
        assert_eq!(
            queued,
            vec![
                Piece::person(1),
                Piece::house(1),
                Piece::person(2),
                Piece::house(2),
            ]
        );
    }

    #[test]
    fn test_begin_turn_queues_one_pair_for_three_participants() {
        let mut game = Game::new(["a", "b", "c"], 42);
        game.begin_turn("b");
        assert_eq!(game.turn.as_ref().unwrap().to_play.len(), 2);
    }

    #[test]
    #[should_panic(expected = "unknown participant")]
    fn test_begin_turn_unknown_participant() {
        let mut game = Game::new(["solo"], 42);
        game.begin_turn("stranger");
    }

    #[test]
    fn test_idle_engine_calls() {
        let mut game = Game::new(["solo"], 42);

        assert!(game.get_next_piece().is_end_of_turn());
        assert_eq!(
            game.play_piece_at(Piece::tile(1), 3, 3),
            Err(RuleError::TurnFinished)
        );
        assert_eq!(
            game.play_piece_discard(Piece::tile(1)),
            Err(RuleError::TurnFinished)
        );
        assert!(!game.moving_person());
        assert_eq!(game.moving_person_moves_left(), 0);
        assert!(game.current_board().is_none());
        assert!(game.last_error().is_none());
        assert_eq!(game.last_error_message(), "");

        // No-ops rather than panics.
        game.end_turn();
        game.rewind_turn();
    }

    #[test]
    fn test_last_error_is_recorded_and_reset() {
        let mut game = Game::new(["solo"], 42);
        game.begin_turn("solo");

        let person = game.get_next_piece();
        assert_eq!(
            game.play_piece_at(person, 3, 3),
            Err(RuleError::PeopleHousesEdgeOnly)
        );
        assert_eq!(game.last_error(), Some(RuleError::PeopleHousesEdgeOnly));
        assert!(!game.last_error_message().is_empty());

        game.begin_turn("solo");
        assert!(game.last_error().is_none());
    }
}
