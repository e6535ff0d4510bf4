// Game facade for Nim Core
//
// The single object the page talks to. Owns the heaps, the token board and
// the round lifecycle. The computer never moves on its own: the page calls
// `computerTurn` when it wants the reply (after `computerDelayMs`, if any).

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::board::TokenBoard;
use crate::config::GameConfig;
use crate::engine::{nim_sum, OptimalMoveEngine};
use crate::heap::HeapManager;
use crate::types::{HeapEvent, Move, NimError, Player, Result, Timestamp};
use crate::utils::{log, round_rng};

/// Lifecycle of the current round
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundState {
    pub round: u32,
    pub start_time: Option<Timestamp>,
    pub turn: u32,
    pub last_mover: Option<Player>,
    pub ended: bool,
    pub end_time: Option<Timestamp>,
    pub winner: Option<Player>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    config: &'a GameConfig,
    heaps: &'a [usize],
    board: &'a TokenBoard,
    state: &'a RoundState,
}

/// A game of Nim against the computer
#[wasm_bindgen]
pub struct NimGame {
    config: GameConfig,
    heaps: HeapManager,
    board: TokenBoard,
    engine: OptimalMoveEngine,
    state: RoundState,
    events: Vec<HeapEvent>,
}

#[wasm_bindgen]
impl NimGame {
    /// Create a game and deal the first round
    ///
    /// `config_json` may be omitted to use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<NimGame> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json)?,
            None => GameConfig::default(),
        };
        NimGame::with_config(config)
    }

    /// Deal a fresh round, discarding the current one
    #[wasm_bindgen(js_name = newRound)]
    pub fn new_round(&mut self) -> Result<()> {
        let round = self.state.round + 1;
        let seed = self.config.seed.as_ref().map(|s| format!("{}-{}", s, round));
        let mut rng = round_rng(seed.as_deref());

        let heaps = HeapManager::random(&self.config, &mut *rng)?;
        self.start_round(round, heaps);
        Ok(())
    }

    /// Human move by coordinates: take tokens from the top down to `order`
    #[wasm_bindgen(js_name = removeTokens)]
    pub fn remove_tokens(&mut self, heap: usize, order: usize) -> Result<String> {
        let mv = self.human_move(heap, order)?;
        serde_json::to_string(&mv)
            .map_err(|e| NimError::SerializationError(e.to_string()))
    }

    /// Human move by clicking a token
    #[wasm_bindgen(js_name = clickToken)]
    pub fn click_token(&mut self, token_id: &str) -> Result<String> {
        let location = self.board.locate(token_id)?;
        self.remove_tokens(location.heap, location.order)
    }

    /// Let the computer make its optimal move
    ///
    /// Fails with `NoLegalMove` on a balanced position, leaving the heaps as
    /// they were.
    #[wasm_bindgen(js_name = computerTurn)]
    pub fn computer_turn(&mut self) -> Result<String> {
        let mv = self.computer_move()?;
        serde_json::to_string(&mv)
            .map_err(|e| NimError::SerializationError(e.to_string()))
    }

    /// Take every queued heap notification as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<String> {
        let events = std::mem::take(&mut self.events);
        serde_json::to_string(&events)
            .map_err(|e| NimError::SerializationError(e.to_string()))
    }

    /// Token counts as a JSON array
    #[wasm_bindgen(js_name = heapCounts)]
    pub fn heap_counts(&self) -> Result<String> {
        serde_json::to_string(self.heaps.counts())
            .map_err(|e| NimError::SerializationError(e.to_string()))
    }

    /// Token ids of one heap as a JSON array, bottom first
    #[wasm_bindgen(js_name = tokenIds)]
    pub fn token_ids(&self, heap: usize) -> Result<String> {
        serde_json::to_string(self.board.token_ids(heap)?)
            .map_err(|e| NimError::SerializationError(e.to_string()))
    }

    /// `{ heap, order }` of a token as JSON
    #[wasm_bindgen(js_name = locateToken)]
    pub fn locate_token(&self, token_id: &str) -> Result<String> {
        serde_json::to_string(&self.board.locate(token_id)?)
            .map_err(|e| NimError::SerializationError(e.to_string()))
    }

    #[wasm_bindgen(js_name = nimSum)]
    pub fn nim_sum(&self) -> usize {
        nim_sum(self.heaps.counts())
    }

    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.state.ended
    }

    /// "human" or "computer" once the last token is taken
    #[wasm_bindgen(js_name = winner)]
    pub fn winner(&self) -> Option<String> {
        self.state
            .winner
            .and_then(|p| serde_json::to_value(p).ok())
            .and_then(|v| v.as_str().map(str::to_string))
    }

    #[wasm_bindgen(js_name = turn)]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    #[wasm_bindgen(js_name = computerDelayMs)]
    pub fn computer_delay_ms(&self) -> u32 {
        self.config.computer_delay_ms
    }

    /// Config, heaps, board and round state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<String> {
        let snapshot = Snapshot {
            config: &self.config,
            heaps: self.heaps.counts(),
            board: &self.board,
            state: &self.state,
        };
        serde_json::to_string(&snapshot)
            .map_err(|e| NimError::SerializationError(e.to_string()))
    }
}

// Non-WASM methods for internal use
impl NimGame {
    /// Create a game from an already parsed config
    pub fn with_config(config: GameConfig) -> Result<NimGame> {
        config.validate()?;

        let mut game = NimGame::empty(config);
        game.new_round()?;
        Ok(game)
    }

    /// Create a game on fixed heaps instead of a random deal
    pub fn with_heaps(config: GameConfig, counts: Vec<usize>) -> Result<NimGame> {
        config.validate()?;
        let heaps = HeapManager::from_counts(counts)?;

        let mut game = NimGame::empty(config);
        game.start_round(1, heaps);
        Ok(game)
    }

    pub fn heaps(&self) -> &HeapManager {
        &self.heaps
    }

    pub fn board(&self) -> &TokenBoard {
        &self.board
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Apply a human removal and record it
    pub fn human_move(&mut self, heap: usize, order: usize) -> Result<Move> {
        self.ensure_running()?;
        let mv = self.heaps.remove_tokens(heap, order)?;
        self.record(Player::Human, mv)
    }

    /// Apply the engine's move and record it
    pub fn computer_move(&mut self) -> Result<Move> {
        self.ensure_running()?;
        let mv = self.engine.play(&mut self.heaps)?;
        self.record(Player::Computer, mv)
    }

    /// Queued notifications, without draining them
    pub fn pending_events(&self) -> &[HeapEvent] {
        &self.events
    }

    fn empty(config: GameConfig) -> NimGame {
        NimGame {
            config,
            heaps: HeapManager::default(),
            board: TokenBoard::default(),
            engine: OptimalMoveEngine::new(),
            state: RoundState::default(),
            events: Vec::new(),
        }
    }

    fn start_round(&mut self, round: u32, heaps: HeapManager) {
        self.board = TokenBoard::deal(heaps.counts());
        self.heaps = heaps;
        self.events.clear();
        self.state = RoundState {
            round,
            start_time: Some(chrono::Utc::now().timestamp_millis()),
            ..RoundState::default()
        };

        log(&format!("round {}: heaps {:?}", round, self.heaps.counts()));
    }

    fn ensure_running(&self) -> Result<()> {
        if self.state.ended || self.heaps.is_exhausted() {
            return Err(NimError::GameOver);
        }
        Ok(())
    }

    fn record(&mut self, player: Player, mv: Move) -> Result<Move> {
        for event in self.heaps.drain_events() {
            self.board.apply(&event)?;
            self.events.push(event);
        }

        self.state.turn += 1;
        self.state.last_mover = Some(player);
        log(&format!(
            "{:?} took {} from heap {} ({} left)",
            player, mv.removed, mv.heap, mv.new_count
        ));

        if self.heaps.is_exhausted() {
            self.state.ended = true;
            self.state.end_time = Some(chrono::Utc::now().timestamp_millis());
            self.state.winner = Some(player);
            log(&format!("{:?} took the last token", player));
        }

        Ok(mv)
    }
}
