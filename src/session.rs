//! Game session: the lifecycle around successive rounds.
//!
//! A session owns the current [`Round`], the hints carried between rounds,
//! the definition cache, and the player-facing message channel. It is the
//! only place collaborator failures are turned into [`SessionError`]s.
//!
//! The two slow operations are split so a caller can await them without
//! holding the session:
//!
//! - [`GameSession::prepare_new_game`] → [`PendingGame::fetch`] →
//!   [`GameSession::apply_new_game`]
//! - [`GameSession::request_definition`] → [`PendingDefinition::fetch`] →
//!   [`GameSession::apply_definition`]
//!
//! A fetched game whose ticket is no longer the latest is discarded, so a
//! slow fetch never overwrites a newer game.

use crate::collaborators::{
    Definition, DefinitionService, HighScore, HighScoreService, WordBundle, WordSource,
};
use crate::definitions::{DEFAULT_DEFINITION_TIMEOUT, DefinitionCache, define_within};
use crate::error::{ClientError, SessionError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use strictly_anagram::{
    GuessLog, GuessOutcome, HintOutcome, HintState, RootWord, Round, RoundError, RoundSummary,
    ScoreLine,
};
use tracing::{debug, info, instrument, warn};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum SessionPhase {
    /// No round yet, or the last fetch failed.
    NotStarted,
    /// Waiting for the word source.
    Loading,
    /// A round is being played.
    Active,
    /// The round is finished and its score frozen.
    Finished,
}

/// What became of a fetched game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewGameOutcome {
    /// The fetched round is now being played.
    Started,
    /// A newer game was requested meanwhile; this result was dropped.
    Discarded,
}

/// A new-game request waiting for its word bundle.
pub struct PendingGame {
    ticket: u64,
    source: Arc<dyn WordSource>,
}

impl PendingGame {
    /// The request's ticket number.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Fetches the word bundle. Dropping the future cancels the request.
    #[instrument(skip(self), fields(ticket = self.ticket))]
    pub async fn fetch(self) -> FetchedGame {
        let result = self.source.fetch_root_and_anagrams().await;
        debug!(ok = result.is_ok(), "Word fetch finished");
        FetchedGame {
            ticket: self.ticket,
            result,
        }
    }
}

impl std::fmt::Debug for PendingGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingGame")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

/// Result of [`PendingGame::fetch`], to be handed back to the session.
#[derive(Debug)]
pub struct FetchedGame {
    ticket: u64,
    result: Result<WordBundle, ClientError>,
}

impl FetchedGame {
    /// The ticket of the request that produced this result.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

/// Answer to a definition request.
#[derive(Debug)]
pub enum DefinitionRequest {
    /// Served from the cache.
    Ready(Definition),
    /// Needs a lookup.
    Pending(PendingDefinition),
}

/// Counts a definition lookup as in flight until dropped.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A definition lookup waiting on the service.
///
/// The session reports loading for as long as this value, or the future
/// returned by [`fetch`](Self::fetch), is alive.
pub struct PendingDefinition {
    word: String,
    service: Arc<dyn DefinitionService>,
    timeout: Duration,
    in_flight: InFlight,
}

impl PendingDefinition {
    /// Looks the word up, bounded by the session's timeout.
    pub async fn fetch(self) -> FetchedDefinition {
        let result = define_within(self.service.as_ref(), &self.word, self.timeout).await;
        drop(self.in_flight);
        FetchedDefinition {
            word: self.word,
            result,
        }
    }
}

impl std::fmt::Debug for PendingDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingDefinition")
            .field("word", &self.word)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Result of [`PendingDefinition::fetch`].
#[derive(Debug)]
pub struct FetchedDefinition {
    word: String,
    result: Result<Definition, ClientError>,
}

/// A single player's sequence of rounds.
pub struct GameSession {
    source: Arc<dyn WordSource>,
    definitions: Arc<dyn DefinitionService>,
    high_scores: Arc<dyn HighScoreService>,
    rng: StdRng,
    definition_timeout: Duration,

    phase: SessionPhase,
    round: Option<Round>,
    /// Carried hints while no round holds them.
    accrued_hints: u32,
    ticket: u64,
    /// Hint granted by the outgoing round, announced once a round starts.
    hint_granted: bool,
    got_new_hint: bool,

    message: Option<String>,
    definition: Option<Definition>,
    lookups_in_flight: Arc<AtomicUsize>,
    definition_cache: DefinitionCache,
    can_submit_score: bool,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("accrued_hints", &self.accrued_hints)
            .field("ticket", &self.ticket)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session that has not started a game yet.
    #[instrument(skip_all)]
    pub fn new(
        source: Arc<dyn WordSource>,
        definitions: Arc<dyn DefinitionService>,
        high_scores: Arc<dyn HighScoreService>,
    ) -> Self {
        info!("Creating game session");
        Self {
            source,
            definitions,
            high_scores,
            rng: StdRng::from_entropy(),
            definition_timeout: DEFAULT_DEFINITION_TIMEOUT,
            phase: SessionPhase::NotStarted,
            round: None,
            accrued_hints: 0,
            ticket: 0,
            hint_granted: false,
            got_new_hint: false,
            message: None,
            definition: None,
            lookups_in_flight: Arc::new(AtomicUsize::new(0)),
            definition_cache: DefinitionCache::default(),
            can_submit_score: false,
        }
    }

    /// Uses `rng` for letter shuffles and hint picks.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Bounds definition lookups by `timeout`.
    pub fn with_definition_timeout(mut self, timeout: Duration) -> Self {
        self.definition_timeout = timeout;
        self
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        warn!(operation, phase = %self.phase, "Operation not allowed in this phase");
        SessionError::InvalidPhase {
            operation,
            phase: self.phase,
        }
    }

    fn from_round_error(&self, operation: &'static str, err: RoundError) -> SessionError {
        debug!(%err, "Round rejected operation");
        self.invalid(operation)
    }

    // ─────────────────────────────────────────────────────────────
    //  New game
    // ─────────────────────────────────────────────────────────────

    /// Resets the session for a new game and returns the fetch to await.
    ///
    /// Allowed from any phase. If the outgoing round earned a carried-over
    /// hint it is granted here, before the round is dropped; the new-hint
    /// notice waits until a round actually starts.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn prepare_new_game(&mut self) -> PendingGame {
        if let Some(outgoing) = self.round.take() {
            self.accrued_hints = *outgoing.hints().accrued();
            self.hint_granted = outgoing.carryover_earned();
            if self.hint_granted {
                self.accrued_hints += 1;
                info!(accrued = self.accrued_hints, "Granted carried-over hint");
            }
        }

        self.got_new_hint = false;
        self.ticket += 1;
        self.phase = SessionPhase::Loading;
        self.can_submit_score = false;
        self.message = None;
        self.definition = None;
        info!(ticket = self.ticket, "Requesting new game");

        PendingGame {
            ticket: self.ticket,
            source: Arc::clone(&self.source),
        }
    }

    /// Installs a fetched game, unless a newer request superseded it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SourceUnavailable`] if the fetch failed or
    /// returned an unusable root; the session goes back to not started.
    #[instrument(skip(self, fetched), fields(ticket = fetched.ticket, latest = self.ticket))]
    pub fn apply_new_game(&mut self, fetched: FetchedGame) -> Result<NewGameOutcome, SessionError> {
        if fetched.ticket != self.ticket {
            warn!("Discarding stale game fetch");
            return Ok(NewGameOutcome::Discarded);
        }

        let started = fetched.result.and_then(|bundle| {
            let (word, anagrams) = bundle.dissolve();
            RootWord::new(&word)
                .map(|root| (root, anagrams))
                .map_err(|e| ClientError::new(format!("Unusable root word: {}", e)))
        });

        match started {
            Ok((mut root, anagrams)) => {
                root.shuffle(&mut self.rng);
                self.round = Some(Round::new(root, anagrams, self.accrued_hints));
                self.phase = SessionPhase::Active;
                self.message = None;
                self.got_new_hint = std::mem::take(&mut self.hint_granted);
                info!(got_new_hint = self.got_new_hint, "New game started");
                Ok(NewGameOutcome::Started)
            }
            Err(err) => {
                warn!(error = %err, "Word source failed");
                let failure = SessionError::SourceUnavailable;
                self.phase = SessionPhase::NotStarted;
                self.message = Some(failure.to_string());
                Err(failure)
            }
        }
    }

    /// Starts a new game: prepare, fetch, apply.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SourceUnavailable`] if the word source fails.
    pub async fn start_new_game(&mut self) -> Result<NewGameOutcome, SessionError> {
        let pending = self.prepare_new_game();
        let fetched = pending.fetch().await;
        self.apply_new_game(fetched)
    }

    // ─────────────────────────────────────────────────────────────
    //  Play
    // ─────────────────────────────────────────────────────────────

    /// Submits a guess for the active round.
    ///
    /// The outcome's message is posted to the message channel.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPhase`] outside an active round.
    #[instrument(skip(self))]
    pub fn submit_guess(&mut self, word: &str) -> Result<GuessOutcome, SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(self.invalid("guess"));
        }
        let result = match self.round.as_mut() {
            Some(round) => round.submit_guess(word),
            None => return Err(self.invalid("guess")),
        };
        let outcome = result.map_err(|e| self.from_round_error("guess", e))?;
        self.message = Some(outcome.to_string());
        Ok(outcome)
    }

    /// Submits the pending guess text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPhase`] outside an active round.
    pub fn submit_pending_guess(&mut self) -> Result<GuessOutcome, SessionError> {
        let pending = self
            .round
            .as_ref()
            .map(|r| r.buffer().pending().clone())
            .unwrap_or_default();
        self.submit_guess(&pending)
    }

    /// Updates the pending guess text; only root letters are accepted.
    pub fn update_guess(&mut self, text: &str) -> bool {
        self.round
            .as_mut()
            .is_some_and(|round| round.update_guess(text))
    }

    /// Puts the last accepted guess back into the pending text.
    pub fn bring_back_word(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.bring_back_word();
        }
    }

    /// Reveals a letter if a hint is available.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPhase`] outside an active round.
    #[instrument(skip(self))]
    pub fn use_hint(&mut self) -> Result<HintOutcome, SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(self.invalid("use a hint"));
        }
        let result = match self.round.as_mut() {
            Some(round) => round.use_hint(&mut self.rng),
            None => return Err(self.invalid("use a hint")),
        };
        result.map_err(|e| self.from_round_error("use a hint", e))
    }

    /// Reorders the displayed root letters.
    pub fn shuffle_letters(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.shuffle_letters(&mut self.rng);
        }
    }

    /// Finishes the active round and opens high-score submission.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPhase`] outside an active round.
    #[instrument(skip(self))]
    pub fn finish(&mut self) -> Result<RoundSummary, SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(self.invalid("finish"));
        }
        let result = match self.round.as_mut() {
            Some(round) => round.finish(),
            None => return Err(self.invalid("finish")),
        };
        let summary = result.map_err(|e| self.from_round_error("finish", e))?;
        self.phase = SessionPhase::Finished;
        self.can_submit_score = true;
        info!(score = summary.score(), "Game finished");
        Ok(summary)
    }

    // ─────────────────────────────────────────────────────────────
    //  Definitions
    // ─────────────────────────────────────────────────────────────

    /// Serves `word` from the cache or starts a lookup.
    #[instrument(skip(self))]
    pub fn request_definition(&mut self, word: &str) -> DefinitionRequest {
        if let Some(cached) = self.definition_cache.get(word) {
            debug!("Definition cache hit");
            self.definition = Some(cached.clone());
            return DefinitionRequest::Ready(cached.clone());
        }
        DefinitionRequest::Pending(PendingDefinition {
            word: word.to_string(),
            service: Arc::clone(&self.definitions),
            timeout: self.definition_timeout,
            in_flight: InFlight::enter(&self.lookups_in_flight),
        })
    }

    /// Records the result of a definition lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DefinitionUnavailable`] if the lookup failed
    /// or timed out. Nothing about the round changes.
    #[instrument(skip(self, fetched), fields(word = %fetched.word))]
    pub fn apply_definition(&mut self, fetched: FetchedDefinition) -> Result<Definition, SessionError> {
        match fetched.result {
            Ok(definition) => {
                self.definition_cache.insert(&fetched.word, definition.clone());
                self.definition = Some(definition.clone());
                Ok(definition)
            }
            Err(err) => {
                warn!(error = %err, "Definition lookup failed");
                let failure = SessionError::DefinitionUnavailable(fetched.word);
                self.definition = None;
                self.message = Some(failure.to_string());
                Err(failure)
            }
        }
    }

    /// Looks up a definition, using the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DefinitionUnavailable`] on failure or timeout.
    pub async fn lookup_definition(&mut self, word: &str) -> Result<Definition, SessionError> {
        match self.request_definition(word) {
            DefinitionRequest::Ready(definition) => Ok(definition),
            DefinitionRequest::Pending(pending) => {
                let fetched = pending.fetch().await;
                self.apply_definition(fetched)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  High scores
    // ─────────────────────────────────────────────────────────────

    /// Submits the frozen score under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPhase`] if no finished score awaits
    /// submission, or [`SessionError::HighScoreSubmitFailed`] if the service
    /// fails; submission then stays open for a retry.
    #[instrument(skip(self))]
    pub async fn submit_high_score(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.can_submit_score {
            return Err(self.invalid("submit a high score"));
        }
        let score = self.score();
        match self.high_scores.submit(name, score).await {
            Ok(()) => {
                info!(score, "High score submitted");
                self.can_submit_score = false;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "High score submission failed");
                let failure = SessionError::HighScoreSubmitFailed;
                self.message = Some(failure.to_string());
                Err(failure)
            }
        }
    }

    /// Loads the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::HighScoresUnavailable`] if the service fails.
    #[instrument(skip(self))]
    pub async fn fetch_high_scores(&mut self) -> Result<Vec<HighScore>, SessionError> {
        self.high_scores.fetch().await.map_err(|err| {
            warn!(error = %err, "Loading high scores failed");
            let failure = SessionError::HighScoresUnavailable;
            self.message = Some(failure.to_string());
            failure
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Read accessors
    // ─────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The round being played or just finished.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Root letters in display order.
    pub fn letters(&self) -> Option<String> {
        self.round.as_ref().map(|r| r.root().display())
    }

    /// Words in play.
    pub fn anagram_words(&self) -> &[String] {
        self.round
            .as_ref()
            .map(|r| r.anagrams().words())
            .unwrap_or_default()
    }

    /// The guess log, if a round exists.
    pub fn guesses(&self) -> Option<&GuessLog> {
        self.round.as_ref().map(Round::guesses)
    }

    /// Hint state of the current round.
    pub fn hint_state(&self) -> Option<&HintState> {
        self.round.as_ref().map(Round::hints)
    }

    /// Hints available right now.
    pub fn hint_count(&self) -> u32 {
        self.round
            .as_ref()
            .map_or(self.accrued_hints + 1, |r| r.hints().hint_count())
    }

    /// Score: live while active, frozen once finished, zero otherwise.
    pub fn score(&self) -> u64 {
        self.round.as_ref().map_or(0, Round::score)
    }

    /// Per-length score breakdown, longest first.
    pub fn score_info(&self) -> Vec<ScoreLine> {
        self.round.as_ref().map(Round::score_info).unwrap_or_default()
    }

    /// Unguessed words with unrevealed letters masked.
    pub fn masked_unguessed(&self) -> Vec<String> {
        self.round
            .as_ref()
            .map(Round::masked_unguessed)
            .unwrap_or_default()
    }

    /// Pending transient message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Clears the pending message.
    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    /// True while a game or definition is being fetched.
    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading || self.lookups_in_flight.load(Ordering::SeqCst) > 0
    }

    /// True if the last new game granted a carried-over hint.
    pub fn got_new_hint(&self) -> bool {
        self.got_new_hint
    }

    /// Clears the new-hint notice.
    pub fn acknowledge_new_hint(&mut self) {
        self.got_new_hint = false;
    }

    /// Most recently shown definition.
    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    /// Number of cached definitions.
    pub fn cached_definitions(&self) -> usize {
        self.definition_cache.len()
    }

    /// True while a finished score awaits submission.
    pub fn can_submit_score(&self) -> bool {
        self.can_submit_score
    }

    /// Latest new-game ticket.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}
