//! Board controller
//!
//! One controller owns one board by name. Each pass reads a fresh snapshot,
//! recomputes the status as a pure function of it, converges the ticker,
//! commits the status conditionally on the revision it read, and finally
//! consumes the commands it observed. A revision conflict anywhere reruns
//! the whole pass from fresh reads; nothing is patched incrementally.
//!
//! The watch loop is a wake-up mechanism, nothing more. Passes are safe to
//! run spuriously: a pass over an already-converged board reads, computes
//! the same status, and writes nothing.

use tetris_reconciler_engine::{plan_ticker, reconcile, Catalog, SimpleRng, TickerPlan};
use tetris_reconciler_store::{Event, EventAction, MemoryStore, Object, StoreError, Stored};
use tetris_reconciler_types::{Board, BoardState, Command, Op, Ticker};

use crate::retry::{with_conflict_retry, DEFAULT_ATTEMPTS};

/// What a single pass did, for logs and assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub state: BoardState,
    pub applied: Option<Op>,
    pub rows_cleared: u32,
    pub wrote_board: bool,
    pub commands_deleted: usize,
}

/// Reconciles one board against the store
pub struct BoardController {
    store: MemoryStore,
    catalog: Catalog,
    rng: tokio::sync::Mutex<SimpleRng>,
}

impl BoardController {
    pub fn new(store: MemoryStore, catalog: Catalog, rng: SimpleRng) -> Self {
        BoardController {
            store,
            catalog,
            rng: tokio::sync::Mutex::new(rng),
        }
    }

    /// Reconcile the board once, rerunning internally on revision
    /// conflicts. `Ok(None)` means the board does not exist.
    pub async fn reconcile_board(&self, name: &str) -> Result<Option<PassReport>, StoreError> {
        with_conflict_retry(DEFAULT_ATTEMPTS, || self.pass(name)).await
    }

    /// Reconcile on startup and then after every relevant store event.
    /// Returns when the store's event channel closes.
    pub async fn run(&self, name: &str) {
        use tokio::sync::broadcast::error::RecvError;

        // Subscribe before the first pass so nothing lands in the gap
        let mut events = self.store.watch();
        self.pass_and_log(name).await;

        loop {
            match events.recv().await {
                Ok(event) => {
                    if relevant(&event, name) {
                        self.pass_and_log(name).await;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event stream lagged, reconciling to catch up");
                    self.pass_and_log(name).await;
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    async fn pass_and_log(&self, name: &str) {
        if let Err(err) = self.reconcile_board(name).await {
            tracing::error!(board = name, %err, "reconcile pass failed");
        }
    }

    async fn pass(&self, name: &str) -> Result<Option<PassReport>, StoreError> {
        let board = match self.store.get::<Board>(name).await {
            Ok(board) => board,
            Err(err) if err.is_not_found() => {
                self.sweep_orphans(name).await?;
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        if let Err(err) = board.obj.spec.validate() {
            tracing::warn!(board = name, %err, "spec rejected, skipping pass");
            return Ok(None);
        }

        // Every pending command addressed to this board, in name order.
        // The first is applied; all of them are consumed at the end of
        // the pass, applied or not.
        let pending: Vec<Stored<Command>> = self
            .store
            .list::<Command>()
            .await?
            .into_iter()
            .filter(|cmd| cmd.obj.board == name)
            .collect();
        let selected = pending.first().map(|cmd| cmd.obj.op.clone());

        let outcome = {
            let mut rng = self.rng.lock().await;
            reconcile(
                &board.obj.spec,
                &board.obj.status,
                selected.as_deref(),
                &self.catalog,
                &mut rng,
            )
        };

        self.ensure_ticker(name, outcome.ticker_period).await?;

        // Quiescent passes leave the revision alone and emit no event;
        // that is what stops the write-triggers-pass echo.
        let wrote_board = outcome.status != board.obj.status;
        let state = outcome.status.state;
        if wrote_board {
            let next = Board {
                spec: board.obj.spec,
                status: outcome.status,
            };
            self.store.update(name, board.revision, &next).await?;
        }

        // Commands are consumed only once the commit stuck
        let mut commands_deleted = 0;
        for cmd in &pending {
            match self.store.delete::<Command>(&cmd.name).await {
                Ok(()) => commands_deleted += 1,
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }

        let report = PassReport {
            state,
            applied: outcome.applied,
            rows_cleared: outcome.rows_cleared,
            wrote_board,
            commands_deleted,
        };
        tracing::debug!(
            board = name,
            state = report.state.as_str(),
            applied = ?report.applied,
            rows_cleared = report.rows_cleared,
            wrote = report.wrote_board,
            consumed = report.commands_deleted,
            "pass complete"
        );
        Ok(Some(report))
    }

    /// Converge the board's ticker object onto `desired`
    async fn ensure_ticker(&self, board: &str, desired: Option<u64>) -> Result<(), StoreError> {
        let ticker_name = Ticker::name_for(board);
        let observed = match self.store.get::<Ticker>(&ticker_name).await {
            Ok(stored) => Some(stored),
            Err(err) if err.is_not_found() => None,
            Err(err) => return Err(err),
        };

        match plan_ticker(desired, observed.as_ref().map(|t| t.obj.period_ms)) {
            TickerPlan::Create(period) => {
                match self
                    .store
                    .create(&ticker_name, &Ticker::new(board, period))
                    .await
                {
                    Ok(_) => tracing::info!(board, period_ms = period, "ticker created"),
                    Err(err) if err.is_already_exists() => {}
                    Err(err) => return Err(err),
                }
            }
            TickerPlan::Update(period) => {
                if let Some(observed) = observed {
                    self.store
                        .update(&ticker_name, observed.revision, &Ticker::new(board, period))
                        .await?;
                    tracing::info!(board, period_ms = period, "ticker period updated");
                }
            }
            TickerPlan::Remove => match self.store.delete::<Ticker>(&ticker_name).await {
                Ok(()) => tracing::info!(board, "ticker removed"),
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            },
            TickerPlan::Keep => {}
        }
        Ok(())
    }

    /// A deleted board takes its ticker and its pending commands with it.
    /// Runs on every pass that finds the board gone, so a tick filed during
    /// teardown is swept by the pass its creation event triggers.
    async fn sweep_orphans(&self, board: &str) -> Result<(), StoreError> {
        match self.store.delete::<Ticker>(&Ticker::name_for(board)).await {
            Ok(()) => tracing::info!(board, "ticker removed with its board"),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        let mut drained = 0usize;
        for cmd in self.store.list::<Command>().await? {
            if cmd.obj.board != board {
                continue;
            }
            match self.store.delete::<Command>(&cmd.name).await {
                Ok(()) => drained += 1,
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }
        if drained > 0 {
            tracing::info!(board, drained, "pending commands drained with their board");
        }
        Ok(())
    }
}

/// Board writes and deletions warrant a pass, as do new commands. Command
/// deletions and ticker events are the controller's own writes; reacting
/// to them would have every pass schedule the next.
fn relevant(event: &Event, board: &str) -> bool {
    if event.kind == Board::KIND {
        return event.name == board;
    }
    if event.kind == Command::KIND {
        return event.action == EventAction::Created;
    }
    false
}
