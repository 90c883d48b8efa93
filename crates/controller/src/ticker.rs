//! Ticker runner
//!
//! Turns ticker objects into gravity. Every ticker in the store gets its
//! own task that sleeps for the configured period and then files a
//! generated `down` command for the ticker's board. The task re-reads its
//! ticker every turn, so a period update takes effect on the next tick
//! and a deletion ends the loop.

use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;

use tetris_reconciler_store::{EventAction, MemoryStore, Object};
use tetris_reconciler_types::{Command, Op, Ticker};

/// Name prefix of generated gravity commands
const TICK_COMMAND_PREFIX: &str = "tick-";

/// Runs a tick loop per ticker object
pub struct TickerRunner {
    store: MemoryStore,
}

impl TickerRunner {
    pub fn new(store: MemoryStore) -> Self {
        TickerRunner { store }
    }

    /// Start a loop for every existing ticker, then keep starting them as
    /// tickers are created. Returns when the store's event channel closes.
    pub async fn run(&self) {
        use tokio::sync::broadcast::error::RecvError;

        let mut events = self.store.watch();
        let mut tasks: HashMap<String, JoinHandle<()>> = HashMap::new();

        self.adopt_existing(&mut tasks).await;

        loop {
            match events.recv().await {
                Ok(event) => {
                    if event.kind == Ticker::KIND && event.action == EventAction::Created {
                        self.adopt(&mut tasks, &event.name);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event stream lagged, re-listing tickers");
                    self.adopt_existing(&mut tasks).await;
                }
                Err(RecvError::Closed) => break,
            }
        }

        for handle in tasks.values() {
            handle.abort();
        }
    }

    async fn adopt_existing(&self, tasks: &mut HashMap<String, JoinHandle<()>>) {
        match self.store.list::<Ticker>().await {
            Ok(existing) => {
                for stored in existing {
                    self.adopt(tasks, &stored.name);
                }
            }
            Err(err) => tracing::error!(%err, "listing tickers failed"),
        }
    }

    /// Idempotent: a ticker whose loop is still alive is left alone
    fn adopt(&self, tasks: &mut HashMap<String, JoinHandle<()>>, name: &str) {
        if tasks.get(name).is_some_and(|handle| !handle.is_finished()) {
            return;
        }
        tracing::debug!(ticker = name, "starting tick loop");
        let task = tokio::spawn(tick_loop(self.store.clone(), name.to_string()));
        tasks.insert(name.to_string(), task);
    }
}

/// One ticker's gravity loop. The existence check after the sleep keeps a
/// ticker deleted mid-sleep from firing one last time.
async fn tick_loop(store: MemoryStore, name: String) {
    loop {
        let ticker = match store.get::<Ticker>(&name).await {
            Ok(stored) => stored.obj,
            Err(_) => break,
        };

        tokio::time::sleep(Duration::from_millis(ticker.period_ms)).await;

        if store.get::<Ticker>(&name).await.is_err() {
            break;
        }
        let command = Command::new(ticker.board.as_str(), Op::Down.as_str());
        if let Err(err) = store.create_generated(TICK_COMMAND_PREFIX, &command).await {
            tracing::error!(ticker = %name, %err, "filing tick command failed");
            break;
        }
        tracing::trace!(board = %ticker.board, "tick");
    }
    tracing::debug!(ticker = %name, "tick loop stopped");
}
