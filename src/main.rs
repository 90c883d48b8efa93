//! Reconciler runner (default binary).
//!
//! Boots an in-memory store, creates the configured board, and runs the
//! board controller and the ticker runner against it until the game ends
//! or the process is interrupted. Gravity alone will eventually stack the
//! board full, so the default run plays itself to game over and prints
//! the final position. `RUST_LOG` controls log verbosity.

use anyhow::Result;

use tetris_reconciler::controller::{load_catalog, BoardController, RunConfig, TickerRunner};
use tetris_reconciler::engine::SimpleRng;
use tetris_reconciler::store::MemoryStore;
use tetris_reconciler::types::{Board, BoardSnapshot, BoardState, BOARD_NAME};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = RunConfig::from_env();
    let catalog = load_catalog(config.catalog_path.as_deref())?;
    let spec = config.board_spec();
    spec.validate()?;

    tracing::info!(
        width = spec.width,
        height = spec.height,
        tick_ms = spec.tick_ms,
        seed = config.seed,
        pieces = catalog.len(),
        "starting"
    );

    let store = MemoryStore::new();
    store.create(BOARD_NAME, &Board::new(spec)).await?;

    let controller = BoardController::new(store.clone(), catalog, SimpleRng::new(config.seed));
    let runner = TickerRunner::new(store.clone());
    let controller_task = tokio::spawn(async move { controller.run(BOARD_NAME).await });
    let runner_task = tokio::spawn(async move { runner.run().await });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
        }
        _ = wait_for_game_over(&store) => {
            tracing::info!("game over");
        }
    }

    controller_task.abort();
    runner_task.abort();

    match store.get::<Board>(BOARD_NAME).await {
        Ok(board) => {
            let snapshot = BoardSnapshot::from(&board.obj);
            println!("{}", render_snapshot(&snapshot));
        }
        Err(err) => tracing::warn!(%err, "no final board to report"),
    }
    Ok(())
}

/// Resolves once the board has finished. A board that was never
/// reconciled still carries the default state, so only a board with an
/// allocated grid counts as finished.
async fn wait_for_game_over(store: &MemoryStore) {
    use tokio::sync::broadcast::error::RecvError;

    let mut events = store.watch();
    loop {
        if let Ok(board) = store.get::<Board>(BOARD_NAME).await {
            let status = &board.obj.status;
            if status.grid.is_some() && status.state == BoardState::GameOver {
                return;
            }
        }
        match events.recv().await {
            Ok(_) | Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => return,
        }
    }
}

/// Text rendering of the final position: settled cells show their piece
/// id, active cells show `*`, empty cells `.`
fn render_snapshot(snapshot: &BoardSnapshot) -> String {
    let mut cells: Vec<Vec<char>> = snapshot
        .grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|&cell| {
                    if cell == 0 {
                        '.'
                    } else {
                        char::from_digit(cell as u32 % 10, 10).unwrap_or('#')
                    }
                })
                .collect()
        })
        .collect();

    for piece in &snapshot.active {
        for coord in &piece.coords {
            if let Some(cell) = cells
                .get_mut(coord.y as usize)
                .and_then(|row| row.get_mut(coord.x as usize))
            {
                *cell = '*';
            }
        }
    }

    cells
        .into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
