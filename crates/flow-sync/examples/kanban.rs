//! Board demo: hydrate, reorder optimistically, move a candidate card, and
//! watch each mutation settle over the simulated transport.
//!
//! Run with `cargo run -p flow-sync --example kanban`. Mutations pay the
//! default 200-1200ms latency and fail about 1 in 20 times, in which case
//! the rollback is visible in the final listing.

use flow_client::FlowClient;
use flow_config::FlowConfig;
use flow_core::enums::CandidateStage;
use flow_sync::{BoardController, OnConflict};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,flow_sync=debug")),
        )
        .init();

    let mut config = FlowConfig::load_with_dotenv()?;
    config.store.path = ":memory:".into();

    let client = FlowClient::connect(&config).await?;
    let (board, mut settles) = BoardController::new(client);
    board.refresh().await?;

    println!("board before:");
    for job in board.jobs().iter().take(5) {
        println!("  #{:<3} {} [{}]", job.order, job.title, job.status);
    }

    let mut order: Vec<String> = board.jobs().iter().map(|j| j.id.clone()).collect();
    order.rotate_left(1);
    let seq = board.begin_reorder(&order, OnConflict::Reject)?;
    println!("reorder {seq} speculated, board already shows the new order");

    if let Some(event) = settles.recv().await {
        println!("reorder {} settled: {:?}", event.seq, event.outcome);
    }

    println!("board after:");
    for job in board.jobs().iter().take(5) {
        println!("  #{:<3} {} [{}]", job.order, job.title, job.status);
    }

    if let Some(candidate) = board.candidates().first().cloned() {
        let seq = board.begin_stage_move(&candidate.id, CandidateStage::Screen, OnConflict::Reject)?;
        println!(
            "stage move {seq} speculated: {} -> {}",
            candidate.stage,
            CandidateStage::Screen
        );
        if let Some(event) = settles.recv().await {
            println!("stage move {} settled: {:?}", event.seq, event.outcome);
        }
    }

    Ok(())
}
