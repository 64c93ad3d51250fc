use anyhow::Context;
use chatstore::{controller::ChatController, storage::FileStorage};
use clap::Parser;

use crate::{
    config::{Args, Config},
    state_store::StateStore,
    termination::{create_termination, Interrupted},
    ui_management::UiManager,
};

mod config;
mod logging;
mod state_store;
mod termination;
mod ui_management;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from(Args::parse());

    let storage = FileStorage::open(&config.data_dir).with_context(|| {
        format!(
            "could not open the data directory {}",
            config.data_dir.display()
        )
    })?;
    logging::init(&config.log_file)?;
    tracing::info!(data_dir = %storage.dir().display(), "starting neochat");

    let controller = ChatController::load(storage, config.typing_idle);

    let (terminator, interrupt_rx) = create_termination();
    let (state_store, state_rx) = StateStore::new(controller);
    let (ui_manager, action_rx) = UiManager::new();

    // the state store ends last and knows why
    let (reason, _) = tokio::try_join!(
        state_store.main_loop(terminator, action_rx, interrupt_rx.resubscribe()),
        ui_manager.main_loop(state_rx, interrupt_rx),
    )?;

    match reason {
        Interrupted::UserInt => tracing::info!("exited per user request"),
        Interrupted::OsSigInt => tracing::info!("exited because of an os sig int"),
    }

    Ok(())
}
