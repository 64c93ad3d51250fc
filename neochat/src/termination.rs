use tokio::sync::broadcast;

/// Why the application is shutting down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interrupted {
    OsSigInt,
    UserInt,
}

/// Handle shared by the loops to request a shutdown of all of them
#[derive(Debug, Clone)]
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    pub fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    pub fn terminate(&mut self, interrupted: Interrupted) -> anyhow::Result<()> {
        tracing::info!(?interrupted, "terminating");
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }
}

async fn terminate_on_ctrl_c(mut terminator: Terminator) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for the interrupt signal");
        return;
    }

    if let Err(err) = terminator.terminate(Interrupted::OsSigInt) {
        tracing::error!(error = %err, "could not broadcast the interrupt signal");
    }
}

/// Creates the broadcast channel every loop listens on for the shutdown request.
/// An OS interrupt is forwarded into the same channel.
pub fn create_termination() -> (Terminator, broadcast::Receiver<Interrupted>) {
    let (tx, rx) = broadcast::channel(1);
    let terminator = Terminator::new(tx);

    tokio::spawn(terminate_on_ctrl_c(terminator.clone()));

    (terminator, rx)
}
