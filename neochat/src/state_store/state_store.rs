use std::time::Instant;

use anyhow::Context;
use chatstore::{controller::ChatController, storage::Storage, StoreError};
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use crate::termination::{Interrupted, Terminator};

use super::{action::Action, State};

/// StateStore owns the chat controller. It applies the actions sent by the UI
/// and publishes a fresh [State] after each of them.
pub struct StateStore<S> {
    state_tx: UnboundedSender<State>,
    controller: ChatController<S>,
    /// Prompt waiting to be dismissed by the user
    notice: Option<String>,
}

impl<S: Storage> StateStore<S> {
    pub fn new(controller: ChatController<S>) -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (
            StateStore {
                state_tx,
                controller,
                notice: None,
            },
            state_rx,
        )
    }

    fn snapshot(&self) -> State {
        State::capture(&self.controller, self.notice.clone())
    }

    /// Surfaces a failed operation to the user
    fn report(&mut self, err: StoreError) {
        if err.is_validation() {
            tracing::debug!(error = %err, "rejected user input");
        } else {
            tracing::error!(error = ?err, "could not persist changes");
        }

        self.notice = Some(err.to_string());
    }

    /// Applies a single action to the controller. Failures become the current notice.
    fn handle_action(&mut self, action: Action) {
        let result = match action {
            Action::CreateRoom { name } => self.controller.create_room(&name),
            Action::RequestDeleteRoom { room } => self.controller.request_delete(&room),
            Action::ConfirmDeleteRoom => self.controller.confirm_delete().map(|_| ()),
            Action::CancelDeleteRoom => {
                self.controller.cancel_delete();
                Ok(())
            }
            Action::JoinRoom { room } => self.controller.join_room(&room),
            Action::LeaveRoom => {
                self.controller.leave_room();
                Ok(())
            }
            Action::SendMessage { sender, text } => {
                self.controller.send_message(&sender, &text).map(|_| ())
            }
            Action::Typing => {
                self.controller.typing(Instant::now());
                Ok(())
            }
            Action::ToggleTheme => self.controller.toggle_theme().map(|_| ()),
            Action::DismissNotice => {
                self.notice = None;
                Ok(())
            }
            Action::Exit => Ok(()),
        };

        if let Err(err) = result {
            self.report(err);
        }
    }

    pub async fn main_loop(
        mut self,
        mut terminator: Terminator,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        // the initial state once
        self.state_tx
            .send(self.snapshot())
            .context("could not publish the initial state")?;

        let result = loop {
            let typing_deadline = self.controller.typing_deadline();

            tokio::select! {
                // Handle the actions coming from the UI
                maybe_action = action_rx.recv() => match maybe_action {
                    Some(Action::Exit) => {
                        let _ = terminator.terminate(Interrupted::UserInt);

                        break Interrupted::UserInt;
                    },
                    Some(action) => self.handle_action(action),
                    // every sender is gone, the UI has shut down
                    None => break Interrupted::UserInt,
                },
                // Clear the typing indicator once the user stopped typing
                _ = wait_until(typing_deadline) => {
                    self.controller.expire_typing(Instant::now());
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                }
            }

            self.state_tx
                .send(self.snapshot())
                .context("could not publish the state")?;
        };

        Ok(result)
    }
}

/// Resolves at `deadline`, never resolves without one
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
