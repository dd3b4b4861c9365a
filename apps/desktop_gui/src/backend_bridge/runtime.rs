//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{Controllers, FormController, FormKind};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(controllers: Controllers, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            forward_events(&controllers.flames, ui_tx.clone());
            forward_events(&controllers.zodiac, ui_tx.clone());
            let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend command received");
                match cmd {
                    BackendCommand::CompleteFlames(ticket) => {
                        let controller = controllers.flames.clone();
                        tokio::spawn(async move {
                            controller.complete_submit(ticket).await;
                        });
                    }
                    BackendCommand::CompleteZodiac(ticket) => {
                        let controller = controllers.zodiac.clone();
                        tokio::spawn(async move {
                            controller.complete_submit(ticket).await;
                        });
                    }
                }
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    });
}

fn forward_events<K: FormKind>(controller: &FormController<K>, ui_tx: Sender<UiEvent>) {
    let mut events = controller.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if ui_tx.try_send(UiEvent::Form(event)).is_err() {
                        tracing::warn!("ui event queue unavailable; dropping form event");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "ui event forwarder lagged behind form events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
