//! Fire-and-forget invitation email dispatch.
//!
//! The issuing operation never waits on delivery: it hands the message
//! to a [`ConviteNotifier`] and returns. The production notifier pushes
//! onto an unbounded channel drained by a detached tokio task; delivery
//! failures are logged, never surfaced to the HTTP caller.

use std::sync::Mutex;

use talentos_core::models::convite::TipoEnvio;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One queued invitation email.
#[derive(Debug, Clone)]
pub struct ConviteEmail {
    pub email: String,
    /// Full link with the token embedded, ready to render.
    pub link: String,
    pub tipo_envio: TipoEnvio,
}

/// Injectable dispatch seam. `enviar` must not block on delivery.
pub trait ConviteNotifier: Send + Sync {
    fn enviar(&self, mail: ConviteEmail);
}

/// Channel-backed notifier: messages are consumed by a detached worker
/// task. The actual SMTP relay sits behind this worker in deployment;
/// here the worker records the dispatch in the structured log.
pub struct QueueNotifier {
    tx: mpsc::UnboundedSender<ConviteEmail>,
}

impl QueueNotifier {
    /// Spawn the delivery worker and return the sending half.
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<ConviteEmail>();
        tokio::spawn(async move {
            while let Some(mail) = rx.recv().await {
                info!(
                    email = %mail.email,
                    tipo_envio = i64::from(mail.tipo_envio),
                    link = %mail.link,
                    "Enviando convite por email"
                );
            }
            warn!("Invitation mail worker stopped");
        });
        Self { tx }
    }
}

impl ConviteNotifier for QueueNotifier {
    fn enviar(&self, mail: ConviteEmail) {
        // Receiver only drops at shutdown; losing a mail then is fine.
        let _ = self.tx.send(mail);
    }
}

/// Test double that records every dispatched mail instead of sending.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<ConviteEmail>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<ConviteEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl ConviteNotifier for RecordingNotifier {
    fn enviar(&self, mail: ConviteEmail) {
        self.sent.lock().unwrap().push(mail);
    }
}

impl<N: ConviteNotifier> ConviteNotifier for std::sync::Arc<N> {
    fn enviar(&self, mail: ConviteEmail) {
        (**self).enviar(mail);
    }
}
