use crate::flow::MintState;
use std::io::{self, Write};
use tokio::sync::watch;

pub const BUSY_LABEL: &str = "Minting...";

/// What the user sees for a given [`MintState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintView {
    pub button_label: String,
    /// The trigger is disabled while an attempt is running.
    pub busy: bool,
    pub status: Option<String>,
}

impl MintView {
    pub fn from_state(state: &MintState, amount_usd: u64) -> Self {
        let busy = state.is_in_flight();
        let button_label = if busy {
            BUSY_LABEL.to_string()
        } else {
            format!("Mint BTC Pegged Coins (${amount_usd})")
        };
        let status = match state {
            MintState::Success(hash) => Some(format!("Transaction successful! Hash: {hash}")),
            MintState::Failed(message) => Some(message.clone()),
            _ => None,
        };
        Self {
            button_label,
            busy,
            status,
        }
    }
}

/// Writes one line per state change until the flow is dropped. Returns the writer.
pub async fn render_states<W: Write>(
    mut states: watch::Receiver<MintState>,
    amount_usd: u64,
    mut out: W,
) -> io::Result<W> {
    while states.changed().await.is_ok() {
        let view = MintView::from_state(&states.borrow_and_update(), amount_usd);
        match view.status {
            Some(status) => writeln!(out, "{status}")?,
            None => writeln!(out, "[{}]", view.button_label)?,
        }
    }
    Ok(out)
}
