use crate::app::{App, Message, Model, ToastLevel};

/// Log target for the block structure dump.
pub const STRUCTURE_TARGET: &str = "roteiro::structure";

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::ShowStructure => {
                if let Some(dump) = model.structure_dump.as_deref() {
                    tracing::info!(
                        target: STRUCTURE_TARGET,
                        blocks = model.store.len(),
                        "block structure:\n{dump}"
                    );
                }
            }
            Message::AddBlock => {
                model.show_toast(
                    ToastLevel::Info,
                    format!("Bloco {} adicionado", model.store.len()),
                );
            }
            Message::EndDrag => {
                tracing::debug!(selected = model.selected, "drag finished");
            }
            _ => {}
        }
    }
}
