//! # Attachment Slot
//!
//! Proof-of-payment slip metadata plus the cancellable preview read.
//!
//! ## Staleness Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The only async operation in the system is reading the slip's bytes     │
//! │  for preview. The operator may clear or replace the slip before the     │
//! │  read completes, so every read is tagged with the slot generation       │
//! │  current when it began:                                                 │
//! │                                                                         │
//! │  attach("slip.jpg")  ──► generation 1, spawn read ───────┐              │
//! │  clear()             ──► generation 2                    │              │
//! │  attach("new.jpg")   ──► generation 3, spawn read ──┐    │              │
//! │                                                     │    │              │
//! │  deliver(gen 1, bytes) ─────────────────────────────┼────┴─► DISCARDED  │
//! │  deliver(gen 3, bytes) ─────────────────────────────┴──────► applied    │
//! │                                                                         │
//! │  The core never inspects the bytes; it only parks them for the          │
//! │  collaborator's preview rendering.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use serde::Serialize;

/// Generation tag handed out by [`AttachmentSlot::attach`]; a preview
/// delivery is applied only if its tag still matches the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

/// The attached slip, if any.
#[derive(Debug, Clone)]
struct Attachment {
    name: String,
    preview: Option<Vec<u8>>,
}

/// Holds the slip metadata for the current in-progress order.
#[derive(Debug, Default)]
pub struct AttachmentSlot {
    current: Option<Attachment>,
    generation: u64,
}

/// Read-only projection for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentView {
    pub present: bool,
    pub file_name: String,
    pub preview_loaded: bool,
}

impl AttachmentSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        AttachmentSlot::default()
    }

    /// Records that a file was attached and returns the generation tag a
    /// preview read for it must carry. Replaces any previous attachment.
    pub fn attach(&mut self, name: impl Into<String>) -> Generation {
        self.generation += 1;
        self.current = Some(Attachment {
            name: name.into(),
            preview: None,
        });
        Generation(self.generation)
    }

    /// Clears the slot. Any in-flight preview read becomes stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    /// Applies a completed preview read, unless the slot moved on since
    /// the read began.
    ///
    /// ## Returns
    /// `true` if the bytes were applied, `false` if discarded as stale.
    pub fn deliver_preview(&mut self, generation: Generation, bytes: Vec<u8>) -> bool {
        if generation.0 != self.generation {
            return false;
        }
        match self.current.as_mut() {
            Some(attachment) => {
                attachment.preview = Some(bytes);
                true
            }
            None => false,
        }
    }

    /// Whether a slip is attached.
    pub fn present(&self) -> bool {
        self.current.is_some()
    }

    /// The slip's display name for the committed order, or `None`.
    pub fn file_name(&self) -> Option<&str> {
        self.current.as_ref().map(|a| a.name.as_str())
    }

    /// The preview bytes, once loaded. The session never looks inside.
    pub fn preview(&self) -> Option<&[u8]> {
        self.current.as_ref()?.preview.as_deref()
    }

    /// Projection for rendering.
    pub fn view(&self) -> AttachmentView {
        AttachmentView {
            present: self.present(),
            file_name: self.file_name().unwrap_or("-").to_string(),
            preview_loaded: self.preview().is_some(),
        }
    }
}

/// Reads a slip's bytes for preview.
///
/// The caller pairs this with the generation from [`AttachmentSlot::attach`]
/// and hands the result to [`AttachmentSlot::deliver_preview`], which drops
/// it if the operator moved on meanwhile.
pub async fn read_preview(path: impl AsRef<Path>) -> std::io::Result<Vec<u8>> {
    tokio::fs::read(path).await
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot() {
        let slot = AttachmentSlot::new();
        assert!(!slot.present());
        assert_eq!(slot.file_name(), None);
        assert_eq!(slot.view().file_name, "-");
    }

    #[test]
    fn test_attach_and_deliver() {
        let mut slot = AttachmentSlot::new();
        let generation = slot.attach("slip.jpg");

        assert!(slot.present());
        assert_eq!(slot.file_name(), Some("slip.jpg"));
        assert!(slot.preview().is_none());

        assert!(slot.deliver_preview(generation, vec![1, 2, 3]));
        assert_eq!(slot.preview(), Some(&[1u8, 2, 3][..]));
        assert!(slot.view().preview_loaded);
    }

    #[test]
    fn test_stale_delivery_after_clear_is_discarded() {
        let mut slot = AttachmentSlot::new();
        let generation = slot.attach("slip.jpg");
        slot.clear();

        assert!(!slot.deliver_preview(generation, vec![1, 2, 3]));
        assert!(!slot.present());
    }

    #[test]
    fn test_stale_delivery_after_replace_is_discarded() {
        let mut slot = AttachmentSlot::new();
        let old = slot.attach("old.jpg");
        let new = slot.attach("new.jpg");

        // The read started for old.jpg completes late
        assert!(!slot.deliver_preview(old, vec![9, 9]));
        assert!(slot.preview().is_none());

        // The current read still applies
        assert!(slot.deliver_preview(new, vec![1]));
        assert_eq!(slot.file_name(), Some("new.jpg"));
    }

    #[tokio::test]
    async fn test_read_preview_round_trip() {
        let path = std::env::temp_dir().join("orderdesk-preview-test.bin");
        std::fs::write(&path, b"slip bytes").unwrap();

        let mut slot = AttachmentSlot::new();
        let generation = slot.attach("slip.bin");
        let bytes = read_preview(&path).await.unwrap();
        assert!(slot.deliver_preview(generation, bytes));
        assert_eq!(slot.preview(), Some(&b"slip bytes"[..]));

        std::fs::remove_file(&path).ok();
    }
}
