//! Dismiss-on-outside-click subscriptions.
//!
//! Each subscription pairs an intent with the screen region of a panel.
//! The region is mounted while the panel is on screen and unmounted when it
//! is not. A pointer-down outside a mounted region yields the intent once;
//! unmounted regions never fire.

use ratatui::layout::{Position, Rect};

/// Kind of pointer event that can trigger a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    MouseDown,
    TouchStart,
}

/// A global pointer-down event in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDown {
    pub kind: PointerKind,
    pub col: u16,
    pub row: u16,
}

impl PointerDown {
    pub fn mouse(col: u16, row: u16) -> Self {
        Self {
            kind: PointerKind::MouseDown,
            col,
            row,
        }
    }
}

/// Handle to a live subscription. Release it with
/// [`DismissRegistry::unsubscribe`].
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

#[derive(Debug)]
struct Slot<I> {
    id: u64,
    intent: I,
    region: Option<Rect>,
}

#[derive(Debug)]
pub struct DismissRegistry<I> {
    slots: Vec<Slot<I>>,
    next_id: u64,
}

impl<I> Default for DismissRegistry<I> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
        }
    }
}

impl<I: Clone + PartialEq + std::fmt::Debug> DismissRegistry<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for outside clicks on behalf of `intent`.
    ///
    /// An existing subscription for an equal intent is replaced, so
    /// re-subscribing never produces duplicate firing.
    pub fn subscribe(&mut self, intent: I) -> Subscription {
        self.slots.retain(|slot| slot.intent != intent);
        let id = self.next_id;
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            intent,
            region: None,
        });
        Subscription(id)
    }

    /// Release a subscription. Unknown or replaced handles are ignored.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.slots.retain(|slot| slot.id != subscription.0);
    }

    /// Record where the subscribed panel is currently drawn.
    pub fn mount(&mut self, subscription: &Subscription, region: Rect) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == subscription.0) {
            slot.region = Some(region);
        }
    }

    /// Mark the subscribed panel as not on screen.
    pub fn unmount(&mut self, subscription: &Subscription) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == subscription.0) {
            slot.region = None;
        }
    }

    pub fn is_mounted(&self, subscription: &Subscription) -> bool {
        self.slots
            .iter()
            .any(|s| s.id == subscription.0 && s.region.is_some())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Intents whose mounted region does not contain the pointer.
    pub fn dispatch(&self, event: PointerDown) -> Vec<I> {
        self.slots
            .iter()
            .filter_map(|slot| {
                let region = slot.region?;
                if region.contains(Position::new(event.col, event.row)) {
                    None
                } else {
                    tracing::debug!(intent = ?slot.intent, ?event.kind, "outside click");
                    Some(slot.intent.clone())
                }
            })
            .collect()
    }
}
