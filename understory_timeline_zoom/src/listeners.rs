// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification for zoom state subscribers.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::state::ZoomState;

/// Callback invoked with the new state after every committed transition.
pub type ZoomListener = Box<dyn FnMut(&ZoomState)>;

/// Handle returned by [`TimelineZoom::subscribe`](crate::TimelineZoom::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Ordered set of listeners, notified in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u32,
    entries: SmallVec<[(ListenerId, ZoomListener); 2]>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: ZoomListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(position) => {
                self.entries.remove(position);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, state: &ZoomState) {
        for (_, listener) in &mut self.entries {
            listener(state);
        }
    }
}

// Manual Debug impl since callbacks aren't Debug
impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
