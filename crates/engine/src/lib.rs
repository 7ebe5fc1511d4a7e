// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hs-engine: delivery engine for the hubsync content synchronizer.
//!
//! Takes pending tasks from the hs-core queue, serializes the referenced
//! local entity, pushes it to the destination site over authenticated HTTP,
//! and records the outcome (relation on success, audit entry always).

pub mod dispatch;
pub mod enqueue;
pub mod push;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use dispatch::{DispatchError, DispatchResult, Dispatcher, Messenger};
pub use enqueue::{
    enqueue_content, enqueue_media, enqueue_menu_link, enqueue_term, EnqueueError, EnqueueResult,
};
pub use push::{PushClient, PushError, PushReceipt, PushResult};
pub use transport::{HttpResponse, HttpTransport, PushTransport, TransportError, TransportResult};
