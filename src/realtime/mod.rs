//! Realtime Transport
//!
//! The same two storage operations as the HTTP surface, carried as JSON text
//! frames over a WebSocket. The connection is authenticated once at upgrade
//! time through the `authKey` query parameter; frames are never re-checked.
//!
//! ## Frame flow
//! 1. On connect the server sends an unsolicited `info` frame.
//! 2. Each inbound frame is decoded into an `InboundFrame` and dispatched by its `type`.
//! 3. Exactly one outbound frame is sent per inbound frame, echoing `requestId`.
//!
//! Application errors are reported in-band and never close the socket.

pub mod handlers;
pub mod protocol;
