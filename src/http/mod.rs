//! HTTP surface of the relay
//!
//! - GET /ws?name=<participant> - WebSocket upgrade into a relay session
//! - GET /participants - list registered participants
//! - GET /health - health check

mod handlers;
mod routes;
mod state;
mod ws;

pub use routes::create_router;
pub use state::AppState;
