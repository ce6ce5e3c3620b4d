//! Stateless companion endpoint: one prompt in, raw model text out.
//!
//! No tools and no conversation; every request is a fresh single-message
//! exchange with the model.

mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use dto::{ChatBody, ChatQuery, ChatResponse, ErrorResponse};
pub use error::ServerError;
pub use router::{router, serve};
pub use state::ServerState;
