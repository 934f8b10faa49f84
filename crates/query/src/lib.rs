#![deny(unsafe_code)]

mod client;
mod error;
mod http;
mod wire;

pub use client::{QueryClient, submit};
pub use error::{QueryError, QueryResult};
pub use http::{HttpQueryClient, QUERY_ENDPOINT};
pub use wire::{QueryRequest, QueryResponse, WireSpeaker, WireTurn};

pub use clinical_session::APOLOGY_MESSAGE;
