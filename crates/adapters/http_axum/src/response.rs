//! Response envelopes and the hypermedia links they carry.

mod envelope;
mod link;

pub use envelope::{ApiResponse, PagedApiResponse};
pub use link::{Link, Links};
