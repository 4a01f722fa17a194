//! Data transfer objects (DTOs) for the engine and API responses.
//!
//! - `commit`: Commit, CommitDetail, HistoryResponse, CurrentResponse,
//!   CursorResponse
//! - `blame`: BlameLine, BlameResponse for per-line attribution
//! - `mapping`: LineMapping, MappedLine for line correspondence

pub mod blame;
pub mod commit;
pub mod mapping;

pub use blame::*;
pub use commit::*;
pub use mapping::*;
