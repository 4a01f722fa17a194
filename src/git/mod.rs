pub mod backend;
pub mod blame;
pub mod diff;
pub mod engine;
pub mod history;
pub mod mapping;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::GitBackend;
pub use blame::BlameCache;
pub use engine::{FileHistory, SharedHistory};
pub use history::{CommitHistory, Cursor};
pub use mapping::LineMapper;
pub use repository::GitRepository;
