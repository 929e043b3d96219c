pub mod storage;

pub use storage::{FileStore, KeyValueStore, LabStore, MemoryStore, PROJECTS_KEY, USER_KEY};
