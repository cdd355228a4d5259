mod manager;
mod persistence;

pub use manager::SnapshotStore;
pub use persistence::{load_snapshots, load_table, save_snapshots, save_table};
