pub mod lock;
pub mod state;
pub mod store_io;
