pub mod backend;
pub mod mock;

pub use backend::BackendClient;
