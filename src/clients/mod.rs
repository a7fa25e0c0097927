pub mod instagram_api;
pub mod instagram_client;
pub mod memory_client;

pub use instagram_api::InstagramApi;
pub use instagram_client::InstagramClient;
pub use memory_client::{ApiCall, MemoryClient};
