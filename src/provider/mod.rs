pub mod carfax;
pub mod client;
pub mod clearwin;
pub mod mock;
pub mod nhtsa;
pub mod types;


pub use carfax::CarfaxProvider;
pub use client::{HistoryProvider, default_providers};
pub use clearwin::ClearWinProvider;
pub use mock::MockProvider;
pub use nhtsa::NhtsaProvider;
pub use types::ProviderError;
