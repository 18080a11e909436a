pub mod network;

pub use network::FeedForwardNetwork;
