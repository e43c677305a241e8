pub mod block_ring;

pub use block_ring::BlockRing;
