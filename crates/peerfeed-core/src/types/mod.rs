//! Core type definitions used across the PeerFeed workspace.

pub mod response;

pub use response::Notice;
