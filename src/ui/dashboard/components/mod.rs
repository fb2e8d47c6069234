//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod airdrop_list;
pub mod footer;
pub mod header;
pub mod logs;
pub mod stats_panel;
