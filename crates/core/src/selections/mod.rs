//! Saved modal filter selections

pub mod ports;
