pub mod collection;
pub mod config;
pub mod merge;
pub mod view;
