pub mod flags;
pub mod link;
pub mod merge;
pub mod names;
pub mod output;
pub mod phone;
pub mod products;
