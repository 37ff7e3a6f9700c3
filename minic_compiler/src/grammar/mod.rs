//! Grammar vocabulary for the C subset

pub mod keywords;

pub use keywords::Keyword;
