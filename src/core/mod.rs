pub mod error;
pub mod insert;
pub mod matching;
pub mod naming;
pub mod statement;
pub mod types;
