pub mod ai;
pub mod deck;
pub mod glossary;
pub mod report_store;
pub mod seed;
pub mod storage;
pub mod term_store;
