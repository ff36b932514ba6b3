//! Extraction and search pipeline for the UnB statistical-yearbook viewer:
//! titled tables and charts out of a fetched chapter page, plus row-level
//! search over the extracted tables.

pub mod catalog;
pub mod extract;
pub mod fetch;
pub mod search;
