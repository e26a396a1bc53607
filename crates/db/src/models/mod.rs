//! Row models and DTOs.
//!
//! [`TimeStamp`](notevook_core::timestamp::TimeStamp) columns are stored as
//! `BIGINT` seconds and decoded through `TryFrom<i64>`.

pub mod annotation;
pub mod video;
