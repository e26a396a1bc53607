//! Domain types and validation for the video annotation service.
//!
//! - [`timestamp`] -- the [`TimeStamp`](timestamp::TimeStamp) scalar and its JSON codec.
//! - [`duration`] -- unit-suffixed duration lexer used by the time stamp decoder.
//! - [`annotation`] / [`video`] -- field and interval validation.

pub mod annotation;
pub mod duration;
pub mod error;
pub mod timestamp;
pub mod types;
pub mod video;
