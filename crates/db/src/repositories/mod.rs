//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async queries that
//! accept `&PgPool` as the first argument.

pub mod annotation_repo;
pub mod video_repo;

pub use annotation_repo::AnnotationRepo;
pub use video_repo::VideoRepo;
