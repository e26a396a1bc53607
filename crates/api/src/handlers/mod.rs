pub mod annotations;
pub mod videos;
