pub mod envelope;
pub mod list_query;
pub mod optimistic;
pub mod ordering;
pub mod request_sequence;
pub mod resource;
pub mod upload;
pub mod validation;
