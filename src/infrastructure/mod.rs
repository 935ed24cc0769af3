pub mod notifications;
pub mod sources;
