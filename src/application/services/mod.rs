pub mod alert_feed;
pub mod history;
pub mod monitor;
