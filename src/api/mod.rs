mod client;
mod cursor;
mod query;

pub use client::AskbotClient;
pub use query::SearchFilter;
