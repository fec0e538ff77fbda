pub mod dispatcher;
pub mod email;
pub mod message;
pub mod whatsapp;

pub use dispatcher::{send_thank_you, Ack, NotificationDispatcher, ProviderDispatcher};
