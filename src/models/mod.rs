pub mod ids;
pub mod like;
pub mod message;
pub mod our_date_time;
pub mod post;
pub mod user;
