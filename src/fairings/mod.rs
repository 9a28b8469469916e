pub mod db;
pub mod trace;
