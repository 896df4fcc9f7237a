pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod matching;
pub mod oauth;
pub mod product;
pub mod response;
pub mod review;
pub mod storage;
pub mod user;
