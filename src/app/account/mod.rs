//! 账户：顾客注册

pub mod handler;
pub mod model;
pub mod password;
pub mod repository;
pub mod service;
