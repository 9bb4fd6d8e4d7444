//! 商店：商品列表、商品详情与分类列表

pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
