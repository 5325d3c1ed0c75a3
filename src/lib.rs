//! 员工名录后端
//! 提供认证、角色授权与员工记录管理

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod response;
pub mod routes;
pub mod server;
pub mod services;
pub mod telemetry;
