//! SIS Course Service - 学生信息系统课程与院系服务
//!
//! 基于 Actix Web 构建的课程目录后端，维护课程、院系以及两者之间的关联。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（含引用完整性检查）
//! - `storage`: 数据存储层（SeaORM，含课程视图组装与关联写入）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
