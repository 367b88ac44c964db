//! # DI Common
//!
//! 依赖注入容器各层共用的基础类型。
//!
//! ## 核心类型
//!
//! - [`Instance`] - 容器产出的类型擦除值
//! - [`TypeMetadata`] - 构造函数反射元数据
//! - [`DependencyError`] - 解析与自动装配错误
//! - [`ContainerSettings`] - 容器配置

pub mod configuration;
pub mod errors;
pub mod instance;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use instance::*;
pub use metadata::*;
