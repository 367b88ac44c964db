//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义条目解析、自动装配和类型反射的核心接口。
//!
//! ## 核心接口
//!
//! - [`Resolver`] - 按标识符解析条目（get / has）
//! - [`Autowire`] - 根据构造函数元数据自动装配实例
//! - [`MetadataProvider`] - 提供类型的构造函数元数据
//! - [`Reflect`] - 可在编译期描述自身构造函数的类型
//! - [`TypeAssertion`] - 解析结果的类型断言策略

pub mod assertion;
pub mod autowire;
pub mod factory;
pub mod reflection;
pub mod resolver;

pub use assertion::*;
pub use autowire::*;
pub use factory::*;
pub use reflection::*;
pub use resolver::*;

pub use di_common::{
    AutowireError, ConstructorInfo, ContainerSettings, DependencyError, DependencyResult,
    Instance, ParameterInfo, ReflectionError, TypeMetadata,
};
