//! # 依赖注入具体实现
//!
//! 提供惰性实例化的容器、基于元数据的自动装配、类型注册表和按类型名称
//! 生成条目的加载器。
//!
//! 条目是 (标识符, 工厂) 对。工厂接收解析根，首次解析时调用，结果按容器缓存。
//! 点分标识符在未直接注册时委托给最长的已注册前缀所对应的子容器。

pub mod annotations;
pub mod autowire;
pub mod container;
pub mod loader;
pub mod registry;

pub use annotations::extract_param_annotations;
pub use autowire::{autowire_factory, resolve_autowire, ReflectionAutowire};
pub use container::{as_resolver, Container, ContainerBuilder};
pub use loader::{autowire_entry, ClassLoader};
pub use registry::TypeRegistry;
