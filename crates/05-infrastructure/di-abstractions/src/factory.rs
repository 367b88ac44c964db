//! 条目工厂
//!
//! 工厂接收解析根（委托查找容器），产出实例。

use crate::resolver::Resolver;
use di_common::{DependencyResult, Instance};
use std::any::Any;
use std::sync::Arc;

/// 条目工厂类型
pub type Factory = Arc<dyn Fn(&dyn Resolver) -> DependencyResult<Instance> + Send + Sync>;

/// 条目：标识符与工厂
pub type Entry = (String, Factory);

/// 从闭包创建工厂
pub fn factory<F>(f: F) -> Factory
where
    F: Fn(&dyn Resolver) -> DependencyResult<Instance> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// 创建总是返回同一个值的工厂
///
/// 值在每个容器中仍按首次解析缓存，跨容器共享同一份数据。
pub fn constant<T: Any + Send + Sync>(value: T) -> Factory {
    let instance = Instance::new(value);
    factory(move |_| Ok(instance.clone()))
}
