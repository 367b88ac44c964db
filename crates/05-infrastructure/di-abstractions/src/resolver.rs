//! 条目解析接口

use di_common::{DependencyError, DependencyResult, Instance};
use std::any::Any;
use std::sync::Arc;

/// 条目解析器 trait
///
/// 容器、子容器和委托查找目标都实现此 trait。
pub trait Resolver: Send + Sync {
    /// 按标识符解析条目
    fn get(&self, identifier: &str) -> DependencyResult<Instance>;

    /// 是否可以解析该标识符，对未知标识符返回 `false` 而不是报错
    fn has(&self, identifier: &str) -> bool;
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn get(&self, identifier: &str) -> DependencyResult<Instance> {
        (**self).get(identifier)
    }

    fn has(&self, identifier: &str) -> bool {
        (**self).has(identifier)
    }
}

/// 带类型转换的解析辅助方法
pub trait ResolverExt: Resolver {
    /// 解析并取得指定类型的共享引用
    fn get_as<T: Any + Send + Sync>(&self, identifier: &str) -> DependencyResult<Arc<T>> {
        let instance = self.get(identifier)?;
        instance
            .downcast::<T>()
            .ok_or_else(|| type_mismatch::<T>(identifier, &instance))
    }

    /// 解析并克隆出指定类型的值，适用于 `Arc<dyn Trait>` 之类的句柄
    fn get_cloned<T: Any + Clone>(&self, identifier: &str) -> DependencyResult<T> {
        let instance = self.get(identifier)?;
        instance
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| type_mismatch::<T>(identifier, &instance))
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}

fn type_mismatch<T>(identifier: &str, instance: &Instance) -> DependencyError {
    DependencyError::TypeMismatch {
        identifier: identifier.to_string(),
        expected: std::any::type_name::<T>().to_string(),
        actual: instance.type_name().to_string(),
    }
}
