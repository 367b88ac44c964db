//! 类型注册表
//!
//! 运行时的 [`MetadataProvider`] 实现：按名称登记类型的构造函数元数据和构造方式，
//! 同时记录名称对应的具体类型，用作类型断言策略。

use di_abstractions::{
    looks_like_type_name, Arguments, MetadataProvider, Reflect, ReflectedType, TypeAssertion,
};
use di_common::{
    DependencyError, DependencyResult, Instance, ReflectionError, TypeMetadata,
};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 名称对应的已知类型
///
/// 以 `Arc<T>` 包装存放的值同样视为 `T` 的实例。
#[derive(Debug, Clone, Copy)]
struct KnownType {
    type_id: TypeId,
    shared_type_id: TypeId,
    type_name: &'static str,
}

impl KnownType {
    fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            shared_type_id: TypeId::of::<Arc<T>>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    fn accepts(&self, instance: &Instance) -> bool {
        let actual = instance.value_type_id();
        actual == self.type_id || actual == self.shared_type_id
    }
}

/// 类型注册表
#[derive(Default)]
pub struct TypeRegistry {
    /// 可反射的类型
    types: DashMap<String, ReflectedType>,
    /// 名称到具体类型的映射
    known: DashMap<String, KnownType>,
}

impl TypeRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记可反射类型，同时登记为已知类型
    pub fn register<T: Reflect>(&self) -> &Self {
        let metadata = T::type_metadata();
        let name = metadata.name.clone();
        debug!("登记类型: {} ({})", name, std::any::type_name::<T>());

        self.types.insert(
            name.clone(),
            ReflectedType::new(metadata, |args| T::construct(args).map(Instance::new)),
        );
        self.known.insert(name, KnownType::of::<T>());
        self
    }

    /// 以手写元数据和构造函数登记类型
    pub fn register_described<F>(&self, metadata: TypeMetadata, constructor: F) -> &Self
    where
        F: Fn(Arguments) -> DependencyResult<Instance> + Send + Sync + 'static,
    {
        debug!("登记类型: {}", metadata.name);
        self.types
            .insert(metadata.name.clone(), ReflectedType::new(metadata, constructor));
        self
    }

    /// 登记接口名称对应的具体类型，通常是 `Arc<dyn Trait>`
    pub fn register_interface<T: Any>(&self, name: impl Into<String>) -> &Self {
        let name = name.into();
        debug!("登记接口: {} -> {}", name, std::any::type_name::<T>());
        self.known.insert(name, KnownType::of::<T>());
        self
    }

    /// 是否可以反射该类型
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// 已登记的可反射类型名称，按字母排序
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }
}

impl MetadataProvider for TypeRegistry {
    fn reflect(&self, type_name: &str) -> Result<ReflectedType, ReflectionError> {
        self.types
            .get(type_name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ReflectionError::UnknownType {
                type_name: type_name.to_string(),
            })
    }
}

impl TypeAssertion for TypeRegistry {
    fn assert_type(&self, identifier: &str, instance: &Instance) -> DependencyResult<()> {
        if !looks_like_type_name(identifier) {
            return Ok(());
        }

        let Some(known) = self.known.get(identifier).map(|entry| *entry.value()) else {
            return Ok(());
        };

        if known.accepts(instance) {
            return Ok(());
        }

        debug!(
            "{} 期望类型 {}, 实际为 {}",
            identifier,
            known.type_name,
            instance.type_name()
        );
        Err(DependencyError::TypeMismatch {
            identifier: identifier.to_string(),
            expected: identifier.to_string(),
            actual: instance.type_name().to_string(),
        })
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.names())
            .field("known", &self.known.len())
            .finish()
    }
}
