//! 类型反射抽象
//!
//! 自动装配只依赖 [`MetadataProvider`]，不依赖具体的反射实现。

use di_common::{
    DependencyError, DependencyResult, Instance, ReflectionError, TypeMetadata,
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 构造函数：以位置参数创建实例
pub type Constructor = Arc<dyn Fn(Arguments) -> DependencyResult<Instance> + Send + Sync>;

/// 反射结果
#[derive(Clone)]
pub struct ReflectedType {
    /// 类型元数据
    pub metadata: TypeMetadata,
    /// 构造函数
    pub constructor: Constructor,
}

impl ReflectedType {
    /// 创建反射结果
    pub fn new<F>(metadata: TypeMetadata, constructor: F) -> Self
    where
        F: Fn(Arguments) -> DependencyResult<Instance> + Send + Sync + 'static,
    {
        Self {
            metadata,
            constructor: Arc::new(constructor),
        }
    }

    /// 以参数列表构造实例
    pub fn construct(&self, values: Vec<Option<Instance>>) -> DependencyResult<Instance> {
        (self.constructor)(Arguments::new(self.metadata.name.clone(), values))
    }
}

impl fmt::Debug for ReflectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectedType")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// 元数据提供者 trait
///
/// 给定类型名称，返回其主构造函数的参数列表与调用方式。
pub trait MetadataProvider: Send + Sync {
    /// 反射指定类型，类型未知时返回 [`ReflectionError::UnknownType`]
    fn reflect(&self, type_name: &str) -> Result<ReflectedType, ReflectionError>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Arc<P> {
    fn reflect(&self, type_name: &str) -> Result<ReflectedType, ReflectionError> {
        (**self).reflect(type_name)
    }
}

/// 可描述自身构造函数的类型
///
/// 通常通过 `#[derive(Reflect)]` 实现。
pub trait Reflect: Any + Send + Sync + Sized {
    /// 构造函数元数据
    fn type_metadata() -> TypeMetadata;

    /// 以位置参数构造实例
    fn construct(args: Arguments) -> DependencyResult<Self>;
}

/// 构造函数的位置参数
///
/// `None` 表示可选依赖缺失。
#[derive(Debug, Clone)]
pub struct Arguments {
    type_name: String,
    values: Vec<Option<Instance>>,
}

impl Arguments {
    /// 创建参数列表
    pub fn new(type_name: impl Into<String>, values: Vec<Option<Instance>>) -> Self {
        Self {
            type_name: type_name.into(),
            values,
        }
    }

    /// 被构造的类型名称
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// 参数个数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 取得原始实例，超出范围或缺失时为 `None`
    pub fn instance(&self, position: usize) -> Option<&Instance> {
        self.values.get(position).and_then(Option::as_ref)
    }

    /// 取出全部参数
    pub fn into_values(self) -> Vec<Option<Instance>> {
        self.values
    }

    /// 必需参数：共享引用
    pub fn shared<T: Any + Send + Sync>(&self, position: usize) -> DependencyResult<Arc<T>> {
        self.optional_shared(position)?
            .ok_or_else(|| self.missing::<T>(position))
    }

    /// 必需参数：克隆值
    pub fn cloned<T: Any + Clone>(&self, position: usize) -> DependencyResult<T> {
        self.optional_cloned(position)?
            .ok_or_else(|| self.missing::<T>(position))
    }

    /// 可选参数：共享引用
    pub fn optional_shared<T: Any + Send + Sync>(
        &self,
        position: usize,
    ) -> DependencyResult<Option<Arc<T>>> {
        self.instance(position)
            .map(|instance| {
                instance
                    .downcast::<T>()
                    .ok_or_else(|| self.mismatch::<T>(position, instance))
            })
            .transpose()
    }

    /// 可选参数：克隆值
    pub fn optional_cloned<T: Any + Clone>(&self, position: usize) -> DependencyResult<Option<T>> {
        self.instance(position)
            .map(|instance| {
                instance
                    .downcast_ref::<T>()
                    .cloned()
                    .ok_or_else(|| self.mismatch::<T>(position, instance))
            })
            .transpose()
    }

    fn missing<T>(&self, position: usize) -> DependencyError {
        DependencyError::InvalidArgument {
            type_name: self.type_name.clone(),
            position,
            expected: std::any::type_name::<T>().to_string(),
            actual: "nothing".to_string(),
        }
    }

    fn mismatch<T>(&self, position: usize, instance: &Instance) -> DependencyError {
        DependencyError::InvalidArgument {
            type_name: self.type_name.clone(),
            position,
            expected: std::any::type_name::<T>().to_string(),
            actual: instance.type_name().to_string(),
        }
    }
}
