//! 自动装配抽象接口

use crate::resolver::Resolver;
use di_common::{DependencyResult, Instance};

/// 自动装配 trait
///
/// 容器通过自动装配条目（默认标识符 `"Autowire"`）取得实现，
/// 条目值必须是 `Arc<dyn Autowire>`。
pub trait Autowire: Send + Sync {
    /// 实例化类型并注入依赖
    ///
    /// `args` 按位置满足前 N 个构造函数参数，其余参数从 `container` 解析。
    fn instantiate(
        &self,
        container: &dyn Resolver,
        type_name: &str,
        args: Vec<Instance>,
    ) -> DependencyResult<Instance>;
}

/// 构造函数依赖描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDescriptor {
    /// 容器标识符
    pub key: String,
    /// 缺失时是否以空值代替
    pub optional: bool,
}

impl DependencyDescriptor {
    /// 创建必需依赖
    pub fn required(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            optional: false,
        }
    }
}
