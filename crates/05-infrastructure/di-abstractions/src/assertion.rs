//! 类型断言策略
//!
//! 标识符看起来像类型名（首字母大写且不含 `.`）并且该类型已知时，
//! 解析出的实例必须是该类型。判断是启发式的，因此做成可替换的策略。

use di_common::{DependencyResult, Instance};

/// 类型断言策略 trait
pub trait TypeAssertion: Send + Sync {
    /// 检查实例是否满足标识符隐含的类型
    fn assert_type(&self, identifier: &str, instance: &Instance) -> DependencyResult<()>;
}

/// 标识符是否形如类型名
pub fn looks_like_type_name(identifier: &str) -> bool {
    identifier
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
        && !identifier.contains('.')
}
