//! 容器实例
//!
//! 容器中的每个条目都产出一个 [`Instance`]：类型擦除的共享值，附带具体类型信息，
//! 便于类型断言和错误诊断。

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 类型擦除的容器实例
///
/// 克隆只增加引用计数，实例身份以指针相等判定。
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Instance {
    /// 包装一个值
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// 包装一个已共享的值，不产生新的分配
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 具体类型的 TypeId
    pub fn value_type_id(&self) -> TypeId {
        self.type_id
    }

    /// 具体类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 是否为指定类型
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// 取得指定类型的共享引用
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// 借用为指定类型
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// 两个实例是否指向同一个值
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.value).cast::<()>(),
            Arc::as_ptr(&other.value).cast::<()>(),
        )
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
