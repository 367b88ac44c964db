//! 按类型名称批量生成条目
//!
//! [`ClassLoader`] 把类型名称列表转换为 (标识符, 工厂) 条目，可以直接作为
//! [`Container::new`](crate::Container::new) 的条目来源。

use crate::autowire::resolve_autowire;
use di_abstractions::{factory, Entry};
use di_common::DEFAULT_AUTOWIRE_ID;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

type Apply = Box<dyn FnMut(&str) -> Vec<Entry> + Send>;

/// 类型名称条目加载器
///
/// 默认每个名称生成一个条目，工厂通过解析根的自动装配条目实例化该类型。
/// 自定义 `apply` 时每个名称可以生成任意数量的条目，零个即跳过。
pub struct ClassLoader<I> {
    names: I,
    apply: Apply,
    pending: VecDeque<Entry>,
}

impl<I> ClassLoader<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// 使用默认自动装配条目标识符
    pub fn new<N>(names: N) -> Self
    where
        N: IntoIterator<IntoIter = I>,
    {
        Self::with_autowire_id(names, DEFAULT_AUTOWIRE_ID)
    }

    /// 使用指定的自动装配条目标识符
    pub fn with_autowire_id<N>(names: N, autowire_id: impl Into<String>) -> Self
    where
        N: IntoIterator<IntoIter = I>,
    {
        let autowire_id = autowire_id.into();
        Self::with_apply(names, move |name| vec![autowire_entry(name, &autowire_id)])
    }

    /// 使用自定义的条目生成逻辑
    pub fn with_apply<N, F>(names: N, apply: F) -> Self
    where
        N: IntoIterator<IntoIter = I>,
        F: FnMut(&str) -> Vec<Entry> + Send + 'static,
    {
        Self {
            names: names.into_iter(),
            apply: Box::new(apply),
            pending: VecDeque::new(),
        }
    }
}

impl<I> Iterator for ClassLoader<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                return Some(entry);
            }

            let name = self.names.next()?;
            let entries = (self.apply)(name.as_ref());
            debug!("为 {} 生成 {} 个条目", name.as_ref(), entries.len());
            self.pending.extend(entries);
        }
    }
}

impl<I> fmt::Debug for ClassLoader<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassLoader")
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

/// 以类型名称为标识符、通过自动装配实例化的条目
pub fn autowire_entry(type_name: &str, autowire_id: &str) -> Entry {
    let name = type_name.to_string();
    let autowire_id = autowire_id.to_string();

    let entry_factory = factory(move |container| {
        let autowire = resolve_autowire(container, &autowire_id)?;
        autowire.instantiate(container, &name, Vec::new())
    });

    (type_name.to_string(), entry_factory)
}
