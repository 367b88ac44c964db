//! 依赖注入容器
//!
//! 条目在首次解析时由工厂创建并缓存；未注册的点分标识符按最长已注册前缀
//! 委托给子容器解析。

use crate::autowire::resolve_autowire;
use di_abstractions::{Factory, Resolver, TypeAssertion};
use di_common::{ContainerSettings, DependencyError, DependencyResult, Instance};
use dashmap::DashMap;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 条目映射
///
/// 派生容器只保存新增或覆盖的条目，其余条目通过父映射共享。
struct EntryMap {
    parent: Option<Arc<EntryMap>>,
    own: IndexMap<String, Factory>,
    len: usize,
}

impl EntryMap {
    fn root(own: IndexMap<String, Factory>) -> Self {
        let len = own.len();
        Self {
            parent: None,
            own,
            len,
        }
    }

    fn overlay(parent: Arc<Self>, own: IndexMap<String, Factory>) -> Self {
        let added = own.keys().filter(|key| !parent.contains_key(key)).count();
        Self {
            len: parent.len + added,
            parent: Some(parent),
            own,
        }
    }

    fn get(&self, identifier: &str) -> Option<&Factory> {
        match self.own.get(identifier) {
            Some(factory) => Some(factory),
            None => self.parent.as_ref()?.get(identifier),
        }
    }

    fn contains_key(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    /// 按注册顺序列出标识符，覆盖的条目保留原来的位置
    fn keys(&self) -> Vec<&str> {
        let Some(parent) = &self.parent else {
            return self.own.keys().map(String::as_str).collect();
        };

        let mut keys = parent.keys();
        keys.extend(
            self.own
                .keys()
                .map(String::as_str)
                .filter(|key| !parent.contains_key(key)),
        );
        keys
    }
}

/// 具体的依赖注入容器实现
///
/// 条目映射构造后不可变，只能通过 [`Container::with`] 派生新容器；
/// 实例缓存是唯一的可变状态，且只属于当前容器。
pub struct Container {
    /// 标识符到工厂的映射，派生容器之间共享未覆盖的工厂
    entries: Arc<EntryMap>,
    /// 已实例化的条目
    instances: DashMap<String, Instance>,
    /// 委托查找容器，`None` 表示容器自身
    delegate: Option<Arc<dyn Resolver>>,
    /// 类型断言策略
    type_assertion: Option<Arc<dyn TypeAssertion>>,
    /// 容器配置
    settings: ContainerSettings,
}

impl Container {
    /// 以条目创建容器，委托查找指向容器自身
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Factory)>,
        K: Into<String>,
    {
        ContainerBuilder::new().entries(entries).build()
    }

    /// 创建容器构建器
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// 派生一个添加或替换了条目的容器
    ///
    /// 新条目在键冲突时优先；副本的缓存为空。原容器的委托指向自身时，
    /// 副本的委托也指向副本自身。
    pub fn with<I, K>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Factory)>,
        K: Into<String>,
    {
        let own: IndexMap<String, Factory> = entries
            .into_iter()
            .map(|(identifier, factory)| (identifier.into(), factory))
            .collect();
        let overridden = own
            .keys()
            .filter(|key| self.entries.contains_key(key))
            .count();
        let merged = EntryMap::overlay(Arc::clone(&self.entries), own);

        debug!(
            "派生容器: {} 个条目, 覆盖 {} 个",
            merged.len,
            overridden
        );

        Self {
            entries: Arc::new(merged),
            instances: DashMap::new(),
            delegate: self.delegate.clone(),
            type_assertion: self.type_assertion.clone(),
            settings: self.settings.clone(),
        }
    }

    /// 按注册顺序列出条目标识符
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().into_iter()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len
    }

    /// 是否没有条目
    pub fn is_empty(&self) -> bool {
        self.entries.len == 0
    }

    /// 条目是否已实例化
    pub fn is_resolved(&self, identifier: &str) -> bool {
        self.instances.contains_key(identifier)
    }

    /// 容器配置
    pub fn settings(&self) -> &ContainerSettings {
        &self.settings
    }

    /// 实例化类型并自动装配其依赖
    ///
    /// 通过自动装配条目完成，条目缺失时返回未找到错误。
    pub fn autowire(&self, type_name: &str, args: Vec<Instance>) -> DependencyResult<Instance> {
        let autowire = resolve_autowire(self, &self.settings.autowire_id)?;
        debug!("自动装配: {} (显式参数 {} 个)", type_name, args.len());
        autowire.instantiate(self.root(), type_name, args)
    }

    /// 自动装配并转换为指定类型
    pub fn autowire_as<T: Any + Send + Sync>(
        &self,
        type_name: &str,
        args: Vec<Instance>,
    ) -> DependencyResult<Arc<T>> {
        let instance = self.autowire(type_name, args)?;
        instance
            .downcast::<T>()
            .ok_or_else(|| DependencyError::TypeMismatch {
                identifier: type_name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: instance.type_name().to_string(),
            })
    }

    /// 传给工厂的解析根
    fn root(&self) -> &dyn Resolver {
        match &self.delegate {
            Some(delegate) => &**delegate,
            None => self,
        }
    }

    fn assert_type(&self, identifier: &str, instance: &Instance) -> DependencyResult<()> {
        if !self.settings.assert_types {
            return Ok(());
        }

        let Some(policy) = &self.type_assertion else {
            return Ok(());
        };

        policy.assert_type(identifier, instance).map_err(|e| {
            warn!("类型断言失败: {}", e);
            e
        })
    }

    /// 从标识符末尾逐段缩短，找出最长的已注册前缀
    ///
    /// 返回 (容器标识符, 子标识符)。
    fn find_sub_container<'a>(&self, identifier: &'a str) -> Option<(&'a str, &'a str)> {
        let mut end = identifier.len();

        while let Some(pos) = identifier[..end].rfind('.') {
            let container_id = &identifier[..pos];
            if self.entries.contains_key(container_id) {
                return Some((container_id, &identifier[pos + 1..]));
            }
            end = pos;
        }

        None
    }

    fn get_sub(&self, identifier: &str) -> DependencyResult<Instance> {
        let Some((container_id, sub_id)) = self.find_sub_container(identifier) else {
            return Err(DependencyError::not_found(identifier));
        };

        let candidate = self.get(container_id)?;
        let Some(sub) = as_resolver(&candidate) else {
            warn!(
                "条目 {} 不是容器 ({}), 无法解析 {}",
                container_id,
                candidate.type_name(),
                identifier
            );
            return Err(DependencyError::NoSubContainer {
                identifier: container_id.to_string(),
            });
        };

        debug!("委托子容器解析: {} -> {}", container_id, sub_id);
        sub.get(sub_id)
    }

    fn has_sub(&self, identifier: &str) -> bool {
        let Some((container_id, sub_id)) = self.find_sub_container(identifier) else {
            return false;
        };

        match self.get(container_id) {
            Ok(candidate) => as_resolver(&candidate).is_some_and(|sub| sub.has(sub_id)),
            Err(e) => {
                debug!("子容器 {} 解析失败: {}", container_id, e);
                false
            }
        }
    }
}

impl Resolver for Container {
    fn get(&self, identifier: &str) -> DependencyResult<Instance> {
        if let Some(instance) = self
            .instances
            .get(identifier)
            .map(|cached| cached.value().clone())
        {
            trace!("命中缓存: {}", identifier);
            return Ok(instance);
        }

        let Some(factory) = self.entries.get(identifier) else {
            return self.get_sub(identifier);
        };

        debug!("实例化条目: {}", identifier);
        let instance = factory(self.root())?;
        self.assert_type(identifier, &instance)?;

        // 并发解析时保留最先写入的实例
        let instance = self
            .instances
            .entry(identifier.to_string())
            .or_insert(instance)
            .value()
            .clone();

        Ok(instance)
    }

    fn has(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier) || self.has_sub(identifier)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("entries", &self.entries.keys())
            .field("resolved", &self.instances.len())
            .field("delegated", &self.delegate.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

/// 把实例视为子容器
///
/// 支持直接存放的 [`Container`]、`Arc<Container>` 和 `Arc<dyn Resolver>`。
pub fn as_resolver(instance: &Instance) -> Option<&dyn Resolver> {
    if let Some(container) = instance.downcast_ref::<Container>() {
        return Some(container);
    }

    if let Some(container) = instance.downcast_ref::<Arc<Container>>() {
        return Some(&**container);
    }

    instance
        .downcast_ref::<Arc<dyn Resolver>>()
        .map(|resolver| &**resolver)
}

/// 容器构建器实现
#[derive(Default)]
pub struct ContainerBuilder {
    entries: IndexMap<String, Factory>,
    delegate: Option<Arc<dyn Resolver>>,
    type_assertion: Option<Arc<dyn TypeAssertion>>,
    settings: ContainerSettings,
}

impl ContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加条目
    pub fn entry<F>(mut self, identifier: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn Resolver) -> DependencyResult<Instance> + Send + Sync + 'static,
    {
        self.entries
            .insert(identifier.into(), di_abstractions::factory(f));
        self
    }

    /// 批量添加条目，后添加的覆盖先添加的
    pub fn entries<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Factory)>,
        K: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(identifier, f)| (identifier.into(), f)));
        self
    }

    /// 设置委托查找容器
    pub fn delegate(mut self, delegate: Arc<dyn Resolver>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// 设置类型断言策略
    pub fn type_assertion(mut self, policy: Arc<dyn TypeAssertion>) -> Self {
        self.type_assertion = Some(policy);
        self
    }

    /// 设置容器配置
    pub fn settings(mut self, settings: ContainerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// 构建容器
    pub fn build(self) -> Container {
        debug!("构建容器完成，注册了 {} 个条目", self.entries.len());

        Container {
            entries: Arc::new(EntryMap::root(self.entries)),
            instances: DashMap::new(),
            delegate: self.delegate,
            type_assertion: self.type_assertion,
            settings: self.settings,
        }
    }
}
