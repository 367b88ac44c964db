//! 组装示例容器

use crate::services::{ConfiguredGreeter, Greeter, Mailer};
use di_abstractions::{constant, Instance, ResolverExt};
use di_common::ContainerSettings;
use di_impl::{autowire_factory, ClassLoader, Container, TypeRegistry};
use std::sync::Arc;
use tracing::debug;

/// 可自动装配的类型
pub const SERVICE_TYPES: [&str; 2] = ["ConfiguredGreeter", "Mailer"];

/// 构建示例容器
///
/// `config` 是嵌套的子容器，`config.greeting.text` 经过两层委托解析。
pub fn build_container(settings: ContainerSettings) -> Container {
    let registry = Arc::new(TypeRegistry::new());
    registry
        .register::<ConfiguredGreeter>()
        .register::<Mailer>()
        .register_interface::<Arc<dyn Greeter>>("Greeter");

    let greeting = Instance::new(Container::new([("text", constant("你好".to_string()))]));
    let config = Instance::new(
        Container::builder()
            .entry("greeting", move |_| Ok(greeting.clone()))
            .entry("signature", |_| Ok(Instance::new("example-app".to_string())))
            .build(),
    );

    let autowire_id = settings.autowire_id.clone();
    debug!("自动装配条目: {}", autowire_id);

    Container::builder()
        .entries(ClassLoader::with_autowire_id(SERVICE_TYPES, &autowire_id))
        .entry("config", move |_| Ok(config.clone()))
        .entry("app.name", |_| Ok(Instance::new("example-app".to_string())))
        .entry("Greeter", |c| {
            let greeter: Arc<dyn Greeter> = c.get_as::<ConfiguredGreeter>("ConfiguredGreeter")?;
            Ok(Instance::new(greeter))
        })
        .entries([(autowire_id, autowire_factory(registry.clone()))])
        .type_assertion(registry)
        .settings(settings)
        .build()
}

/// 把解析结果转换为可读文本
pub fn describe(instance: &Instance) -> String {
    if let Some(text) = instance.downcast_ref::<String>() {
        return text.clone();
    }
    if let Some(mailer) = instance.downcast_ref::<Mailer>() {
        return mailer.compose("world");
    }
    if let Some(greeter) = instance.downcast_ref::<ConfiguredGreeter>() {
        return greeter.greet("world");
    }
    if let Some(greeter) = instance.downcast_ref::<Arc<dyn Greeter>>() {
        return greeter.greet("world");
    }
    if let Some(container) = instance.downcast_ref::<Container>() {
        return format!("容器 [{}]", container.ids().collect::<Vec<_>>().join(", "));
    }

    format!("<{}>", instance.type_name())
}
