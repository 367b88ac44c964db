//! 派生的元数据与自动装配配合使用

use di_abstractions::{constant, Instance, Reflect, ResolverExt};
use di_impl::{autowire_factory, Container, TypeRegistry};
use di_macros::Reflect;
use std::sync::Arc;

pub trait Storage: Send + Sync {
    fn name(&self) -> String;
}

#[derive(Reflect)]
struct MemoryStorage;

impl Storage for MemoryStorage {
    fn name(&self) -> String {
        "memory".to_string()
    }
}

/// 缓存
///
/// @param Storage  $storage
/// @param usize    $capacity "cache.capacity"
#[derive(Reflect)]
struct Cache {
    storage: Arc<dyn Storage>,
    capacity: usize,
}

/// @param "report.title"
#[derive(Reflect)]
struct Report {
    #[reflect(default)]
    title: String,
    cache: Option<Arc<Cache>>,
}

#[test]
fn test_metadata() {
    let metadata = Cache::type_metadata();
    let doc = metadata
        .constructor
        .as_ref()
        .and_then(|constructor| constructor.doc.clone())
        .unwrap();
    assert!(doc.contains("\"cache.capacity\""));

    let parameters = metadata.parameters();
    assert_eq!(parameters[0].declared_type.as_deref(), Some("Storage"));
    assert!(!parameters[0].is_builtin);
    assert_eq!(parameters[1].declared_type.as_deref(), Some("usize"));
    assert!(parameters[1].is_builtin);

    let report = Report::type_metadata();
    assert!(report.parameters().iter().all(|parameter| parameter.is_optional));
}

#[test]
fn test_autowire_derived_types() {
    let registry = Arc::new(TypeRegistry::new());
    registry
        .register::<MemoryStorage>()
        .register::<Cache>()
        .register::<Report>();

    let cache_settings = Instance::new(Container::new([("capacity", constant(128_usize))]));
    let container = Container::builder()
        .entry("Storage", |c| {
            let storage: Arc<dyn Storage> = c.get_as::<MemoryStorage>("MemoryStorage")?;
            Ok(Instance::new(storage))
        })
        .entry("MemoryStorage", |_| Ok(Instance::new(MemoryStorage)))
        .entry("cache", move |_| Ok(cache_settings.clone()))
        .entries([("Autowire", autowire_factory(registry))])
        .build();

    let cache = container.autowire_as::<Cache>("Cache", Vec::new()).unwrap();
    assert_eq!(cache.storage.name(), "memory");
    assert_eq!(cache.capacity, 128);

    // report.title 和 Cache 都不是容器条目，可选依赖缺失时使用默认值或 None
    let report = container.autowire_as::<Report>("Report", Vec::new()).unwrap();
    assert!(report.title.is_empty());
    assert!(report.cache.is_none());
}
