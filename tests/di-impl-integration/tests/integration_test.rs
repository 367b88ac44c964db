//! 容器、自动装配和派生宏的端到端测试

use di_abstractions::{constant, Instance, Resolver, ResolverExt};
use di_common::{ContainerSettings, DependencyError};
use di_impl::{autowire_factory, ClassLoader, Container, TypeRegistry};
use di_macros::Reflect;
use std::io::Write;
use std::sync::{Arc, Once};
use tempfile::Builder;

static INIT_LOGGER: Once = Once::new();

fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

/// 礼貌的问候
///
/// @param String $greeting "config.greeting"
#[derive(Reflect)]
struct PoliteGreeter {
    greeting: String,
}

impl Greeter for PoliteGreeter {
    fn greet(&self, name: &str) -> String {
        format!("{}, {}", self.greeting, name)
    }
}

/// @param Greeter $greeter
/// @param Option<String> $suffix "config.suffix"
#[derive(Reflect)]
struct Announcer {
    greeter: Arc<dyn Greeter>,
    suffix: Option<String>,
}

impl Announcer {
    fn announce(&self, name: &str) -> String {
        let greeting = self.greeter.greet(name);
        match &self.suffix {
            Some(suffix) => format!("{greeting}{suffix}"),
            None => greeting,
        }
    }
}

fn registry() -> Arc<TypeRegistry> {
    let registry = Arc::new(TypeRegistry::new());
    registry
        .register::<PoliteGreeter>()
        .register::<Announcer>()
        .register_interface::<Arc<dyn Greeter>>("Greeter");
    registry
}

fn config(entries: Vec<(&'static str, Instance)>) -> Container {
    Container::new(
        entries
            .into_iter()
            .map(|(id, value)| (id, di_abstractions::factory(move |_| Ok(value.clone())))),
    )
}

fn application(registry: Arc<TypeRegistry>, config: Container) -> Container {
    let config = Instance::new(config);

    Container::builder()
        .entries(ClassLoader::new(["PoliteGreeter", "Announcer"]))
        .entry("config", move |_| Ok(config.clone()))
        .entry("Greeter", |c| {
            let greeter: Arc<dyn Greeter> = c.get_as::<PoliteGreeter>("PoliteGreeter")?;
            Ok(Instance::new(greeter))
        })
        .entries([("Autowire", autowire_factory(registry.clone()))])
        .type_assertion(registry)
        .build()
}

#[test]
fn test_autowire_through_sub_container() {
    init_test_logger();

    let container = application(
        registry(),
        config(vec![("greeting", Instance::new("Hello".to_string()))]),
    );

    let announcer = container.get_as::<Announcer>("Announcer").unwrap();
    assert_eq!(announcer.announce("Ada"), "Hello, Ada");
    assert!(container.has("config.greeting"));
    assert!(!container.has("config.suffix"));

    // 单例：再次解析得到同一实例
    let again = container.get_as::<Announcer>("Announcer").unwrap();
    assert!(Arc::ptr_eq(&announcer, &again));
}

#[test]
fn test_optional_dependency_present() {
    init_test_logger();

    let container = application(
        registry(),
        config(vec![
            ("greeting", Instance::new("Hi".to_string())),
            ("suffix", Instance::new("!".to_string())),
        ]),
    );

    let announcer = container.get_as::<Announcer>("Announcer").unwrap();
    assert_eq!(announcer.announce("Grace"), "Hi, Grace!");
}

#[test]
fn test_with_overrides_dotted_entry() {
    init_test_logger();

    let original = application(
        registry(),
        config(vec![("greeting", Instance::new("Hello".to_string()))]),
    );
    let derived = original.with([("config.greeting", constant("Howdy".to_string()))]);

    let derived_announcer = derived.get_as::<Announcer>("Announcer").unwrap();
    let original_announcer = original.get_as::<Announcer>("Announcer").unwrap();

    assert_eq!(derived_announcer.announce("Linus"), "Howdy, Linus");
    assert_eq!(original_announcer.announce("Linus"), "Hello, Linus");
    assert!(!Arc::ptr_eq(&derived_announcer, &original_announcer));
}

#[test]
fn test_missing_config_entry() {
    init_test_logger();

    let container = application(registry(), config(Vec::new()));

    // 子容器以自身的标识符报告缺失
    let err = container.get("Announcer").unwrap_err();
    assert!(matches!(err, DependencyError::NotFound { ref identifier } if identifier == "greeting"));
}

#[test]
fn test_type_assertion_rejects_wrong_value() {
    init_test_logger();

    let registry = registry();
    let container = Container::builder()
        .entry("PoliteGreeter", |_| Ok(Instance::new("not a greeter")))
        .type_assertion(registry)
        .build();

    let err = container.get("PoliteGreeter").unwrap_err();
    assert!(matches!(err, DependencyError::TypeMismatch { .. }));
}

#[test]
fn test_delegate_lookup() {
    init_test_logger();

    let parent: Arc<dyn Resolver> = Arc::new(Container::new([(
        "Logger",
        constant("parent logger".to_string()),
    )]));
    let child = Container::builder()
        .delegate(parent)
        .entry("Service", |c| {
            let logger = c.get_as::<String>("Logger")?;
            Ok(Instance::new(format!("service using {logger}")))
        })
        .build();

    let service = child.get_as::<String>("Service").unwrap();
    assert_eq!(service.as_str(), "service using parent logger");
    assert!(!child.has("Logger"));
}

#[test]
fn test_settings_file() -> anyhow::Result<()> {
    init_test_logger();

    let mut file = Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "autowire_id = \"autowire.reflection\"")?;
    let settings = ContainerSettings::load_from(file.path())?;

    let container = Container::builder()
        .entries(ClassLoader::with_autowire_id(["PoliteGreeter"], &settings.autowire_id))
        .entries([(settings.autowire_id.clone(), autowire_factory(registry()))])
        .settings(settings)
        .build();

    let greeter = container
        .autowire_as::<PoliteGreeter>("PoliteGreeter", vec![Instance::new("Hey".to_string())])?;
    assert_eq!(greeter.greet("Bob"), "Hey, Bob");

    // 条目经由自定义标识符的自动装配解析，缺少 config 子容器
    assert!(container.get("PoliteGreeter").is_err());
    Ok(())
}
