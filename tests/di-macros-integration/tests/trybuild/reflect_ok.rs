use di_abstractions::{Arguments, Instance, Reflect};
use di_macros::Reflect;
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

struct Fixed;

impl Clock for Fixed {
    fn now(&self) -> u64 {
        42
    }
}

/// @param Clock $clock
#[derive(Reflect)]
#[reflect(name = "Scheduler")]
struct Scheduler {
    clock: Arc<dyn Clock>,
    #[reflect(default)]
    retries: u32,
    label: Option<String>,
}

#[derive(Reflect)]
struct Marker;

fn main() {
    let metadata = Scheduler::type_metadata();
    assert_eq!(metadata.name, "Scheduler");
    assert_eq!(metadata.parameters().len(), 3);

    let clock: Arc<dyn Clock> = Arc::new(Fixed);
    let scheduler = Scheduler::construct(Arguments::new(
        "Scheduler",
        vec![Some(Instance::new(clock)), None, None],
    ))
    .unwrap();
    assert_eq!(scheduler.clock.now(), 42);
    assert_eq!(scheduler.retries, 0);
    assert!(scheduler.label.is_none());

    assert!(!Marker::type_metadata().has_constructor());
    assert!(Marker::construct(Arguments::new("Marker", Vec::new())).is_ok());
}
