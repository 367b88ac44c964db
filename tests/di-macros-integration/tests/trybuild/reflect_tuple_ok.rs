use di_abstractions::{Arguments, Instance, Reflect};
use di_macros::Reflect;
use std::sync::Arc;

struct Pool {
    size: usize,
}

#[derive(Reflect)]
struct Repository(Arc<Pool>, String);

fn main() {
    let metadata = Repository::type_metadata();
    let parameters = metadata.parameters();
    assert_eq!(parameters[0].name, "0");
    assert_eq!(parameters[0].declared_type.as_deref(), Some("Pool"));
    assert!(parameters[1].is_builtin);

    let repository = Repository::construct(Arguments::new(
        "Repository",
        vec![
            Some(Instance::new(Pool { size: 4 })),
            Some(Instance::new("users".to_string())),
        ],
    ))
    .unwrap();
    assert_eq!(repository.0.size, 4);
    assert_eq!(repository.1, "users");
}
